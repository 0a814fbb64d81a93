//! Store Layer
//!
//! Data access abstractions and implementations. The traits are the
//! seam: the `http` module talks to the REST backend, `memory` is a
//! full in-process stand-in for tests and local development.

mod memory;
mod traits;

pub mod http;

#[cfg(test)]
mod tests;

pub use memory::MemoryStore;
pub use traits::{
    CardOperations, ChecklistOperations, CommentOperations, LabelOperations, ListOperations,
    MemberDirectory, Repository,
};
