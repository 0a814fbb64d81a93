//! Service Layer
//!
//! Workflow operations that combine the stores, the list cache, and
//! role-based permission checks.

mod card_service;
mod list_service;

#[cfg(test)]
mod tests;

pub use card_service::CardService;
pub use list_service::{ListService, CARD_MOVE_DELAY};
