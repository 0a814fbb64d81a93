//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde for serialization).

mod card;
mod checklist;
mod comment;
mod entity;
mod label;
mod list;
mod member;

pub use card::{validate_card_title, Card};
pub use checklist::{Checklist, ChecklistItem};
pub use comment::Comment;
pub use entity::{DomainError, DomainResult, Entity};
pub use label::Label;
pub use list::{validate_list_name, List, ListOrdering, MAX_LIST_NAME_LEN};
pub use member::{Member, Role};
