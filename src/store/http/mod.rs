//! HTTP Store Module
//!
//! REST-backed store implementations, one per aggregate, all sharing
//! one `ApiClient`:
//! - list_store: lists, reorder, cards count
//! - card_store: cards and cross-list moves
//! - label_store: labels and card attachments
//! - comment_store: card comments
//! - checklist_store: checklists and their items
//! - member_store: board membership

mod card_store;
mod checklist_store;
mod client;
mod comment_store;
mod error;
mod label_store;
mod list_store;
mod member_store;

pub use card_store::HttpCardStore;
pub use checklist_store::HttpChecklistStore;
pub use client::ApiClient;
pub use comment_store::HttpCommentStore;
pub use error::ApiError;
pub use label_store::HttpLabelStore;
pub use list_store::HttpListStore;
pub use member_store::HttpMemberStore;
