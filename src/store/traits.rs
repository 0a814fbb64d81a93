//! Store Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can use the REST backend, in-memory, etc.

use async_trait::async_trait;

use crate::domain::{
    Card, Checklist, ChecklistItem, Comment, DomainResult, Entity, Label, List, ListOrdering,
    Member,
};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Create a new entity
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// List all entities
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Update an existing entity
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete entity by ID
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}

/// List-specific operations beyond plain CRUD
#[async_trait]
pub trait ListOperations: Repository<List> {
    /// Apply a new board order in one call
    async fn reorder(&self, ordering: &ListOrdering) -> DomainResult<()>;

    /// Number of cards currently in a list
    async fn card_count(&self, list_id: u32) -> DomainResult<u32>;
}

/// Card-specific operations beyond plain CRUD
#[async_trait]
pub trait CardOperations: Repository<Card> {
    /// Cards of one list, ordered by position
    async fn list_by_list(&self, list_id: u32) -> DomainResult<Vec<Card>>;

    /// Move a card to another list, appending after the current maximum
    /// position. Returns the moved card.
    async fn move_to_list(&self, card_id: u32, list_id: u32) -> DomainResult<Card>;
}

/// Label attachment operations
#[async_trait]
pub trait LabelOperations: Repository<Label> {
    async fn attach(&self, card_id: u32, label_id: u32) -> DomainResult<()>;

    async fn detach(&self, card_id: u32, label_id: u32) -> DomainResult<()>;
}

/// Comment operations
#[async_trait]
pub trait CommentOperations: Repository<Comment> {
    /// Comments of one card, oldest first
    async fn list_by_card(&self, card_id: u32) -> DomainResult<Vec<Comment>>;
}

/// Checklist operations
#[async_trait]
pub trait ChecklistOperations: Repository<Checklist> {
    /// Checklists of one card
    async fn list_by_card(&self, card_id: u32) -> DomainResult<Vec<Checklist>>;

    /// Append an item to a checklist
    async fn add_item(&self, checklist_id: u32, title: &str) -> DomainResult<ChecklistItem>;

    /// Update an item (title, done flag, position)
    async fn update_item(&self, checklist_id: u32, item: &ChecklistItem)
        -> DomainResult<ChecklistItem>;

    /// Remove an item from a checklist
    async fn remove_item(&self, checklist_id: u32, item_id: u32) -> DomainResult<()>;
}

/// Board membership lookup
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// The member the client is acting as
    async fn current(&self) -> DomainResult<Member>;

    /// All board members
    async fn list(&self) -> DomainResult<Vec<Member>>;
}
