//! Card Service
//!
//! Card workflows plus the label, comment and checklist passthroughs.
//! Mutations require at least the member role; observers can only read.

use std::sync::Arc;

use crate::domain::{
    validate_card_title, Card, Checklist, ChecklistItem, Comment, DomainError, DomainResult,
    Label, Role,
};
use crate::store::{
    CardOperations, ChecklistOperations, CommentOperations, LabelOperations, Repository,
};

/// Card workflows
pub struct CardService {
    card_store: Arc<dyn CardOperations>,
    label_store: Arc<dyn LabelOperations>,
    comment_store: Arc<dyn CommentOperations>,
    checklist_store: Arc<dyn ChecklistOperations>,
    role: Role,
}

impl CardService {
    pub fn new(
        card_store: Arc<dyn CardOperations>,
        label_store: Arc<dyn LabelOperations>,
        comment_store: Arc<dyn CommentOperations>,
        checklist_store: Arc<dyn ChecklistOperations>,
        role: Role,
    ) -> Self {
        Self {
            card_store,
            label_store,
            comment_store,
            checklist_store,
            role,
        }
    }

    fn require_card_edit(&self) -> DomainResult<()> {
        if self.role.can_edit_cards() {
            Ok(())
        } else {
            Err(DomainError::PermissionDenied(
                "Observers cannot make changes".to_string(),
            ))
        }
    }

    // ========================
    // Cards
    // ========================

    /// Cards of one list, ordered by position
    pub async fn cards_in(&self, list_id: u32) -> DomainResult<Vec<Card>> {
        self.card_store.list_by_list(list_id).await
    }

    pub async fn find_card(&self, id: u32) -> DomainResult<Option<Card>> {
        self.card_store.find_by_id(id).await
    }

    /// Create a card at the end of a list
    pub async fn create_card(
        &self,
        list_id: u32,
        title: &str,
        description: Option<&str>,
    ) -> DomainResult<Card> {
        self.require_card_edit()?;
        let title = validate_card_title(title)?;

        let mut card = Card::new(0, list_id, title);
        card.description = description.map(|d| d.to_string());
        let created = self.card_store.create(&card).await?;
        log::info!("Created card {} in list {}", created.id, list_id);
        Ok(created)
    }

    /// Update a card's own fields (title, description, position, due date)
    pub async fn update_card(&self, card: &Card) -> DomainResult<Card> {
        self.require_card_edit()?;
        validate_card_title(&card.title)?;
        self.card_store.update(card).await
    }

    pub async fn delete_card(&self, id: u32) -> DomainResult<()> {
        self.require_card_edit()?;
        self.card_store.delete(id).await
    }

    /// Move a card to another list, appending at the end
    pub async fn move_card(&self, card_id: u32, list_id: u32) -> DomainResult<Card> {
        self.require_card_edit()?;
        let moved = self.card_store.move_to_list(card_id, list_id).await?;
        log::info!("Moved card {} to list {}", card_id, list_id);
        Ok(moved)
    }

    /// Client-side search over all cards by title and description
    pub async fn search(&self, query: &str) -> DomainResult<Vec<Card>> {
        let needle = query.trim().to_lowercase();
        let cards = self.card_store.list().await?;
        if needle.is_empty() {
            return Ok(cards);
        }
        Ok(cards
            .into_iter()
            .filter(|c| {
                c.title.to_lowercase().contains(&needle)
                    || c.description
                        .as_ref()
                        .map_or(false, |d| d.to_lowercase().contains(&needle))
            })
            .collect())
    }

    // ========================
    // Labels
    // ========================

    pub async fn labels(&self) -> DomainResult<Vec<Label>> {
        self.label_store.list().await
    }

    pub async fn create_label(&self, name: &str, color: Option<&str>) -> DomainResult<Label> {
        self.require_card_edit()?;
        let mut label = Label::new(0, name.to_string());
        label.color = color.map(|c| c.to_string());
        self.label_store.create(&label).await
    }

    pub async fn attach_label(&self, card_id: u32, label_id: u32) -> DomainResult<()> {
        self.require_card_edit()?;
        self.label_store.attach(card_id, label_id).await
    }

    pub async fn detach_label(&self, card_id: u32, label_id: u32) -> DomainResult<()> {
        self.require_card_edit()?;
        self.label_store.detach(card_id, label_id).await
    }

    // ========================
    // Comments
    // ========================

    /// Comments of one card, oldest first
    pub async fn comments_for(&self, card_id: u32) -> DomainResult<Vec<Comment>> {
        self.comment_store.list_by_card(card_id).await
    }

    pub async fn add_comment(&self, card_id: u32, text: &str) -> DomainResult<Comment> {
        self.require_card_edit()?;
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::InvalidInput(
                "Comment text cannot be empty".to_string(),
            ));
        }
        // The backend fills in the author from the acting member
        self.comment_store
            .create(&Comment::new(0, card_id, String::new(), text.to_string()))
            .await
    }

    pub async fn delete_comment(&self, id: u32) -> DomainResult<()> {
        self.require_card_edit()?;
        self.comment_store.delete(id).await
    }

    // ========================
    // Checklists
    // ========================

    pub async fn checklists_for(&self, card_id: u32) -> DomainResult<Vec<Checklist>> {
        self.checklist_store.list_by_card(card_id).await
    }

    pub async fn add_checklist(&self, card_id: u32, title: &str) -> DomainResult<Checklist> {
        self.require_card_edit()?;
        self.checklist_store
            .create(&Checklist::new(0, card_id, title.to_string()))
            .await
    }

    pub async fn delete_checklist(&self, id: u32) -> DomainResult<()> {
        self.require_card_edit()?;
        self.checklist_store.delete(id).await
    }

    pub async fn add_checklist_item(
        &self,
        checklist_id: u32,
        title: &str,
    ) -> DomainResult<ChecklistItem> {
        self.require_card_edit()?;
        self.checklist_store.add_item(checklist_id, title).await
    }

    /// Toggle one checklist item's done flag
    pub async fn toggle_checklist_item(
        &self,
        checklist_id: u32,
        item_id: u32,
    ) -> DomainResult<ChecklistItem> {
        self.require_card_edit()?;

        let checklist = self
            .checklist_store
            .find_by_id(checklist_id)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound(format!("Checklist {} not found", checklist_id))
            })?;
        let mut item = checklist
            .items
            .iter()
            .find(|i| i.id == item_id)
            .cloned()
            .ok_or_else(|| {
                DomainError::NotFound(format!("Checklist item {} not found", item_id))
            })?;

        item.done = !item.done;
        self.checklist_store.update_item(checklist_id, &item).await
    }

    pub async fn remove_checklist_item(
        &self,
        checklist_id: u32,
        item_id: u32,
    ) -> DomainResult<()> {
        self.require_card_edit()?;
        self.checklist_store.remove_item(checklist_id, item_id).await
    }
}
