//! In-Memory Store
//!
//! A complete in-process backend implementing every store trait over a
//! single mutexed board state. Used by tests and local development in
//! place of the REST backend. Mirrors the backend's rules: id
//! assignment, append positioning (max + 1), sequential reindex after
//! removal, referential integrity, and the board invariants (unique
//! positive list orders, the last list cannot be deleted).
//!
//! The board starts with no lists and a single admin acting as the
//! current member; callers seed everything else. `list_fetch_count`
//! reports how many times the list collection was fetched, which cache
//! tests rely on.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    validate_card_title, validate_list_name, Card, Checklist, ChecklistItem, Comment, DomainError,
    DomainResult, Entity, Label, List, ListOrdering, Member, Role,
};

use super::traits::{
    CardOperations, ChecklistOperations, CommentOperations, LabelOperations, ListOperations,
    MemberDirectory, Repository,
};

#[derive(Default)]
struct BoardState {
    lists: Vec<List>,
    cards: Vec<Card>,
    labels: Vec<Label>,
    comments: Vec<Comment>,
    checklists: Vec<Checklist>,
    members: Vec<Member>,
    current_member: Option<Member>,
    list_fetches: u32,
}

/// In-memory implementation of all store traits
pub struct MemoryStore {
    state: Mutex<BoardState>,
}

fn next_id<T: Entity<Id = u32>>(items: &[T]) -> u32 {
    items.iter().map(|e| e.id()).max().unwrap_or(0) + 1
}

fn next_position(cards: &[Card], list_id: u32) -> i32 {
    cards
        .iter()
        .filter(|c| c.list_id == list_id)
        .map(|c| c.position)
        .max()
        .map_or(0, |max| max + 1)
}

/// Reassign sequential positions (0, 1, 2, ...) to the cards of a list,
/// keeping their current order
fn reindex_list(cards: &mut [Card], list_id: u32) {
    let mut indices: Vec<usize> = (0..cards.len())
        .filter(|&i| cards[i].list_id == list_id)
        .collect();
    indices.sort_by_key(|&i| (cards[i].position, cards[i].id));
    for (new_pos, &i) in indices.iter().enumerate() {
        cards[i].position = new_pos as i32;
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl MemoryStore {
    pub fn new() -> Self {
        let admin = Member::new(1, "Local Admin".to_string(), Role::Admin);
        Self {
            state: Mutex::new(BoardState {
                members: vec![admin.clone()],
                current_member: Some(admin),
                ..BoardState::default()
            }),
        }
    }

    /// Replace the acting member (and add them to the board if new)
    pub async fn set_current_member(&self, member: Member) {
        let mut state = self.state.lock().await;
        if !state.members.iter().any(|m| m.id == member.id) {
            state.members.push(member.clone());
        }
        state.current_member = Some(member);
    }

    /// How many times the list collection was fetched
    pub async fn list_fetch_count(&self) -> u32 {
        self.state.lock().await.list_fetches
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Lists
// ============================================================================

#[async_trait]
impl Repository<List> for MemoryStore {
    async fn create(&self, entity: &List) -> DomainResult<List> {
        let name = validate_list_name(&entity.name)?;
        let mut state = self.state.lock().await;
        if entity.order == 0 {
            return Err(DomainError::InvalidInput(
                "List order must be positive".to_string(),
            ));
        }
        if state.lists.iter().any(|l| l.order == entity.order) {
            return Err(DomainError::Conflict(format!(
                "Order {} is already taken",
                entity.order
            )));
        }
        let list = List::new(next_id(&state.lists), name, entity.order);
        state.lists.push(list.clone());
        Ok(list)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<List>> {
        let state = self.state.lock().await;
        Ok(state.lists.iter().find(|l| l.id == id).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<List>> {
        let mut state = self.state.lock().await;
        state.list_fetches += 1;
        let mut lists = state.lists.clone();
        lists.sort_by_key(|l| l.order);
        Ok(lists)
    }

    async fn update(&self, entity: &List) -> DomainResult<List> {
        let name = validate_list_name(&entity.name)?;
        let mut state = self.state.lock().await;
        if entity.order == 0 {
            return Err(DomainError::InvalidInput(
                "List order must be positive".to_string(),
            ));
        }
        if state
            .lists
            .iter()
            .any(|l| l.id != entity.id && l.order == entity.order)
        {
            return Err(DomainError::Conflict(format!(
                "Order {} is already taken",
                entity.order
            )));
        }
        let list = state
            .lists
            .iter_mut()
            .find(|l| l.id == entity.id)
            .ok_or_else(|| DomainError::NotFound(format!("List {} not found", entity.id)))?;
        list.name = name;
        list.order = entity.order;
        Ok(list.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        if !state.lists.iter().any(|l| l.id == id) {
            return Err(DomainError::NotFound(format!("List {} not found", id)));
        }
        if state.lists.len() == 1 {
            return Err(DomainError::Conflict(
                "The board must keep at least one list".to_string(),
            ));
        }
        if state.cards.iter().any(|c| c.list_id == id) {
            return Err(DomainError::Conflict(
                "List still contains cards".to_string(),
            ));
        }
        state.lists.retain(|l| l.id != id);
        Ok(())
    }
}

#[async_trait]
impl ListOperations for MemoryStore {
    async fn reorder(&self, ordering: &ListOrdering) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        ordering.validate_against(&state.lists)?;
        for list in state.lists.iter_mut() {
            if let Some(&order) = ordering.orders.get(&list.id) {
                list.order = order;
            }
        }
        Ok(())
    }

    async fn card_count(&self, list_id: u32) -> DomainResult<u32> {
        let state = self.state.lock().await;
        if !state.lists.iter().any(|l| l.id == list_id) {
            return Err(DomainError::NotFound(format!("List {} not found", list_id)));
        }
        Ok(state.cards.iter().filter(|c| c.list_id == list_id).count() as u32)
    }
}

// ============================================================================
// Cards
// ============================================================================

#[async_trait]
impl Repository<Card> for MemoryStore {
    async fn create(&self, entity: &Card) -> DomainResult<Card> {
        let title = validate_card_title(&entity.title)?;
        let mut state = self.state.lock().await;
        if !state.lists.iter().any(|l| l.id == entity.list_id) {
            return Err(DomainError::InvalidInput(format!(
                "List {} does not exist",
                entity.list_id
            )));
        }
        let now = now_millis();
        let card = Card {
            id: next_id(&state.cards),
            list_id: entity.list_id,
            title,
            description: entity.description.clone(),
            position: next_position(&state.cards, entity.list_id),
            label_ids: Vec::new(),
            due_date: entity.due_date,
            created_at: Some(now),
            updated_at: Some(now),
        };
        state.cards.push(card.clone());
        Ok(card)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Card>> {
        let state = self.state.lock().await;
        Ok(state.cards.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Card>> {
        let state = self.state.lock().await;
        let mut cards = state.cards.clone();
        cards.sort_by_key(|c| (c.list_id, c.position));
        Ok(cards)
    }

    async fn update(&self, entity: &Card) -> DomainResult<Card> {
        let title = validate_card_title(&entity.title)?;
        let mut state = self.state.lock().await;
        let (old_position, list_id) = state
            .cards
            .iter()
            .find(|c| c.id == entity.id)
            .map(|c| (c.position, c.list_id))
            .ok_or_else(|| DomainError::NotFound(format!("Card {} not found", entity.id)))?;
        if list_id != entity.list_id {
            return Err(DomainError::InvalidInput(
                "Cannot change the list through update; use a move".to_string(),
            ));
        }

        let new_position = entity.position;
        if new_position != old_position {
            // Moving up: shift cards in [new, old) down by +1
            // Moving down: shift cards in (old, new] up by -1
            for card in state.cards.iter_mut().filter(|c| c.list_id == list_id) {
                if new_position < old_position
                    && card.position >= new_position
                    && card.position < old_position
                {
                    card.position += 1;
                } else if new_position > old_position
                    && card.position > old_position
                    && card.position <= new_position
                {
                    card.position -= 1;
                }
            }
        }

        let card = state
            .cards
            .iter_mut()
            .find(|c| c.id == entity.id)
            .ok_or_else(|| DomainError::NotFound(format!("Card {} not found", entity.id)))?;
        // Labels are managed through attach/detach, not updates
        card.title = title;
        card.description = entity.description.clone();
        card.position = new_position;
        card.due_date = entity.due_date;
        card.updated_at = Some(now_millis());
        Ok(card.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        let card = state
            .cards
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("Card {} not found", id)))?;
        state.cards.retain(|c| c.id != id);
        state.comments.retain(|c| c.card_id != id);
        state.checklists.retain(|c| c.card_id != id);
        reindex_list(&mut state.cards, card.list_id);
        Ok(())
    }
}

#[async_trait]
impl CardOperations for MemoryStore {
    async fn list_by_list(&self, list_id: u32) -> DomainResult<Vec<Card>> {
        let state = self.state.lock().await;
        if !state.lists.iter().any(|l| l.id == list_id) {
            return Err(DomainError::NotFound(format!("List {} not found", list_id)));
        }
        let mut cards: Vec<Card> = state
            .cards
            .iter()
            .filter(|c| c.list_id == list_id)
            .cloned()
            .collect();
        cards.sort_by_key(|c| c.position);
        Ok(cards)
    }

    async fn move_to_list(&self, card_id: u32, list_id: u32) -> DomainResult<Card> {
        let mut state = self.state.lock().await;
        if !state.lists.iter().any(|l| l.id == list_id) {
            return Err(DomainError::NotFound(format!("List {} not found", list_id)));
        }
        let source_list = state
            .cards
            .iter()
            .find(|c| c.id == card_id)
            .map(|c| c.list_id)
            .ok_or_else(|| DomainError::NotFound(format!("Card {} not found", card_id)))?;

        let new_position = next_position(&state.cards, list_id);
        let moved = {
            let card = state
                .cards
                .iter_mut()
                .find(|c| c.id == card_id)
                .ok_or_else(|| DomainError::NotFound(format!("Card {} not found", card_id)))?;
            card.list_id = list_id;
            card.position = new_position;
            card.updated_at = Some(now_millis());
            card.clone()
        };
        reindex_list(&mut state.cards, source_list);
        Ok(moved)
    }
}

// ============================================================================
// Labels
// ============================================================================

#[async_trait]
impl Repository<Label> for MemoryStore {
    async fn create(&self, entity: &Label) -> DomainResult<Label> {
        let mut state = self.state.lock().await;
        let label = Label {
            id: next_id(&state.labels),
            name: entity.name.clone(),
            color: entity.color.clone(),
        };
        state.labels.push(label.clone());
        Ok(label)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Label>> {
        let state = self.state.lock().await;
        Ok(state.labels.iter().find(|l| l.id == id).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Label>> {
        let state = self.state.lock().await;
        Ok(state.labels.clone())
    }

    async fn update(&self, entity: &Label) -> DomainResult<Label> {
        let mut state = self.state.lock().await;
        let label = state
            .labels
            .iter_mut()
            .find(|l| l.id == entity.id)
            .ok_or_else(|| DomainError::NotFound(format!("Label {} not found", entity.id)))?;
        label.name = entity.name.clone();
        label.color = entity.color.clone();
        Ok(label.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        if !state.labels.iter().any(|l| l.id == id) {
            return Err(DomainError::NotFound(format!("Label {} not found", id)));
        }
        state.labels.retain(|l| l.id != id);
        for card in state.cards.iter_mut() {
            card.label_ids.retain(|&lid| lid != id);
        }
        Ok(())
    }
}

#[async_trait]
impl LabelOperations for MemoryStore {
    async fn attach(&self, card_id: u32, label_id: u32) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        if !state.labels.iter().any(|l| l.id == label_id) {
            return Err(DomainError::NotFound(format!(
                "Label {} not found",
                label_id
            )));
        }
        let card = state
            .cards
            .iter_mut()
            .find(|c| c.id == card_id)
            .ok_or_else(|| DomainError::NotFound(format!("Card {} not found", card_id)))?;
        if !card.label_ids.contains(&label_id) {
            card.label_ids.push(label_id);
        }
        Ok(())
    }

    async fn detach(&self, card_id: u32, label_id: u32) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        let card = state
            .cards
            .iter_mut()
            .find(|c| c.id == card_id)
            .ok_or_else(|| DomainError::NotFound(format!("Card {} not found", card_id)))?;
        card.label_ids.retain(|&lid| lid != label_id);
        Ok(())
    }
}

// ============================================================================
// Comments
// ============================================================================

#[async_trait]
impl Repository<Comment> for MemoryStore {
    async fn create(&self, entity: &Comment) -> DomainResult<Comment> {
        let mut state = self.state.lock().await;
        if !state.cards.iter().any(|c| c.id == entity.card_id) {
            return Err(DomainError::InvalidInput(format!(
                "Card {} does not exist",
                entity.card_id
            )));
        }
        let author = match &state.current_member {
            Some(member) => member.name.clone(),
            None => entity.author.clone(),
        };
        let comment = Comment {
            id: next_id(&state.comments),
            card_id: entity.card_id,
            author,
            text: entity.text.clone(),
            created_at: Some(now_millis()),
        };
        state.comments.push(comment.clone());
        Ok(comment)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Comment>> {
        let state = self.state.lock().await;
        Ok(state.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Comment>> {
        let state = self.state.lock().await;
        Ok(state.comments.clone())
    }

    async fn update(&self, entity: &Comment) -> DomainResult<Comment> {
        let mut state = self.state.lock().await;
        let comment = state
            .comments
            .iter_mut()
            .find(|c| c.id == entity.id)
            .ok_or_else(|| DomainError::NotFound(format!("Comment {} not found", entity.id)))?;
        comment.text = entity.text.clone();
        Ok(comment.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        if !state.comments.iter().any(|c| c.id == id) {
            return Err(DomainError::NotFound(format!("Comment {} not found", id)));
        }
        state.comments.retain(|c| c.id != id);
        Ok(())
    }
}

#[async_trait]
impl CommentOperations for MemoryStore {
    async fn list_by_card(&self, card_id: u32) -> DomainResult<Vec<Comment>> {
        let state = self.state.lock().await;
        let mut comments: Vec<Comment> = state
            .comments
            .iter()
            .filter(|c| c.card_id == card_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| (c.created_at, c.id));
        Ok(comments)
    }
}

// ============================================================================
// Checklists
// ============================================================================

#[async_trait]
impl Repository<Checklist> for MemoryStore {
    async fn create(&self, entity: &Checklist) -> DomainResult<Checklist> {
        let mut state = self.state.lock().await;
        if !state.cards.iter().any(|c| c.id == entity.card_id) {
            return Err(DomainError::InvalidInput(format!(
                "Card {} does not exist",
                entity.card_id
            )));
        }
        let checklist = Checklist::new(
            next_id(&state.checklists),
            entity.card_id,
            entity.title.clone(),
        );
        state.checklists.push(checklist.clone());
        Ok(checklist)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Checklist>> {
        let state = self.state.lock().await;
        Ok(state.checklists.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Checklist>> {
        let state = self.state.lock().await;
        Ok(state.checklists.clone())
    }

    async fn update(&self, entity: &Checklist) -> DomainResult<Checklist> {
        let mut state = self.state.lock().await;
        let checklist = state
            .checklists
            .iter_mut()
            .find(|c| c.id == entity.id)
            .ok_or_else(|| DomainError::NotFound(format!("Checklist {} not found", entity.id)))?;
        // Items are managed through the item operations
        checklist.title = entity.title.clone();
        Ok(checklist.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        if !state.checklists.iter().any(|c| c.id == id) {
            return Err(DomainError::NotFound(format!("Checklist {} not found", id)));
        }
        state.checklists.retain(|c| c.id != id);
        Ok(())
    }
}

#[async_trait]
impl ChecklistOperations for MemoryStore {
    async fn list_by_card(&self, card_id: u32) -> DomainResult<Vec<Checklist>> {
        let state = self.state.lock().await;
        Ok(state
            .checklists
            .iter()
            .filter(|c| c.card_id == card_id)
            .cloned()
            .collect())
    }

    async fn add_item(&self, checklist_id: u32, title: &str) -> DomainResult<ChecklistItem> {
        let mut state = self.state.lock().await;
        let next_item_id = state
            .checklists
            .iter()
            .flat_map(|c| c.items.iter())
            .map(|i| i.id)
            .max()
            .unwrap_or(0)
            + 1;
        let checklist = state
            .checklists
            .iter_mut()
            .find(|c| c.id == checklist_id)
            .ok_or_else(|| {
                DomainError::NotFound(format!("Checklist {} not found", checklist_id))
            })?;
        let position = checklist
            .items
            .iter()
            .map(|i| i.position)
            .max()
            .map_or(0, |max| max + 1);
        let item = ChecklistItem {
            id: next_item_id,
            title: title.to_string(),
            done: false,
            position,
        };
        checklist.items.push(item.clone());
        Ok(item)
    }

    async fn update_item(
        &self,
        checklist_id: u32,
        item: &ChecklistItem,
    ) -> DomainResult<ChecklistItem> {
        let mut state = self.state.lock().await;
        let checklist = state
            .checklists
            .iter_mut()
            .find(|c| c.id == checklist_id)
            .ok_or_else(|| {
                DomainError::NotFound(format!("Checklist {} not found", checklist_id))
            })?;
        let stored = checklist
            .items
            .iter_mut()
            .find(|i| i.id == item.id)
            .ok_or_else(|| {
                DomainError::NotFound(format!("Checklist item {} not found", item.id))
            })?;
        stored.title = item.title.clone();
        stored.done = item.done;
        stored.position = item.position;
        Ok(stored.clone())
    }

    async fn remove_item(&self, checklist_id: u32, item_id: u32) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        let checklist = state
            .checklists
            .iter_mut()
            .find(|c| c.id == checklist_id)
            .ok_or_else(|| {
                DomainError::NotFound(format!("Checklist {} not found", checklist_id))
            })?;
        if !checklist.items.iter().any(|i| i.id == item_id) {
            return Err(DomainError::NotFound(format!(
                "Checklist item {} not found",
                item_id
            )));
        }
        checklist.items.retain(|i| i.id != item_id);
        checklist.items.sort_by_key(|i| i.position);
        for (new_pos, item) in checklist.items.iter_mut().enumerate() {
            item.position = new_pos as i32;
        }
        Ok(())
    }
}

// ============================================================================
// Members
// ============================================================================

#[async_trait]
impl MemberDirectory for MemoryStore {
    async fn current(&self) -> DomainResult<Member> {
        let state = self.state.lock().await;
        state
            .current_member
            .clone()
            .ok_or_else(|| DomainError::Internal("No acting member configured".to_string()))
    }

    async fn list(&self) -> DomainResult<Vec<Member>> {
        let state = self.state.lock().await;
        Ok(state.members.clone())
    }
}
