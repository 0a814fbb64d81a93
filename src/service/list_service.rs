//! List Service
//!
//! Board-level list workflows on top of the stores and the cache:
//! cached reads, create/rename with cache patching, whole-board
//! reorder, and delete with card reassignment.
//!
//! All mutations require the admin role and fail before any network
//! call when the acting member lacks it.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::ListCache;
use crate::domain::{validate_list_name, DomainError, DomainResult, List, ListOrdering, Role};
use crate::store::{CardOperations, ListOperations, Repository};

/// Pause between two card moves during a list deletion, so a long
/// reassignment does not hammer the backend
pub const CARD_MOVE_DELAY: Duration = Duration::from_millis(150);

/// List workflows
pub struct ListService {
    list_store: Arc<dyn ListOperations>,
    card_store: Arc<dyn CardOperations>,
    cache: Arc<ListCache>,
    role: Role,
}

impl ListService {
    pub fn new(
        list_store: Arc<dyn ListOperations>,
        card_store: Arc<dyn CardOperations>,
        cache: Arc<ListCache>,
        role: Role,
    ) -> Self {
        Self {
            list_store,
            card_store,
            cache,
            role,
        }
    }

    fn require_list_management(&self) -> DomainResult<()> {
        if self.role.can_manage_lists() {
            Ok(())
        } else {
            Err(DomainError::PermissionDenied(
                "Only an admin can manage lists".to_string(),
            ))
        }
    }

    /// The board's lists, sorted by order. Served from the cache while
    /// fresh; otherwise fetched, sorted and cached.
    pub async fn lists(&self) -> DomainResult<Arc<Vec<List>>> {
        if let Some(lists) = self.cache.get().await {
            return Ok(lists);
        }
        let mut lists = self.list_store.list().await?;
        lists.sort_by_key(|l| l.order);
        Ok(self.cache.set(lists).await)
    }

    /// Create a list at the end of the board
    pub async fn create(&self, name: &str) -> DomainResult<List> {
        self.require_list_management()?;
        let name = validate_list_name(name)?;

        let current = self.lists().await?;
        let next_order = current.iter().map(|l| l.order).max().unwrap_or(0) + 1;

        let created = self
            .list_store
            .create(&List::new(0, name, next_order))
            .await?;
        log::info!("Created list {} ({})", created.id, created.name);
        self.cache.upsert_list(created.clone()).await;
        Ok(created)
    }

    /// Rename a list, keeping its position
    pub async fn rename(&self, id: u32, name: &str) -> DomainResult<List> {
        self.require_list_management()?;
        let name = validate_list_name(name)?;

        let current = self.lists().await?;
        let existing = current
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("List {} not found", id)))?;

        let updated = self
            .list_store
            .update(&List::new(existing.id, name, existing.order))
            .await?;
        self.cache.upsert_list(updated.clone()).await;
        Ok(updated)
    }

    /// Apply a new board order in one call.
    ///
    /// The mapping must cover every current list exactly once with
    /// positive, duplicate-free order values. On success the cache is
    /// invalidated so the next read fetches the canonical order; on
    /// failure the cache is left untouched.
    pub async fn reorder(&self, ordering: &ListOrdering) -> DomainResult<()> {
        self.require_list_management()?;

        let current = self.lists().await?;
        ordering.validate_against(&current)?;

        self.list_store.reorder(ordering).await?;
        log::info!("Reordered {} lists", ordering.orders.len());
        self.cache.invalidate().await;
        Ok(())
    }

    /// Delete a list.
    ///
    /// The last remaining list cannot be deleted. A list that still
    /// contains cards needs a distinct, existing target list; its cards
    /// are moved there one at a time (`progress` runs after each move
    /// with the 1-based count, the total, and the card title) before the
    /// emptied list is deleted. A failure mid-move is surfaced as-is and
    /// already-moved cards stay where they are.
    pub async fn delete<F>(
        &self,
        source_id: u32,
        target_id: Option<u32>,
        mut progress: F,
    ) -> DomainResult<()>
    where
        F: FnMut(usize, usize, &str) + Send,
    {
        self.require_list_management()?;

        let current = self.lists().await?;
        if !current.iter().any(|l| l.id == source_id) {
            return Err(DomainError::NotFound(format!(
                "List {} not found",
                source_id
            )));
        }
        if current.len() <= 1 {
            return Err(DomainError::Conflict(
                "The board must keep at least one list".to_string(),
            ));
        }

        let count = self.list_store.card_count(source_id).await?;
        if count > 0 {
            let target_id = target_id.ok_or_else(|| {
                DomainError::InvalidInput(
                    "A target list is required to delete a non-empty list".to_string(),
                )
            })?;
            if target_id == source_id {
                return Err(DomainError::InvalidInput(
                    "The target list must differ from the list being deleted".to_string(),
                ));
            }
            if !current.iter().any(|l| l.id == target_id) {
                return Err(DomainError::NotFound(format!(
                    "Target list {} not found",
                    target_id
                )));
            }

            let cards = self.card_store.list_by_list(source_id).await?;
            let total = cards.len();
            log::info!(
                "Moving {} cards from list {} to list {} before deletion",
                total,
                source_id,
                target_id
            );
            for (index, card) in cards.iter().enumerate() {
                self.card_store.move_to_list(card.id, target_id).await?;
                progress(index + 1, total, &card.title);
                tokio::time::sleep(CARD_MOVE_DELAY).await;
            }
        }

        self.list_store.delete(source_id).await?;
        log::info!("Deleted list {}", source_id);
        self.cache.remove_list(source_id).await;
        Ok(())
    }

    /// Case-insensitive list lookup by name (voice commands use this)
    pub async fn find_by_name(&self, name: &str) -> DomainResult<Option<List>> {
        let lists = self.lists().await?;
        let needle = name.trim().to_lowercase();
        Ok(lists
            .iter()
            .find(|l| l.name.to_lowercase() == needle)
            .cloned())
    }
}
