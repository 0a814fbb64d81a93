//! Service Integration Tests
//!
//! Workflow tests for ListService and CardService over the in-memory
//! store.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use crate::cache::ListCache;
    use crate::domain::{Card, DomainError, List, ListOrdering, Role};
    use crate::service::{CardService, ListService};
    use crate::store::{CardOperations, ListOperations, MemoryStore, Repository};

    fn lists(store: &MemoryStore) -> &dyn ListOperations {
        store
    }

    fn cards(store: &MemoryStore) -> &dyn CardOperations {
        store
    }

    /// Board with the lists "To Do" (order 1, id 1) and "Done"
    /// (order 2, id 2)
    async fn seed_board(store: &MemoryStore) -> (u32, u32) {
        let todo = lists(store)
            .create(&List::new(0, "To Do".to_string(), 1))
            .await
            .expect("Failed to seed list");
        let done = lists(store)
            .create(&List::new(0, "Done".to_string(), 2))
            .await
            .expect("Failed to seed list");
        (todo.id, done.id)
    }

    fn list_service(store: &Arc<MemoryStore>, role: Role) -> ListService {
        ListService::new(
            store.clone(),
            store.clone(),
            Arc::new(ListCache::new()),
            role,
        )
    }

    fn card_service(store: &Arc<MemoryStore>, role: Role) -> CardService {
        CardService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            role,
        )
    }

    // ========================
    // Cache behavior
    // ========================

    #[tokio::test]
    async fn test_lists_within_ttl_share_one_fetch() {
        let store = Arc::new(MemoryStore::new());
        seed_board(&store).await;
        let service = list_service(&store, Role::Admin);

        let first = service.lists().await.unwrap();
        let second = service.lists().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.list_fetch_count().await, 1);
    }

    #[tokio::test]
    async fn test_create_patches_cache_without_refetch() {
        let store = Arc::new(MemoryStore::new());
        seed_board(&store).await;
        let service = list_service(&store, Role::Admin);

        service.lists().await.unwrap();
        let created = service.create("Doing").await.unwrap();

        let after = service.lists().await.unwrap();
        assert_eq!(after.len(), 3);
        assert!(after.iter().any(|l| l.id == created.id));
        assert_eq!(store.list_fetch_count().await, 1);
    }

    #[tokio::test]
    async fn test_rename_patches_cache_without_refetch() {
        let store = Arc::new(MemoryStore::new());
        let (todo, _) = seed_board(&store).await;
        let service = list_service(&store, Role::Admin);

        service.lists().await.unwrap();
        service.rename(todo, "Backlog").await.unwrap();

        let after = service.lists().await.unwrap();
        assert_eq!(after[0].name, "Backlog");
        assert_eq!(store.list_fetch_count().await, 1);
    }

    #[tokio::test]
    async fn test_reorder_invalidates_cache() {
        let store = Arc::new(MemoryStore::new());
        let (todo, done) = seed_board(&store).await;
        let service = list_service(&store, Role::Admin);

        service.lists().await.unwrap();
        assert_eq!(store.list_fetch_count().await, 1);

        service
            .reorder(&ListOrdering::from_pairs([(todo, 2), (done, 1)]))
            .await
            .unwrap();

        service.lists().await.unwrap();
        assert_eq!(store.list_fetch_count().await, 2);
    }

    // ========================
    // Reorder
    // ========================

    #[tokio::test]
    async fn test_reorder_swaps_board_order() {
        let store = Arc::new(MemoryStore::new());
        let (todo, done) = seed_board(&store).await;
        let service = list_service(&store, Role::Admin);

        service
            .reorder(&ListOrdering::from_pairs([(todo, 2), (done, 1)]))
            .await
            .unwrap();

        let after = service.lists().await.unwrap();
        assert_eq!(after[0].id, done);
        assert_eq!(after[1].id, todo);
    }

    #[tokio::test]
    async fn test_reorder_result_has_unique_orders() {
        let store = Arc::new(MemoryStore::new());
        let (todo, done) = seed_board(&store).await;
        let third = lists(&store)
            .create(&List::new(0, "Doing".to_string(), 3))
            .await
            .unwrap();
        let service = list_service(&store, Role::Admin);

        service
            .reorder(&ListOrdering::from_pairs([
                (todo, 3),
                (done, 1),
                (third.id, 2),
            ]))
            .await
            .unwrap();

        let after = service.lists().await.unwrap();
        let orders: HashSet<u32> = after.iter().map(|l| l.order).collect();
        assert_eq!(orders.len(), after.len());
        assert!(orders.iter().all(|&o| o > 0));
    }

    #[tokio::test]
    async fn test_failed_reorder_leaves_cache_untouched() {
        let store = Arc::new(MemoryStore::new());
        let (todo, _) = seed_board(&store).await;
        let service = list_service(&store, Role::Admin);

        let before = service.lists().await.unwrap();

        // Mapping misses one list, so validation rejects it
        let result = service
            .reorder(&ListOrdering::from_pairs([(todo, 1)]))
            .await;
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));

        let after = service.lists().await.unwrap();
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(store.list_fetch_count().await, 1);
    }

    // ========================
    // Delete with reassignment
    // ========================

    #[tokio::test]
    async fn test_delete_last_list_rejected() {
        let store = Arc::new(MemoryStore::new());
        let only = lists(&store)
            .create(&List::new(0, "Only".to_string(), 1))
            .await
            .unwrap();
        let service = list_service(&store, Role::Admin);

        let result = service.delete(only.id, None, |_, _, _| {}).await;
        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete_non_empty_without_target_rejected() {
        let store = Arc::new(MemoryStore::new());
        let (todo, _) = seed_board(&store).await;
        cards(&store)
            .create(&Card::new(0, todo, "Pending".to_string()))
            .await
            .unwrap();
        let service = list_service(&store, Role::Admin);

        let result = service.delete(todo, None, |_, _, _| {}).await;
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_delete_rejects_source_as_target() {
        let store = Arc::new(MemoryStore::new());
        let (todo, _) = seed_board(&store).await;
        cards(&store)
            .create(&Card::new(0, todo, "Pending".to_string()))
            .await
            .unwrap();
        let service = list_service(&store, Role::Admin);

        let result = service.delete(todo, Some(todo), |_, _, _| {}).await;
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_delete_rejects_unknown_target() {
        let store = Arc::new(MemoryStore::new());
        let (todo, _) = seed_board(&store).await;
        cards(&store)
            .create(&Card::new(0, todo, "Pending".to_string()))
            .await
            .unwrap();
        let service = list_service(&store, Role::Admin);

        let result = service.delete(todo, Some(99), |_, _, _| {}).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_empty_list_needs_no_target() {
        let store = Arc::new(MemoryStore::new());
        let (_, done) = seed_board(&store).await;
        let service = list_service(&store, Role::Admin);

        service.lists().await.unwrap();
        service.delete(done, None, |_, _, _| {}).await.unwrap();

        let after = service.lists().await.unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(store.list_fetch_count().await, 1);
    }

    #[tokio::test]
    async fn test_delete_moves_cards_in_order_with_progress() {
        let store = Arc::new(MemoryStore::new());
        let (todo, done) = seed_board(&store).await;
        for title in ["First", "Second", "Third"] {
            cards(&store)
                .create(&Card::new(0, todo, title.to_string()))
                .await
                .unwrap();
        }
        cards(&store)
            .create(&Card::new(0, done, "Already done".to_string()))
            .await
            .unwrap();
        let service = list_service(&store, Role::Admin);

        let mut reported: Vec<(usize, usize, String)> = Vec::new();
        service
            .delete(todo, Some(done), |current, total, title| {
                reported.push((current, total, title.to_string()));
            })
            .await
            .unwrap();

        assert_eq!(
            reported,
            vec![
                (1, 3, "First".to_string()),
                (2, 3, "Second".to_string()),
                (3, 3, "Third".to_string()),
            ]
        );

        let landed = cards(&store).list_by_list(done).await.unwrap();
        let titles: Vec<&str> = landed.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Already done", "First", "Second", "Third"]);

        let remaining = service.lists().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, done);
    }

    // ========================
    // Permissions
    // ========================

    #[tokio::test]
    async fn test_member_cannot_manage_lists() {
        let store = Arc::new(MemoryStore::new());
        seed_board(&store).await;
        let service = list_service(&store, Role::Member);

        let result = service.create("Sneaky").await;
        assert!(matches!(result, Err(DomainError::PermissionDenied(_))));
        // Denied before any store call
        assert_eq!(store.list_fetch_count().await, 0);
        assert_eq!(lists(&store).list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_observer_cannot_edit_cards() {
        let store = Arc::new(MemoryStore::new());
        let (todo, _) = seed_board(&store).await;
        let service = card_service(&store, Role::Observer);

        let result = service.create_card(todo, "Sneaky", None).await;
        assert!(matches!(result, Err(DomainError::PermissionDenied(_))));
        assert!(cards(&store).list_by_list(todo).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_observer_can_read() {
        let store = Arc::new(MemoryStore::new());
        let (todo, _) = seed_board(&store).await;
        cards(&store)
            .create(&Card::new(0, todo, "Visible".to_string()))
            .await
            .unwrap();

        let list_svc = list_service(&store, Role::Observer);
        let card_svc = card_service(&store, Role::Observer);

        assert_eq!(list_svc.lists().await.unwrap().len(), 2);
        assert_eq!(card_svc.cards_in(todo).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_member_can_edit_cards() {
        let store = Arc::new(MemoryStore::new());
        let (todo, done) = seed_board(&store).await;
        let service = card_service(&store, Role::Member);

        let card = service
            .create_card(todo, "Write docs", Some("For the release"))
            .await
            .unwrap();
        let moved = service.move_card(card.id, done).await.unwrap();
        assert_eq!(moved.list_id, done);
    }

    // ========================
    // Lookup and search
    // ========================

    #[tokio::test]
    async fn test_find_by_name_is_case_insensitive() {
        let store = Arc::new(MemoryStore::new());
        seed_board(&store).await;
        let service = list_service(&store, Role::Member);

        let found = service.find_by_name("dOnE").await.unwrap();
        assert_eq!(found.map(|l| l.name), Some("Done".to_string()));
        assert!(service.find_by_name("Missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_filters_by_title_and_description() {
        let store = Arc::new(MemoryStore::new());
        let (todo, _) = seed_board(&store).await;
        let service = card_service(&store, Role::Member);

        service
            .create_card(todo, "Pay invoice", None)
            .await
            .unwrap();
        service
            .create_card(todo, "Call supplier", Some("about the invoice"))
            .await
            .unwrap();
        service.create_card(todo, "Plan offsite", None).await.unwrap();

        let hits = service.search("INVOICE").await.unwrap();
        assert_eq!(hits.len(), 2);

        let all = service.search("  ").await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_comment_and_checklist_roundtrip() {
        let store = Arc::new(MemoryStore::new());
        let (todo, _) = seed_board(&store).await;
        let service = card_service(&store, Role::Member);

        let card = service.create_card(todo, "Ship it", None).await.unwrap();

        service.add_comment(card.id, "On it").await.unwrap();
        assert!(service.add_comment(card.id, "   ").await.is_err());
        assert_eq!(service.comments_for(card.id).await.unwrap().len(), 1);

        let checklist = service.add_checklist(card.id, "Steps").await.unwrap();
        let item = service
            .add_checklist_item(checklist.id, "Tag release")
            .await
            .unwrap();
        let toggled = service
            .toggle_checklist_item(checklist.id, item.id)
            .await
            .unwrap();
        assert!(toggled.done);
    }
}
