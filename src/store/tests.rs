//! Store Integration Tests
//!
//! Tests for the in-memory store backend.

#[cfg(test)]
mod tests {
    use crate::domain::{Card, Checklist, Comment, Label, List, ListOrdering, Member, Role};
    use crate::store::{
        CardOperations, ChecklistOperations, CommentOperations, LabelOperations, ListOperations,
        MemberDirectory, MemoryStore, Repository,
    };

    fn lists(store: &MemoryStore) -> &dyn ListOperations {
        store
    }

    fn cards(store: &MemoryStore) -> &dyn CardOperations {
        store
    }

    fn labels(store: &MemoryStore) -> &dyn LabelOperations {
        store
    }

    fn comments(store: &MemoryStore) -> &dyn CommentOperations {
        store
    }

    fn checklists(store: &MemoryStore) -> &dyn ChecklistOperations {
        store
    }

    /// Board with two lists and a card in the first one
    async fn setup_board() -> (MemoryStore, u32, u32, u32) {
        let store = MemoryStore::new();
        let todo = lists(&store)
            .create(&List::new(0, "To Do".to_string(), 1))
            .await
            .expect("Failed to create list");
        let done = lists(&store)
            .create(&List::new(0, "Done".to_string(), 2))
            .await
            .expect("Failed to create list");
        let card = cards(&store)
            .create(&Card::new(0, todo.id, "First card".to_string()))
            .await
            .expect("Failed to create card");
        (store, todo.id, done.id, card.id)
    }

    #[tokio::test]
    async fn test_create_list_assigns_id() {
        let store = MemoryStore::new();

        let list = lists(&store)
            .create(&List::new(0, "To Do".to_string(), 1))
            .await
            .expect("Failed to create");

        assert!(list.id > 0);
        assert_eq!(list.name, "To Do");
        assert_eq!(list.order, 1);
    }

    #[tokio::test]
    async fn test_create_list_rejects_taken_order() {
        let (store, _, _, _) = setup_board().await;

        let result = lists(&store)
            .create(&List::new(0, "Another".to_string(), 1))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_create_list_rejects_bad_name() {
        let store = MemoryStore::new();

        assert!(lists(&store)
            .create(&List::new(0, "  ".to_string(), 1))
            .await
            .is_err());
        assert!(lists(&store)
            .create(&List::new(0, "<script>".to_string(), 1))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_list_returns_lists_sorted_by_order() {
        let store = MemoryStore::new();
        lists(&store)
            .create(&List::new(0, "Second".to_string(), 2))
            .await
            .unwrap();
        lists(&store)
            .create(&List::new(0, "First".to_string(), 1))
            .await
            .unwrap();

        let all = lists(&store).list().await.expect("List failed");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "First");
        assert_eq!(all[1].name, "Second");
    }

    #[tokio::test]
    async fn test_delete_last_list_rejected() {
        let store = MemoryStore::new();
        let only = lists(&store)
            .create(&List::new(0, "Only".to_string(), 1))
            .await
            .unwrap();

        assert!(lists(&store).delete(only.id).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_list_with_cards_rejected() {
        let (store, todo, _, _) = setup_board().await;

        assert!(lists(&store).delete(todo).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_empty_list() {
        let (store, _, done, _) = setup_board().await;

        lists(&store).delete(done).await.expect("Delete failed");
        let all = lists(&store).list().await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_reorder_swaps_orders() {
        let (store, todo, done, _) = setup_board().await;

        let ordering = ListOrdering::from_pairs([(todo, 2), (done, 1)]);
        lists(&store).reorder(&ordering).await.expect("Reorder failed");

        let all = lists(&store).list().await.unwrap();
        assert_eq!(all[0].id, done);
        assert_eq!(all[1].id, todo);
    }

    #[tokio::test]
    async fn test_reorder_rejects_partial_mapping() {
        let (store, todo, _, _) = setup_board().await;

        let ordering = ListOrdering::from_pairs([(todo, 1)]);
        assert!(lists(&store).reorder(&ordering).await.is_err());
    }

    #[tokio::test]
    async fn test_card_count() {
        let (store, todo, done, _) = setup_board().await;

        assert_eq!(lists(&store).card_count(todo).await.unwrap(), 1);
        assert_eq!(lists(&store).card_count(done).await.unwrap(), 0);
        assert!(lists(&store).card_count(999).await.is_err());
    }

    #[tokio::test]
    async fn test_create_card_appends_position() {
        let (store, todo, _, _) = setup_board().await;

        let second = cards(&store)
            .create(&Card::new(0, todo, "Second card".to_string()))
            .await
            .unwrap();
        let third = cards(&store)
            .create(&Card::new(0, todo, "Third card".to_string()))
            .await
            .unwrap();

        assert_eq!(second.position, 1);
        assert_eq!(third.position, 2);
        assert!(second.created_at.is_some());
    }

    #[tokio::test]
    async fn test_create_card_requires_existing_list() {
        let store = MemoryStore::new();

        let result = cards(&store)
            .create(&Card::new(0, 42, "Orphan".to_string()))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_move_card_appends_to_target() {
        let (store, todo, done, card_id) = setup_board().await;
        cards(&store)
            .create(&Card::new(0, done, "Already done".to_string()))
            .await
            .unwrap();

        let moved = cards(&store)
            .move_to_list(card_id, done)
            .await
            .expect("Move failed");

        assert_eq!(moved.list_id, done);
        assert_eq!(moved.position, 1);
        assert!(cards(&store).list_by_list(todo).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_card_reindexes_list() {
        let (store, todo, _, first) = setup_board().await;
        let second = cards(&store)
            .create(&Card::new(0, todo, "Second card".to_string()))
            .await
            .unwrap();

        cards(&store).delete(first).await.expect("Delete failed");

        let remaining = cards(&store).list_by_list(todo).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second.id);
        assert_eq!(remaining[0].position, 0);
    }

    #[tokio::test]
    async fn test_update_card_position_shifts_neighbors() {
        let (store, todo, _, first) = setup_board().await;
        let second = cards(&store)
            .create(&Card::new(0, todo, "Second card".to_string()))
            .await
            .unwrap();
        let third = cards(&store)
            .create(&Card::new(0, todo, "Third card".to_string()))
            .await
            .unwrap();

        let mut repositioned = third.clone();
        repositioned.position = 0;
        cards(&store).update(&repositioned).await.unwrap();

        let ordered = cards(&store).list_by_list(todo).await.unwrap();
        let ids: Vec<u32> = ordered.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![third.id, first, second.id]);
        let positions: Vec<i32> = ordered.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_attach_and_detach_label() {
        let (store, _, _, card_id) = setup_board().await;
        let label = labels(&store)
            .create(&Label::new(0, "Bug".to_string()))
            .await
            .unwrap();

        labels(&store).attach(card_id, label.id).await.unwrap();
        // Attaching twice keeps a single entry
        labels(&store).attach(card_id, label.id).await.unwrap();

        let card = cards(&store).find_by_id(card_id).await.unwrap().unwrap();
        assert_eq!(card.label_ids, vec![label.id]);

        labels(&store).detach(card_id, label.id).await.unwrap();
        let card = cards(&store).find_by_id(card_id).await.unwrap().unwrap();
        assert!(card.label_ids.is_empty());
    }

    #[tokio::test]
    async fn test_delete_label_detaches_from_cards() {
        let (store, _, _, card_id) = setup_board().await;
        let label = labels(&store)
            .create(&Label::new(0, "Bug".to_string()))
            .await
            .unwrap();
        labels(&store).attach(card_id, label.id).await.unwrap();

        labels(&store).delete(label.id).await.unwrap();

        let card = cards(&store).find_by_id(card_id).await.unwrap().unwrap();
        assert!(card.label_ids.is_empty());
    }

    #[tokio::test]
    async fn test_comment_author_is_acting_member() {
        let (store, _, _, card_id) = setup_board().await;

        let comment = comments(&store)
            .create(&Comment::new(0, card_id, String::new(), "Nice".to_string()))
            .await
            .unwrap();

        assert_eq!(comment.author, "Local Admin");
        assert!(comment.created_at.is_some());

        let for_card = comments(&store).list_by_card(card_id).await.unwrap();
        assert_eq!(for_card.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_card_cascades() {
        let (store, _, _, card_id) = setup_board().await;
        comments(&store)
            .create(&Comment::new(0, card_id, String::new(), "Bye".to_string()))
            .await
            .unwrap();
        let checklist = checklists(&store)
            .create(&Checklist::new(0, card_id, "Steps".to_string()))
            .await
            .unwrap();

        cards(&store).delete(card_id).await.unwrap();

        assert!(comments(&store)
            .list_by_card(card_id)
            .await
            .unwrap()
            .is_empty());
        assert!(checklists(&store)
            .find_by_id(checklist.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_checklist_items() {
        let (store, _, _, card_id) = setup_board().await;
        let checklist = checklists(&store)
            .create(&Checklist::new(0, card_id, "Steps".to_string()))
            .await
            .unwrap();

        let first = checklists(&store)
            .add_item(checklist.id, "Write")
            .await
            .unwrap();
        let mut second = checklists(&store)
            .add_item(checklist.id, "Review")
            .await
            .unwrap();
        assert_eq!(first.position, 0);
        assert_eq!(second.position, 1);

        second.done = true;
        let updated = checklists(&store)
            .update_item(checklist.id, &second)
            .await
            .unwrap();
        assert!(updated.done);

        checklists(&store)
            .remove_item(checklist.id, first.id)
            .await
            .unwrap();
        let stored = checklists(&store)
            .find_by_id(checklist.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.items.len(), 1);
        assert_eq!(stored.items[0].position, 0);
    }

    #[tokio::test]
    async fn test_member_directory_tracks_acting_member() {
        let store = MemoryStore::new();
        let directory: &dyn MemberDirectory = &store;

        let me = directory.current().await.unwrap();
        assert_eq!(me.role, Role::Admin);

        store
            .set_current_member(Member::new(2, "Guest".to_string(), Role::Observer))
            .await;
        let me = directory.current().await.unwrap();
        assert_eq!(me.name, "Guest");
        assert_eq!(me.role, Role::Observer);

        let all = directory.list().await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
