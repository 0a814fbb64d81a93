//! List Cache
//!
//! Holds the most recently fetched list collection so repeated reads
//! within the TTL skip the network. A cache hit hands back the same
//! shared allocation that the populating fetch produced.
//!
//! Mutations patch the cached collection in place where possible
//! (create, rename, delete); patching never refreshes the timestamp.
//! Reorder invalidates instead, so the next read fetches the canonical
//! order from the backend.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::domain::List;

/// How long a fetched collection stays fresh
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

struct CacheEntry {
    lists: Arc<Vec<List>>,
    fetched_at: Instant,
}

/// Cache for the board's list collection
pub struct ListCache {
    entry: Mutex<Option<CacheEntry>>,
    ttl: Duration,
}

impl ListCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_CACHE_TTL)
    }

    /// Cache with a custom TTL (tests use short ones)
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entry: Mutex::new(None),
            ttl,
        }
    }

    /// The cached collection, if it is still fresh
    pub async fn get(&self) -> Option<Arc<Vec<List>>> {
        let guard = self.entry.lock().await;
        match guard.as_ref() {
            Some(entry) if entry.fetched_at.elapsed() < self.ttl => Some(entry.lists.clone()),
            _ => None,
        }
    }

    /// Store a freshly fetched collection and return the shared handle
    pub async fn set(&self, lists: Vec<List>) -> Arc<Vec<List>> {
        let lists = Arc::new(lists);
        let mut guard = self.entry.lock().await;
        *guard = Some(CacheEntry {
            lists: lists.clone(),
            fetched_at: Instant::now(),
        });
        lists
    }

    /// Drop the cached collection; the next read will fetch
    pub async fn invalidate(&self) {
        let mut guard = self.entry.lock().await;
        *guard = None;
    }

    /// Add or replace one list in the cached collection, keeping it
    /// sorted by order. No-op when nothing fresh is cached.
    pub async fn upsert_list(&self, list: List) {
        let mut guard = self.entry.lock().await;
        if let Some(entry) = guard.as_mut() {
            if entry.fetched_at.elapsed() >= self.ttl {
                return;
            }
            let mut lists: Vec<List> = entry.lists.as_ref().clone();
            match lists.iter_mut().find(|l| l.id == list.id) {
                Some(stored) => *stored = list,
                None => lists.push(list),
            }
            lists.sort_by_key(|l| l.order);
            entry.lists = Arc::new(lists);
        }
    }

    /// Remove one list from the cached collection. No-op when nothing
    /// fresh is cached.
    pub async fn remove_list(&self, list_id: u32) {
        let mut guard = self.entry.lock().await;
        if let Some(entry) = guard.as_mut() {
            if entry.fetched_at.elapsed() >= self.ttl {
                return;
            }
            let mut lists: Vec<List> = entry.lists.as_ref().clone();
            lists.retain(|l| l.id != list_id);
            entry.lists = Arc::new(lists);
        }
    }
}

impl Default for ListCache {
    fn default() -> Self {
        Self::new()
    }
}
