//! List Entity
//!
//! A list is a named column on the board; cards live inside lists.
//! Lists carry a positive `order` value that is unique across the board.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

/// Maximum length of a list name, in characters
pub const MAX_LIST_NAME_LEN: usize = 100;

/// Characters rejected in list names
const FORBIDDEN_NAME_CHARS: [char; 4] = ['<', '>', '"', '\''];

/// A board list (column)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    /// Unique identifier
    pub id: u32,
    /// Display name (1-100 chars, no < > " ')
    pub name: String,
    /// Position on the board, positive and unique among lists
    pub order: u32,
}

impl List {
    pub fn new(id: u32, name: String, order: u32) -> Self {
        Self { id, name, order }
    }
}

impl Entity for List {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Validates a list name and returns the trimmed form.
///
/// Names must be 1-100 characters after trimming and must not contain
/// `<`, `>`, `"` or `'`.
pub fn validate_list_name(name: &str) -> DomainResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidInput(
            "List name cannot be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_LIST_NAME_LEN {
        return Err(DomainError::InvalidInput(format!(
            "List name cannot exceed {} characters",
            MAX_LIST_NAME_LEN
        )));
    }
    if let Some(c) = trimmed.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
        return Err(DomainError::InvalidInput(format!(
            "List name cannot contain '{}'",
            c
        )));
    }
    Ok(trimmed.to_string())
}

/// Desired board order, as a mapping from list id to order value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListOrdering {
    pub orders: HashMap<u32, u32>,
}

impl ListOrdering {
    pub fn new() -> Self {
        Self {
            orders: HashMap::new(),
        }
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, u32)>) -> Self {
        Self {
            orders: pairs.into_iter().collect(),
        }
    }

    pub fn set(&mut self, list_id: u32, order: u32) {
        self.orders.insert(list_id, order);
    }

    /// Checks that this ordering is a consistent permutation of `lists`:
    /// every current list appears exactly once, all order values are
    /// positive, and no order value repeats.
    pub fn validate_against(&self, lists: &[List]) -> DomainResult<()> {
        for list in lists {
            if !self.orders.contains_key(&list.id) {
                return Err(DomainError::InvalidInput(format!(
                    "Reorder is missing list {}",
                    list.id
                )));
            }
        }
        let known: HashSet<u32> = lists.iter().map(|l| l.id).collect();
        for id in self.orders.keys() {
            if !known.contains(id) {
                return Err(DomainError::InvalidInput(format!(
                    "Reorder references unknown list {}",
                    id
                )));
            }
        }

        let mut seen = HashSet::new();
        for (&id, &order) in &self.orders {
            if order == 0 {
                return Err(DomainError::InvalidInput(format!(
                    "Order for list {} must be positive",
                    id
                )));
            }
            if !seen.insert(order) {
                return Err(DomainError::InvalidInput(format!(
                    "Duplicate order value {}",
                    order
                )));
            }
        }
        Ok(())
    }
}
