//! Checklist Entity
//!
//! A card can carry any number of checklists; each checklist owns its
//! items, ordered by position.

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// A checklist attached to a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    pub id: u32,
    pub card_id: u32,
    pub title: String,
    pub items: Vec<ChecklistItem>,
}

/// A single entry inside a checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: u32,
    pub title: String,
    pub done: bool,
    /// Position within the checklist (for ordering)
    pub position: i32,
}

impl Checklist {
    pub fn new(id: u32, card_id: u32, title: String) -> Self {
        Self {
            id,
            card_id,
            title,
            items: Vec::new(),
        }
    }

    /// Fraction of items already done, as (done, total)
    pub fn progress(&self) -> (usize, usize) {
        let done = self.items.iter().filter(|i| i.done).count();
        (done, self.items.len())
    }
}

impl Entity for Checklist {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
