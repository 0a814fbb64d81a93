//! Comment domain entity

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// A comment left on a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u32,
    pub card_id: u32,
    pub author: String,
    pub text: String,
    pub created_at: Option<i64>,
}

impl Comment {
    pub fn new(id: u32, card_id: u32, author: String, text: String) -> Self {
        Self {
            id,
            card_id,
            author,
            text,
            created_at: None,
        }
    }
}

impl Entity for Comment {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
