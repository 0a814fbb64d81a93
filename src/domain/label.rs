//! Label Entity
//!
//! Labels can be attached to cards for categorization and filtering.

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// A label for categorizing cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Unique identifier
    pub id: u32,
    /// Label name
    pub name: String,
    /// Color (hex, e.g., "#FF5733")
    pub color: Option<String>,
}

impl Label {
    pub fn new(id: u32, name: String) -> Self {
        Self {
            id,
            name,
            color: None,
        }
    }

    pub fn with_color(id: u32, name: String, color: String) -> Self {
        Self {
            id,
            name,
            color: Some(color),
        }
    }
}

impl Entity for Label {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
