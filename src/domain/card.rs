//! Card Entity
//!
//! A card belongs to exactly one list and is ordered within it by
//! `position`. Moving a card to another list appends it after the
//! destination's current maximum position.

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

/// A card on the board
///
/// Serialized camelCase to match the backend's wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique identifier
    pub id: u32,
    /// Owning list
    pub list_id: u32,
    /// Card title
    pub title: String,
    /// Optional longer description (Markdown content)
    pub description: Option<String>,
    /// Position within the list (for ordering)
    pub position: i32,
    /// Attached label ids
    pub label_ids: Vec<u32>,
    /// Due date (epoch millis)
    pub due_date: Option<i64>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Card {
    /// Create a new card with default values; the store assigns the
    /// actual position on create
    pub fn new(id: u32, list_id: u32, title: String) -> Self {
        Self {
            id,
            list_id,
            title,
            description: None,
            position: 0,
            label_ids: Vec::new(),
            due_date: None,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Entity for Card {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Validates a card title and returns the trimmed form.
pub fn validate_card_title(title: &str) -> DomainResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidInput(
            "Card title cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_creation() {
        let card = Card::new(1, 10, "Write report".to_string());
        assert_eq!(card.id(), 1);
        assert_eq!(card.list_id, 10);
        assert_eq!(card.position, 0);
        assert!(card.label_ids.is_empty());
    }

    #[test]
    fn test_title_validation() {
        assert_eq!(validate_card_title("  Fix bug  ").unwrap(), "Fix bug");
        assert!(validate_card_title("   ").is_err());
    }
}
