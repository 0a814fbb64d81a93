//! Member Entity
//!
//! Board members and their roles. Roles gate what the client will even
//! attempt: denied operations fail before any network call.

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Role determines which operations a member may perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including list management
    Admin,
    /// Card, comment, checklist and label operations
    #[default]
    Member,
    /// Read-only access
    Observer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
            Role::Observer => "observer",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "admin" => Role::Admin,
            "observer" => Role::Observer,
            _ => Role::Member,
        }
    }

    /// Create, rename, reorder and delete lists
    pub fn can_manage_lists(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Create and edit cards, comments, checklists and labels
    pub fn can_edit_cards(&self) -> bool {
        matches!(self, Role::Admin | Role::Member)
    }
}

/// A board member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: u32,
    pub name: String,
    pub role: Role,
}

impl Member {
    pub fn new(id: u32, name: String, role: Role) -> Self {
        Self { id, name, role }
    }
}

impl Entity for Member {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
