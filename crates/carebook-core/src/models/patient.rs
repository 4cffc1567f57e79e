//! Patient approval projection.

use serde::{Deserialize, Serialize};

/// The slice of a patient's record the scheduling core consumes.
/// Identity, medical history, and credentials live elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Unique UUID
    pub id: String,
    /// Display name
    pub name: String,
    /// Administrative approval gate; unapproved patients cannot book
    pub is_approved: bool,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Patient {
    /// Create a new, not-yet-approved patient.
    pub fn new(name: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            is_approved: false,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
