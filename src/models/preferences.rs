use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-user preferred genres and languages
///
/// At most one record exists per user; a missing record is treated as empty
/// preferences everywhere, never as an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserPreferences {
    pub preferred_genre_ids: Vec<Uuid>,
    pub preferred_language_ids: Vec<Uuid>,
}

impl UserPreferences {
    pub fn is_empty(&self) -> bool {
        self.preferred_genre_ids.is_empty() && self.preferred_language_ids.is_empty()
    }
}
