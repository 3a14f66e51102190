use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sent chat message referenced from pair metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntity {
    /// Reference stored in the pair's `activityreferenceid` metadata
    pub activity_reference_id: String,
    /// Identifier of the chat message assigned by the messaging service
    pub activity_id: String,
    pub created_at: DateTime<Utc>,
}

impl ActivityEntity {
    pub fn new(activity_reference_id: impl Into<String>, activity_id: impl Into<String>) -> Self {
        Self {
            activity_reference_id: activity_reference_id.into(),
            activity_id: activity_id.into(),
            created_at: Utc::now(),
        }
    }

    /// Generate a fresh reference id for a message about to be sent
    pub fn new_reference_id() -> String {
        Uuid::new_v4().to_string()
    }
}
