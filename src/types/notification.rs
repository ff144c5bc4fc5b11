//! Level-up promotion notifications

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Level;

/// Pending or resolved promotion offer for one user.
///
/// At most one unaccepted notification exists per user at a time. Once
/// accepted the notification is immutable history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelUpNotification {
    /// Unique id, `levelup_<user>_<millis>`
    pub id: String,
    pub user_id: String,
    pub from_level: Level,
    pub to_level: Level,
    pub created_at: DateTime<Utc>,
    /// Content units newly available at the target level
    pub unlocked_delta: Vec<u32>,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
}

impl LevelUpNotification {
    pub fn new(user_id: &str, from: Level, to: Level, unlocked_delta: Vec<u32>) -> Self {
        let created_at = Utc::now();
        Self {
            id: format!("levelup_{}_{}", user_id, created_at.timestamp_millis()),
            user_id: user_id.to_string(),
            from_level: from,
            to_level: to,
            created_at,
            unlocked_delta,
            accepted: false,
            accepted_at: None,
        }
    }

    /// True while the offer has not been accepted
    pub fn is_pending(&self) -> bool {
        !self.accepted
    }
}

// =============================================================================
// TESTS
// =============================================================================
