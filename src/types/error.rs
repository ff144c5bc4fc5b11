//! Error types for the leveling subsystem

use thiserror::Error;

/// Failures surfaced by notification acceptance and user-state operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelingError {
    /// No notification with this id exists for the user
    #[error("notification not found: {id}")]
    NotificationNotFound { id: String },

    /// The notification was already accepted; acceptance is not repeatable
    #[error("level-up already accepted: {id}")]
    AlreadyAccepted { id: String },
}

// =============================================================================
// TESTS
// =============================================================================
