//! Reason codes for promotion decisions and progress reporting

use serde::{Deserialize, Serialize};

/// Outcome of one promotion eligibility check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionReason {
    /// Fewer than three recorded audits
    InsufficientHistory,
    /// The recent window is not uniformly above the registered level
    MixedPerformance,
    /// Resolved target did not exceed the registered level
    TargetNotAbove,
    /// An unaccepted notification is already open for this user
    PromotionPending,
    /// Eligibility fired and a notification was created
    Promoted,
}

impl PromotionReason {
    /// Stable code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::InsufficientHistory => "insufficient_history",
            Self::MixedPerformance => "mixed_performance",
            Self::TargetNotAbove => "target_not_above",
            Self::PromotionPending => "promotion_pending",
            Self::Promoted => "promoted",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::InsufficientHistory => "Not enough audits recorded yet",
            Self::MixedPerformance => "Recent audits are not consistently above the current level",
            Self::TargetNotAbove => "Resolved target level does not exceed the current level",
            Self::PromotionPending => "A level-up offer is already waiting",
            Self::Promoted => "Level-up offer created",
        }
    }
}

impl std::fmt::Display for PromotionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

/// Where a user stands on the road to the next level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    /// No audits recorded yet
    NoAudits,
    /// Some audits recorded, eligibility not yet met
    InProgress,
    /// Eligibility met, offer pending or imminent
    ReadyForLevelUp,
    /// Registered level is already the ceiling
    MaxLevelReached,
}

impl ProgressStatus {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoAudits => "no_audits",
            Self::InProgress => "in_progress",
            Self::ReadyForLevelUp => "ready_for_level_up",
            Self::MaxLevelReached => "max_level_reached",
        }
    }
}

impl std::fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

// =============================================================================
// TESTS
// =============================================================================
