//! Per-user audit history and registered level state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::types::{AuditResult, Level};
use crate::HISTORY_CAP;

/// Compact projection of one audit kept in a user's history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditHistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub detected_level: Level,
    pub confidence: u8,
    pub soft_skill_score: f64,
    pub mistake_count: usize,
    pub hesitation_ratio: f64,
    pub dominant_verb_tier: Level,
}

impl From<&AuditResult> for AuditHistoryEntry {
    fn from(result: &AuditResult) -> Self {
        Self {
            timestamp: result.timestamp,
            detected_level: result.detected_level,
            confidence: result.confidence,
            soft_skill_score: result.soft_skill_score,
            mistake_count: result.mistakes.len(),
            hesitation_ratio: result.hesitation.ratio,
            dominant_verb_tier: result.verb_profile.dominant,
        }
    }
}

/// Registered level plus bounded audit history for one user.
///
/// The history holds at most [`HISTORY_CAP`] entries, insertion-ordered,
/// oldest evicted first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLevelState {
    pub user_id: String,
    pub registered_level: Level,
    pub history: VecDeque<AuditHistoryEntry>,
}

impl UserLevelState {
    /// Fresh state at the given starting level
    pub fn new(user_id: impl Into<String>, level: Level) -> Self {
        Self {
            user_id: user_id.into(),
            registered_level: level,
            history: VecDeque::with_capacity(HISTORY_CAP),
        }
    }

    /// Append an entry, evicting the oldest when the cap is reached
    pub fn record(&mut self, entry: AuditHistoryEntry) {
        if self.history.len() == HISTORY_CAP {
            self.history.pop_front();
        }
        self.history.push_back(entry);
        debug_assert!(
            self.history.len() <= HISTORY_CAP,
            "history overflow for user {}",
            self.user_id
        );
    }

    /// The most recent `n` entries, oldest of the window first
    pub fn last_window(&self, n: usize) -> Vec<&AuditHistoryEntry> {
        let start = self.history.len().saturating_sub(n);
        self.history.iter().skip(start).collect()
    }

    /// Entries newest first, up to `limit`
    pub fn recent(&self, limit: usize) -> Vec<&AuditHistoryEntry> {
        self.history.iter().rev().take(limit).collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
