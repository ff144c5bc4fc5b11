//! Adaptive leveling: audit recording, promotion detection, notifications
//!
//! State machine per user: no history → accumulating → eligibility checked on
//! every new record → promotion pending (one open notification) → accepted
//! (registered level advances, history retained). Eligibility looks at the
//! most recent window only.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::store::{InMemoryStore, UserAccount, UserStateStore};
use crate::types::{
    newly_unlocked, unlocked_for, AuditHistoryEntry, AuditResult, Level, LevelUpNotification,
    LevelingError, ProgressStatus, PromotionReason,
};
use crate::PROMOTION_WINDOW;

// =============================================================================
// PROMOTION POLICY
// =============================================================================

/// Verdict of a promotion policy over one user's recent window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionDecision {
    NotEligible(PromotionReason),
    Promote(Level),
}

/// Eligibility and target selection, replaceable without touching the
/// surrounding state machine
pub trait PromotionPolicy: Send + Sync {
    fn evaluate(&self, registered: Level, window: &[&AuditHistoryEntry]) -> PromotionDecision;
}

/// Default policy: the whole window must sit strictly above the registered
/// level; the target is the most frequent detected level, ties resolved
/// toward the higher one.
#[derive(Debug)]
pub struct ConsistencyPolicy {
    required: usize,
}

impl Default for ConsistencyPolicy {
    fn default() -> Self {
        Self { required: PROMOTION_WINDOW }
    }
}

impl PromotionPolicy for ConsistencyPolicy {
    fn evaluate(&self, registered: Level, window: &[&AuditHistoryEntry]) -> PromotionDecision {
        if window.len() < self.required {
            return PromotionDecision::NotEligible(PromotionReason::InsufficientHistory);
        }
        if !window.iter().all(|e| e.detected_level > registered) {
            return PromotionDecision::NotEligible(PromotionReason::MixedPerformance);
        }

        let target = most_common_level(window.iter().map(|e| e.detected_level));
        // Defensive only: an all-above window cannot resolve at or below the
        // registered level unless the hierarchy itself is inconsistent
        if target <= registered {
            return PromotionDecision::NotEligible(PromotionReason::TargetNotAbove);
        }
        PromotionDecision::Promote(target)
    }
}

/// Most frequent level, ties resolved toward the higher level
fn most_common_level<I: IntoIterator<Item = Level>>(levels: I) -> Level {
    let mut counts = [0usize; 4];
    for level in levels {
        counts[(level.rank() - 1) as usize] += 1;
    }

    let mut best = Level::B1;
    let mut best_count = 0;
    for &level in Level::ALL.iter() {
        let count = counts[(level.rank() - 1) as usize];
        if count > 0 && count >= best_count {
            best = level;
            best_count = count;
        }
    }
    best
}

// =============================================================================
// ENGINE OUTPUT TYPES
// =============================================================================

/// Result of the eligibility check run after each recorded audit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionCheck {
    pub reason: PromotionReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<LevelUpNotification>,
}

impl PromotionCheck {
    fn not(reason: PromotionReason) -> Self {
        Self { reason, notification: None }
    }

    /// True when a notification was created by this check
    pub fn triggered(&self) -> bool {
        self.reason == PromotionReason::Promoted
    }
}

/// Outcome of recording one audit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordOutcome {
    /// History length after insertion
    pub entry_count: usize,
    pub promotion: PromotionCheck,
}

/// Outcome of accepting a level-up notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptOutcome {
    pub old_level: Level,
    pub new_level: Level,
    pub unlocked_units: Vec<u32>,
    pub newly_unlocked: Vec<u32>,
}

/// Progress toward the next registered level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelUpProgress {
    /// Qualifying share of the window, 0 to 100
    pub percentage: u8,
    pub status: ProgressStatus,
    pub qualifying_audits: usize,
    pub required_audits: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_level: Option<Level>,
    pub message: String,
}

/// Full leveling snapshot for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelingStatus {
    pub user_id: String,
    pub registered_level: Level,
    pub unlocked_units: Vec<u32>,
    pub total_audits: usize,
    /// The eligibility window, oldest of the window first
    pub recent_audits: Vec<AuditHistoryEntry>,
    pub progress: LevelUpProgress,
    pub pending_notifications: Vec<LevelUpNotification>,
    pub has_level_up_available: bool,
}

/// Aggregate counters across all users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStats {
    pub total_users: usize,
    pub level_distribution: BTreeMap<Level, usize>,
    pub total_audits: usize,
    pub total_level_ups: usize,
    pub pending_level_ups: usize,
}

// =============================================================================
// LEVELING ENGINE
// =============================================================================

/// The leveling subsystem. All mutation happens under the per-user lock
/// handed out by the store.
pub struct LevelingEngine {
    store: Box<dyn UserStateStore>,
    policy: Box<dyn PromotionPolicy>,
    default_level: Level,
}

impl Default for LevelingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelingEngine {
    pub fn new() -> Self {
        Self::with_store(Box::new(InMemoryStore::new()))
    }

    pub fn with_store(store: Box<dyn UserStateStore>) -> Self {
        Self {
            store,
            policy: Box::new(ConsistencyPolicy::default()),
            default_level: Level::B1,
        }
    }

    pub fn with_policy(mut self, policy: Box<dyn PromotionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Register a user at an explicit starting level. An existing user keeps
    /// their current level.
    pub fn init_user(&self, user_id: &str, level: Level) -> LevelingStatus {
        let handle = self.store.get_or_create(user_id, level);
        let account = handle.lock().unwrap();
        build_status(&account)
    }

    /// Append one audit to the user's history and run the eligibility check.
    /// Unknown users are initialized at the default level first.
    pub fn record_audit(&self, user_id: &str, result: &AuditResult) -> RecordOutcome {
        let handle = self.store.get_or_create(user_id, self.default_level);
        let mut account = handle.lock().unwrap();

        account.state.record(AuditHistoryEntry::from(result));
        let promotion = self.check_promotion(&mut account);

        RecordOutcome {
            entry_count: account.state.history.len(),
            promotion,
        }
    }

    fn check_promotion(&self, account: &mut UserAccount) -> PromotionCheck {
        let registered = account.state.registered_level;
        let decision = {
            let window = account.state.last_window(PROMOTION_WINDOW);
            self.policy.evaluate(registered, &window)
        };

        let target = match decision {
            PromotionDecision::NotEligible(reason) => {
                debug!(
                    "No promotion for {}: {}",
                    account.state.user_id,
                    reason.code()
                );
                return PromotionCheck::not(reason);
            }
            PromotionDecision::Promote(target) => target,
        };

        // One unresolved offer per user at a time
        if account.pending_notification().is_some() {
            debug!(
                "Promotion for {} suppressed: offer already pending",
                account.state.user_id
            );
            return PromotionCheck::not(PromotionReason::PromotionPending);
        }

        let delta = newly_unlocked(registered, target);
        let notification =
            LevelUpNotification::new(&account.state.user_id, registered, target, delta);
        info!(
            "Level-up triggered for {}: {} -> {}",
            account.state.user_id, registered, target
        );
        account.notifications.push(notification.clone());

        PromotionCheck {
            reason: PromotionReason::Promoted,
            notification: Some(notification),
        }
    }

    /// Accept a pending notification: advances the registered level and
    /// resolves the offer. Accepting twice fails, it does not no-op.
    pub fn accept_level_up(
        &self,
        user_id: &str,
        notification_id: &str,
    ) -> Result<AcceptOutcome, LevelingError> {
        let handle = self
            .store
            .get(user_id)
            .ok_or_else(|| LevelingError::NotificationNotFound {
                id: notification_id.to_string(),
            })?;
        let mut account = handle.lock().unwrap();

        let (new_level, newly) = {
            let notification = account
                .notifications
                .iter_mut()
                .find(|n| n.id == notification_id)
                .ok_or_else(|| LevelingError::NotificationNotFound {
                    id: notification_id.to_string(),
                })?;
            if notification.accepted {
                return Err(LevelingError::AlreadyAccepted {
                    id: notification_id.to_string(),
                });
            }
            notification.accepted = true;
            notification.accepted_at = Some(Utc::now());
            (notification.to_level, notification.unlocked_delta.clone())
        };

        let old_level = account.state.registered_level;
        account.state.registered_level = new_level;
        info!(
            "Level-up accepted for {}: {} -> {}",
            account.state.user_id, old_level, new_level
        );

        Ok(AcceptOutcome {
            old_level,
            new_level,
            unlocked_units: unlocked_for(new_level),
            newly_unlocked: newly,
        })
    }

    /// Leveling snapshot, initializing unknown users at the default level
    pub fn status(&self, user_id: &str) -> LevelingStatus {
        let handle = self.store.get_or_create(user_id, self.default_level);
        let account = handle.lock().unwrap();
        build_status(&account)
    }

    /// All notifications for a user, newest first
    pub fn notifications(&self, user_id: &str) -> Vec<LevelUpNotification> {
        match self.store.get(user_id) {
            Some(handle) => {
                let account = handle.lock().unwrap();
                let mut list = account.notifications.clone();
                list.reverse();
                list
            }
            None => Vec::new(),
        }
    }

    /// Audit history, newest first, up to `limit` entries
    pub fn history(&self, user_id: &str, limit: usize) -> Vec<AuditHistoryEntry> {
        match self.store.get(user_id) {
            Some(handle) => {
                let account = handle.lock().unwrap();
                account.state.recent(limit).into_iter().cloned().collect()
            }
            None => Vec::new(),
        }
    }

    /// Whether a content unit is open at the user's registered level.
    /// Unknown users read as the default level, nothing is created.
    pub fn has_access(&self, user_id: &str, unit_id: u32) -> bool {
        let level = match self.store.get(user_id) {
            Some(handle) => handle.lock().unwrap().state.registered_level,
            None => self.default_level,
        };
        crate::types::is_unlocked(level, unit_id)
    }

    /// Number of users currently tracked
    pub fn user_count(&self) -> usize {
        self.store.len()
    }

    /// Drop every trace of a user. Returns whether anything existed.
    pub fn reset_user(&self, user_id: &str) -> bool {
        let removed = self.store.evict(user_id);
        if removed {
            info!("User data cleared for {}", user_id);
        }
        removed
    }

    /// Aggregate counters over the whole store
    pub fn stats(&self) -> SystemStats {
        let handles = self.store.accounts();
        let total_users = handles.len();

        let mut level_distribution = BTreeMap::new();
        let mut total_audits = 0;
        let mut total_level_ups = 0;
        let mut pending_level_ups = 0;

        for handle in handles {
            let account = handle.lock().unwrap();
            *level_distribution
                .entry(account.state.registered_level)
                .or_insert(0) += 1;
            total_audits += account.state.history.len();
            total_level_ups += account.accepted_count();
            pending_level_ups += account
                .notifications
                .iter()
                .filter(|n| n.is_pending())
                .count();
        }

        SystemStats {
            total_users,
            level_distribution,
            total_audits,
            total_level_ups,
            pending_level_ups,
        }
    }
}

fn build_status(account: &UserAccount) -> LevelingStatus {
    let registered = account.state.registered_level;
    let recent: Vec<AuditHistoryEntry> = account
        .state
        .last_window(PROMOTION_WINDOW)
        .into_iter()
        .cloned()
        .collect();
    let progress = progress_for(registered, &recent);
    let pending: Vec<LevelUpNotification> = account
        .notifications
        .iter()
        .filter(|n| n.is_pending())
        .cloned()
        .collect();

    LevelingStatus {
        user_id: account.state.user_id.clone(),
        registered_level: registered,
        unlocked_units: unlocked_for(registered),
        total_audits: account.state.history.len(),
        recent_audits: recent,
        progress,
        has_level_up_available: !pending.is_empty(),
        pending_notifications: pending,
    }
}

/// Progress is the qualifying share of the window: entries at or above the
/// next level, over the window size
fn progress_for(registered: Level, recent: &[AuditHistoryEntry]) -> LevelUpProgress {
    let next = match registered.next() {
        Some(next) => next,
        None => {
            return LevelUpProgress {
                percentage: 100,
                status: ProgressStatus::MaxLevelReached,
                qualifying_audits: 0,
                required_audits: PROMOTION_WINDOW,
                target_level: None,
                message: "You are at the highest level (C2)!".to_string(),
            }
        }
    };

    if recent.is_empty() {
        return LevelUpProgress {
            percentage: 0,
            status: ProgressStatus::NoAudits,
            qualifying_audits: 0,
            required_audits: PROMOTION_WINDOW,
            target_level: Some(next),
            message: format!(
                "Complete {} crisis sessions to unlock level-up tracking",
                PROMOTION_WINDOW
            ),
        };
    }

    let qualifying = recent.iter().filter(|e| e.detected_level >= next).count();
    let percentage = (qualifying as f64 / PROMOTION_WINDOW as f64 * 100.0).round() as u8;

    let (status, message) = if percentage == 100 {
        (
            ProgressStatus::ReadyForLevelUp,
            format!("🎉 Level-up available! Accept your {} upgrade!", next),
        )
    } else {
        (
            ProgressStatus::InProgress,
            format!(
                "{}/{} sessions at {} level. Keep going!",
                qualifying, PROMOTION_WINDOW, next
            ),
        )
    };

    LevelUpProgress {
        percentage,
        status,
        qualifying_audits: qualifying,
        required_audits: PROMOTION_WINDOW,
        target_level: Some(next),
        message,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AuditResult;

    fn result_at(level: Level) -> AuditResult {
        let mut result = AuditResult::insufficient_data();
        result.detected_level = level;
        result.confidence = 85;
        result
    }

    fn entry_at(level: Level) -> AuditHistoryEntry {
        AuditHistoryEntry::from(&result_at(level))
    }

    #[test]
    fn test_most_common_level_tie_goes_higher() {
        assert_eq!(
            most_common_level(vec![Level::C1, Level::C1, Level::C2]),
            Level::C1
        );
        assert_eq!(
            most_common_level(vec![Level::B2, Level::C1, Level::C2]),
            Level::C2
        );
        assert_eq!(
            most_common_level(vec![Level::C2, Level::C1, Level::C2]),
            Level::C2
        );
    }

    #[test]
    fn test_policy_requires_full_window() {
        let policy = ConsistencyPolicy::default();
        let entries = [entry_at(Level::C1), entry_at(Level::C1)];
        let window: Vec<&AuditHistoryEntry> = entries.iter().collect();
        assert_eq!(
            policy.evaluate(Level::B2, &window),
            PromotionDecision::NotEligible(PromotionReason::InsufficientHistory)
        );
    }

    #[test]
    fn test_policy_rejects_mixed_window() {
        let policy = ConsistencyPolicy::default();
        let entries = [entry_at(Level::C1), entry_at(Level::B2), entry_at(Level::C1)];
        let window: Vec<&AuditHistoryEntry> = entries.iter().collect();
        assert_eq!(
            policy.evaluate(Level::B2, &window),
            PromotionDecision::NotEligible(PromotionReason::MixedPerformance)
        );
    }

    #[test]
    fn test_policy_promotes_consistent_window() {
        let policy = ConsistencyPolicy::default();
        let entries = [entry_at(Level::C1), entry_at(Level::C1), entry_at(Level::C2)];
        let window: Vec<&AuditHistoryEntry> = entries.iter().collect();
        assert_eq!(
            policy.evaluate(Level::B2, &window),
            PromotionDecision::Promote(Level::C1)
        );
    }

    #[test]
    fn test_promotion_fires_on_third_consistent_audit() {
        let engine = LevelingEngine::new();
        engine.init_user("maria", Level::B2);

        let first = engine.record_audit("maria", &result_at(Level::C1));
        assert_eq!(first.promotion.reason, PromotionReason::InsufficientHistory);
        let second = engine.record_audit("maria", &result_at(Level::C1));
        assert_eq!(second.promotion.reason, PromotionReason::InsufficientHistory);

        let third = engine.record_audit("maria", &result_at(Level::C1));
        assert!(third.promotion.triggered());
        let notification = third.promotion.notification.unwrap();
        assert_eq!(notification.from_level, Level::B2);
        assert_eq!(notification.to_level, Level::C1);
        assert_eq!(notification.unlocked_delta, vec![4]);
        assert!(notification.is_pending());
    }

    #[test]
    fn test_no_duplicate_pending_notification() {
        let engine = LevelingEngine::new();
        engine.init_user("maria", Level::B2);
        for _ in 0..3 {
            engine.record_audit("maria", &result_at(Level::C1));
        }

        let fourth = engine.record_audit("maria", &result_at(Level::C1));
        assert_eq!(fourth.promotion.reason, PromotionReason::PromotionPending);
        assert!(fourth.promotion.notification.is_none());
        assert_eq!(engine.notifications("maria").len(), 1);
    }

    #[test]
    fn test_acceptance_advances_level_and_rejects_repeat() {
        let engine = LevelingEngine::new();
        engine.init_user("maria", Level::B2);
        let mut notification_id = String::new();
        for _ in 0..3 {
            let outcome = engine.record_audit("maria", &result_at(Level::C1));
            if let Some(n) = outcome.promotion.notification {
                notification_id = n.id;
            }
        }

        let accepted = engine.accept_level_up("maria", &notification_id).unwrap();
        assert_eq!(accepted.old_level, Level::B2);
        assert_eq!(accepted.new_level, Level::C1);
        assert_eq!(accepted.unlocked_units, vec![1, 2, 3, 4]);
        assert_eq!(accepted.newly_unlocked, vec![4]);
        assert_eq!(engine.status("maria").registered_level, Level::C1);

        match engine.accept_level_up("maria", &notification_id) {
            Err(LevelingError::AlreadyAccepted { id }) => assert_eq!(id, notification_id),
            other => panic!("expected AlreadyAccepted, got {:?}", other),
        }
    }

    #[test]
    fn test_accept_unknown_notification_fails() {
        let engine = LevelingEngine::new();
        engine.init_user("maria", Level::B1);
        let missing = engine.accept_level_up("maria", "levelup_maria_0");
        assert!(matches!(
            missing,
            Err(LevelingError::NotificationNotFound { .. })
        ));

        // Unknown user fails the same way
        let ghost = engine.accept_level_up("ghost", "levelup_ghost_0");
        assert!(matches!(
            ghost,
            Err(LevelingError::NotificationNotFound { .. })
        ));
    }

    #[test]
    fn test_status_progress_counts_qualifying_audits() {
        let engine = LevelingEngine::new();
        engine.init_user("maria", Level::B2);

        let status = engine.status("maria");
        assert_eq!(status.progress.status, ProgressStatus::NoAudits);
        assert_eq!(status.progress.percentage, 0);

        engine.record_audit("maria", &result_at(Level::B2));
        engine.record_audit("maria", &result_at(Level::C1));
        let status = engine.status("maria");
        assert_eq!(status.progress.status, ProgressStatus::InProgress);
        assert_eq!(status.progress.qualifying_audits, 1);
        assert_eq!(status.progress.percentage, 33);
        assert_eq!(status.progress.target_level, Some(Level::C1));

        engine.record_audit("maria", &result_at(Level::C1));
        engine.record_audit("maria", &result_at(Level::C1));
        let status = engine.status("maria");
        assert_eq!(status.progress.status, ProgressStatus::ReadyForLevelUp);
        assert_eq!(status.progress.percentage, 100);
        assert!(status.has_level_up_available);
    }

    #[test]
    fn test_status_at_max_level() {
        let engine = LevelingEngine::new();
        engine.init_user("vip", Level::C2);
        let status = engine.status("vip");
        assert_eq!(status.progress.status, ProgressStatus::MaxLevelReached);
        assert_eq!(status.progress.percentage, 100);
        assert_eq!(status.progress.target_level, None);
        assert_eq!(status.unlocked_units, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_c2_user_never_promotes() {
        let engine = LevelingEngine::new();
        engine.init_user("vip", Level::C2);
        for _ in 0..3 {
            let outcome = engine.record_audit("vip", &result_at(Level::C2));
            assert!(!outcome.promotion.triggered());
        }
    }

    #[test]
    fn test_history_is_newest_first_and_limited() {
        let engine = LevelingEngine::new();
        engine.record_audit("maria", &result_at(Level::B1));
        engine.record_audit("maria", &result_at(Level::B2));
        engine.record_audit("maria", &result_at(Level::C1));

        let history = engine.history("maria", 2);
        let levels: Vec<Level> = history.iter().map(|e| e.detected_level).collect();
        assert_eq!(levels, vec![Level::C1, Level::B2]);

        assert!(engine.history("ghost", 5).is_empty());
    }

    #[test]
    fn test_has_access_follows_registered_level() {
        let engine = LevelingEngine::new();
        engine.init_user("maria", Level::B2);
        assert!(engine.has_access("maria", 3));
        assert!(!engine.has_access("maria", 4));
        // Unknown users read as the default level
        assert!(engine.has_access("ghost", 1));
        assert!(!engine.has_access("ghost", 3));
    }

    #[test]
    fn test_reset_user_drops_everything() {
        let engine = LevelingEngine::new();
        engine.record_audit("maria", &result_at(Level::B2));
        assert!(engine.reset_user("maria"));
        assert!(!engine.reset_user("maria"));
        assert_eq!(engine.history("maria", 10).len(), 0);
    }

    #[test]
    fn test_stats_aggregate_across_users() {
        let engine = LevelingEngine::new();
        engine.init_user("a", Level::B1);
        engine.init_user("b", Level::B2);
        engine.record_audit("a", &result_at(Level::B2));
        let mut notification_id = String::new();
        for _ in 0..3 {
            let outcome = engine.record_audit("b", &result_at(Level::C1));
            if let Some(n) = outcome.promotion.notification {
                notification_id = n.id;
            }
        }

        let stats = engine.stats();
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.total_audits, 4);
        assert_eq!(stats.pending_level_ups, 1);
        assert_eq!(stats.total_level_ups, 0);
        assert_eq!(stats.level_distribution.get(&Level::B1), Some(&1));
        assert_eq!(stats.level_distribution.get(&Level::B2), Some(&1));

        engine.accept_level_up("b", &notification_id).unwrap();
        let stats = engine.stats();
        assert_eq!(stats.total_level_ups, 1);
        assert_eq!(stats.pending_level_ups, 0);
        assert_eq!(stats.level_distribution.get(&Level::C1), Some(&1));
        assert_eq!(stats.level_distribution.get(&Level::B2), None);
    }
}
