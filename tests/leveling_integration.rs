//! Integration tests for the adaptive leveling flow
//!
//! Full path: audited text → recorded history → promotion check →
//! notification → acceptance → unlocked content

use pretty_assertions::assert_eq;

use fluentops::core::{LevelingEngine, LinguisticAuditor};
use fluentops::types::{AuditResult, Level, LevelingError, ProgressStatus, PromotionReason};
use fluentops::{HISTORY_CAP, PROMOTION_WINDOW};

/// Audits consistently as C1: two C1 verbs, ownership, no hesitation
const C1_RESPONSE: &str = "We will mitigate the outage and diagnose the root cause \
    before the next deployment window opens tomorrow morning for everyone.";

/// Audits as B1: hesitation marker, B1 verb, vague wording
const B1_RESPONSE: &str = "um, we can fix it maybe";

fn audit(text: &str) -> AuditResult {
    LinguisticAuditor::new().audit(text)
}

/// Test three consistent above-level audits trigger a level-up offer
#[test]
fn test_three_consistent_audits_trigger_level_up() {
    let engine = LevelingEngine::new();
    engine.init_user("maria", Level::B2);

    for _ in 0..2 {
        let result = audit(C1_RESPONSE);
        assert_eq!(result.detected_level, Level::C1);
        let outcome = engine.record_audit("maria", &result);
        assert_eq!(outcome.promotion.reason, PromotionReason::InsufficientHistory);
        assert!(outcome.promotion.notification.is_none());
    }

    let outcome = engine.record_audit("maria", &audit(C1_RESPONSE));
    assert_eq!(outcome.entry_count, 3);
    assert!(outcome.promotion.triggered());

    let notification = outcome.promotion.notification.expect("offer on third audit");
    assert_eq!(notification.from_level, Level::B2);
    assert_eq!(notification.to_level, Level::C1);
    assert_eq!(notification.unlocked_delta, vec![4]);
    assert!(notification.is_pending());
}

/// Test a second offer is not created while one is pending
#[test]
fn test_pending_offer_suppresses_duplicates() {
    let engine = LevelingEngine::new();
    engine.init_user("maria", Level::B2);

    for _ in 0..PROMOTION_WINDOW {
        engine.record_audit("maria", &audit(C1_RESPONSE));
    }
    let outcome = engine.record_audit("maria", &audit(C1_RESPONSE));

    assert_eq!(outcome.promotion.reason, PromotionReason::PromotionPending);
    assert_eq!(engine.notifications("maria").len(), 1);
}

/// Test accepting the offer changes the level and unlocks content
#[test]
fn test_accept_unlocks_content() {
    let engine = LevelingEngine::new();
    engine.init_user("maria", Level::B2);
    for _ in 0..PROMOTION_WINDOW {
        engine.record_audit("maria", &audit(C1_RESPONSE));
    }
    let notification = &engine.notifications("maria")[0];
    assert!(!engine.has_access("maria", 4));

    let accepted = engine
        .accept_level_up("maria", &notification.id)
        .expect("pending offer accepts");

    assert_eq!(accepted.old_level, Level::B2);
    assert_eq!(accepted.new_level, Level::C1);
    assert_eq!(accepted.newly_unlocked, vec![4]);
    assert_eq!(accepted.unlocked_units, vec![1, 2, 3, 4]);
    assert!(engine.has_access("maria", 4));

    let status = engine.status("maria");
    assert_eq!(status.registered_level, Level::C1);
    assert!(!status.has_level_up_available);
}

/// Test performance merely at the registered level does not promote again
#[test]
fn test_at_level_performance_does_not_promote() {
    let engine = LevelingEngine::new();
    engine.init_user("maria", Level::B2);
    for _ in 0..PROMOTION_WINDOW {
        engine.record_audit("maria", &audit(C1_RESPONSE));
    }
    let id = engine.notifications("maria")[0].id.clone();
    engine.accept_level_up("maria", &id).unwrap();

    // Window is still all C1, which no longer exceeds the registered C1
    let outcome = engine.record_audit("maria", &audit(C1_RESPONSE));
    assert_eq!(outcome.promotion.reason, PromotionReason::MixedPerformance);
}

/// Test accepting the same offer twice is rejected
#[test]
fn test_double_accept_rejected() {
    let engine = LevelingEngine::new();
    engine.init_user("maria", Level::B2);
    for _ in 0..PROMOTION_WINDOW {
        engine.record_audit("maria", &audit(C1_RESPONSE));
    }
    let id = engine.notifications("maria")[0].id.clone();
    engine.accept_level_up("maria", &id).unwrap();

    match engine.accept_level_up("maria", &id) {
        Err(LevelingError::AlreadyAccepted { id: rejected }) => assert_eq!(rejected, id),
        other => panic!("expected AlreadyAccepted, got {:?}", other),
    }
}

/// Test unknown notification ids and unknown users both report not-found
#[test]
fn test_unknown_notification_not_found() {
    let engine = LevelingEngine::new();
    engine.init_user("maria", Level::B2);

    assert!(matches!(
        engine.accept_level_up("maria", "levelup_maria_0"),
        Err(LevelingError::NotificationNotFound { .. })
    ));
    assert!(matches!(
        engine.accept_level_up("ghost", "levelup_ghost_0"),
        Err(LevelingError::NotificationNotFound { .. })
    ));
}

/// Test a mixed recent window blocks promotion
#[test]
fn test_mixed_window_blocks_promotion() {
    let engine = LevelingEngine::new();
    engine.init_user("lee", Level::B2);

    engine.record_audit("lee", &audit(C1_RESPONSE));
    engine.record_audit("lee", &audit(C1_RESPONSE));
    let outcome = engine.record_audit("lee", &audit(B1_RESPONSE));

    assert_eq!(outcome.promotion.reason, PromotionReason::MixedPerformance);
    assert!(engine.notifications("lee").is_empty());

    let status = engine.status("lee");
    assert!(!status.has_level_up_available);
    assert_eq!(status.progress.qualifying_audits, 2);
    assert_eq!(status.progress.percentage, 67);
}

/// Test an unseen user is auto-registered at B1 on first record
#[test]
fn test_auto_init_starts_at_b1() {
    let engine = LevelingEngine::new();

    engine.record_audit("sam", &audit(C1_RESPONSE));
    assert_eq!(engine.status("sam").registered_level, Level::B1);

    engine.record_audit("sam", &audit(C1_RESPONSE));
    let outcome = engine.record_audit("sam", &audit(C1_RESPONSE));

    let notification = outcome.promotion.notification.expect("B1 -> C1 offer");
    assert_eq!(notification.from_level, Level::B1);
    assert_eq!(notification.to_level, Level::C1);
    assert_eq!(notification.unlocked_delta, vec![3, 4]);
}

/// Test progress reporting walks no_audits → in_progress → ready
#[test]
fn test_progress_reporting() {
    let engine = LevelingEngine::new();
    let status = engine.init_user("pat", Level::B2);

    assert_eq!(status.progress.status, ProgressStatus::NoAudits);
    assert_eq!(status.progress.percentage, 0);
    assert!(status.progress.message.contains("Complete 3"));

    engine.record_audit("pat", &audit(C1_RESPONSE));
    let progress = engine.status("pat").progress;
    assert_eq!(progress.status, ProgressStatus::InProgress);
    assert_eq!(progress.qualifying_audits, 1);
    assert_eq!(progress.required_audits, PROMOTION_WINDOW);
    assert_eq!(progress.percentage, 33);
    assert_eq!(progress.target_level, Some(Level::C1));
    assert!(progress.message.contains("Keep going"));

    engine.record_audit("pat", &audit(C1_RESPONSE));
    engine.record_audit("pat", &audit(C1_RESPONSE));
    let status = engine.status("pat");
    assert_eq!(status.progress.status, ProgressStatus::ReadyForLevelUp);
    assert_eq!(status.progress.percentage, 100);
    assert!(status.has_level_up_available);
}

/// Test C2 users are reported at the ceiling and never promoted
#[test]
fn test_max_level_has_no_next_step() {
    let engine = LevelingEngine::new();
    engine.init_user("vera", Level::C2);

    let progress = engine.status("vera").progress;
    assert_eq!(progress.status, ProgressStatus::MaxLevelReached);
    assert_eq!(progress.percentage, 100);
    assert_eq!(progress.target_level, None);
    assert!(progress.message.contains("highest"));

    for _ in 0..PROMOTION_WINDOW {
        let outcome = engine.record_audit("vera", &audit(C1_RESPONSE));
        assert!(!outcome.promotion.triggered());
    }
    assert!(engine.notifications("vera").is_empty());
}

/// Test history is capped and returned newest first
#[test]
fn test_history_caps_at_ten() {
    let engine = LevelingEngine::new();
    for _ in 0..15 {
        engine.record_audit("grinder", &audit(B1_RESPONSE));
    }

    let status = engine.status("grinder");
    assert_eq!(status.total_audits, HISTORY_CAP);
    assert_eq!(status.recent_audits.len(), PROMOTION_WINDOW);

    let history = engine.history("grinder", 50);
    assert_eq!(history.len(), HISTORY_CAP);
    assert_eq!(engine.history("grinder", 2).len(), 2);
    assert!(history[0].timestamp >= history[HISTORY_CAP - 1].timestamp);
}

/// Test reset evicts the account and a fresh one starts clean
#[test]
fn test_reset_clears_the_account() {
    let engine = LevelingEngine::new();
    engine.record_audit("temp", &audit(B1_RESPONSE));

    assert!(engine.reset_user("temp"));
    assert!(!engine.reset_user("temp"));
    assert_eq!(engine.status("temp").total_audits, 0);
}

/// Test system stats follow an accepted promotion
#[test]
fn test_stats_follow_a_promotion() {
    let engine = LevelingEngine::new();
    engine.init_user("maria", Level::B2);
    engine.init_user("sam", Level::B1);
    for _ in 0..PROMOTION_WINDOW {
        engine.record_audit("maria", &audit(C1_RESPONSE));
    }

    let before = engine.stats();
    assert_eq!(before.total_users, 2);
    assert_eq!(before.total_audits, PROMOTION_WINDOW);
    assert_eq!(before.total_level_ups, 0);
    assert_eq!(before.pending_level_ups, 1);
    assert_eq!(before.level_distribution.get(&Level::B2), Some(&1));

    let id = engine.notifications("maria")[0].id.clone();
    engine.accept_level_up("maria", &id).unwrap();

    let after = engine.stats();
    assert_eq!(after.total_level_ups, 1);
    assert_eq!(after.pending_level_ups, 0);
    assert_eq!(after.level_distribution.get(&Level::C1), Some(&1));
    assert_eq!(after.level_distribution.get(&Level::B2), None);
}
