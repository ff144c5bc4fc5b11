//! FluentOps: CEFR proficiency auditing and adaptive leveling
//!
//! Pipeline: text → signal extraction → weighted classification → AuditResult
//! → history recording → level-up detection → content unlock

pub mod core;
pub mod types;

// =============================================================================
// CLASSIFIER WEIGHTS - weighted sum over five subscores (sum = 1.0)
// =============================================================================

/// Technical verb tier subscore weight
pub const WEIGHT_VERB_TIER: f64 = 0.35;

/// False friend subscore weight
pub const WEIGHT_FALSE_FRIENDS: f64 = 0.25;

/// Hesitation subscore weight
pub const WEIGHT_HESITATION: f64 = 0.20;

/// Soft skill subscore weight
pub const WEIGHT_SOFT_SKILLS: f64 = 0.10;

/// Response length subscore weight
pub const WEIGHT_LENGTH: f64 = 0.10;

// =============================================================================
// LEVEL BRACKETS - weighted score thresholds and fixed confidence per bracket
// =============================================================================

/// Weighted score at or above this classifies C2
pub const SCORE_THRESHOLD_C2: f64 = 8.5;

/// Weighted score at or above this classifies C1
pub const SCORE_THRESHOLD_C1: f64 = 7.0;

/// Weighted score at or above this classifies B2
pub const SCORE_THRESHOLD_B2: f64 = 5.5;

/// Fixed confidence percentage per bracket
pub const CONFIDENCE_C2: u8 = 90;
pub const CONFIDENCE_C1: u8 = 85;
pub const CONFIDENCE_B2: u8 = 80;
pub const CONFIDENCE_B1: u8 = 75;

// =============================================================================
// VERB TIER BASE VALUES - dominant tier → subscore
// =============================================================================

pub const VERB_BASE_C2: f64 = 10.0;
pub const VERB_BASE_C1: f64 = 8.0;
pub const VERB_BASE_B2: f64 = 6.0;
pub const VERB_BASE_B1: f64 = 4.0;

/// Minimum distinct hits for C1/B2 tier dominance (one C2 hit dominates outright)
pub const TIER_DOMINANCE_MIN_HITS: usize = 2;

// =============================================================================
// SOFT SKILLS
// =============================================================================

/// Soft skill score baseline before indicator adjustments
pub const SOFT_SKILL_BASELINE: f64 = 5.0;

/// Adjustment per distinct indicator phrase (positive adds, negative subtracts)
pub const SOFT_SKILL_STEP: f64 = 0.5;

// =============================================================================
// LEVELING
// =============================================================================

/// Maximum retained audit history entries per user (oldest evicted first)
pub const HISTORY_CAP: usize = 10;

/// Number of most recent audits evaluated for promotion
pub const PROMOTION_WINDOW: usize = 3;

/// Hesitation ratio above which the mistake ranker reports excessive hesitation
pub const HESITATION_MISTAKE_RATIO: f64 = 5.0;

/// Ranked diagnostics reported per audit
pub const MAX_RANKED_MISTAKES: usize = 3;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
