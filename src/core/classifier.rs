//! CEFR classification: weighted scoring over the extracted signals
//!
//! Five subscores on a 0–10 scale are blended with fixed weights, then the
//! composite is bracketed into a level with a fixed per-bracket confidence.

use crate::core::round1;
use crate::types::{Level, LexicalSignals};
use crate::{
    CONFIDENCE_B1, CONFIDENCE_B2, CONFIDENCE_C1, CONFIDENCE_C2, SCORE_THRESHOLD_B2,
    SCORE_THRESHOLD_C1, SCORE_THRESHOLD_C2, VERB_BASE_B1, VERB_BASE_B2, VERB_BASE_C1,
    VERB_BASE_C2, WEIGHT_FALSE_FRIENDS, WEIGHT_HESITATION, WEIGHT_LENGTH, WEIGHT_SOFT_SKILLS,
    WEIGHT_VERB_TIER,
};

/// Maps a bracketed level to a confidence percentage.
///
/// Replaceable so a continuous confidence function can be swapped in without
/// touching the bracket boundaries.
pub trait ConfidencePolicy: Send + Sync {
    fn confidence(&self, level: Level, weighted_score: f64) -> u8;
}

/// Default policy: one fixed constant per bracket, deterministic and
/// explainable
#[derive(Debug, Default)]
pub struct FixedBracketConfidence;

impl ConfidencePolicy for FixedBracketConfidence {
    fn confidence(&self, level: Level, _weighted_score: f64) -> u8 {
        match level {
            Level::C2 => CONFIDENCE_C2,
            Level::C1 => CONFIDENCE_C1,
            Level::B2 => CONFIDENCE_B2,
            Level::B1 => CONFIDENCE_B1,
        }
    }
}

/// The five weighted subscores feeding the composite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub verb_tier: f64,
    pub false_friends: f64,
    pub hesitation: f64,
    pub soft_skills: f64,
    pub length: f64,
}

/// Classification outcome before projection into an audit result
#[derive(Debug, Clone, Copy)]
pub struct Classification {
    pub level: Level,
    pub confidence: u8,
    /// Composite score, rounded to one decimal
    pub weighted_score: f64,
}

/// Bracket an unrounded composite score into a level
pub fn bracket(weighted_score: f64) -> Level {
    if weighted_score >= SCORE_THRESHOLD_C2 {
        Level::C2
    } else if weighted_score >= SCORE_THRESHOLD_C1 {
        Level::C1
    } else if weighted_score >= SCORE_THRESHOLD_B2 {
        Level::B2
    } else {
        Level::B1
    }
}

/// Weighted scorer over extracted signals
pub struct CefrClassifier {
    policy: Box<dyn ConfidencePolicy>,
}

impl Default for CefrClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl CefrClassifier {
    pub fn new() -> Self {
        Self { policy: Box::new(FixedBracketConfidence) }
    }

    pub fn with_policy(policy: Box<dyn ConfidencePolicy>) -> Self {
        Self { policy }
    }

    /// The five subscores for one text
    pub fn subscores(&self, signals: &LexicalSignals, word_count: usize) -> SubScores {
        SubScores {
            verb_tier: verb_subscore(signals.verbs.dominant),
            false_friends: false_friend_subscore(signals.false_friends.len()),
            hesitation: hesitation_subscore(signals.hesitation.ratio),
            soft_skills: signals.soft_skills.score,
            length: length_subscore(word_count),
        }
    }

    /// Blend the subscores and bracket the composite
    pub fn classify(&self, signals: &LexicalSignals, word_count: usize) -> Classification {
        let scores = self.subscores(signals, word_count);
        let weighted = scores.verb_tier * WEIGHT_VERB_TIER
            + scores.false_friends * WEIGHT_FALSE_FRIENDS
            + scores.hesitation * WEIGHT_HESITATION
            + scores.soft_skills * WEIGHT_SOFT_SKILLS
            + scores.length * WEIGHT_LENGTH;

        let level = bracket(weighted);
        Classification {
            level,
            confidence: self.policy.confidence(level, weighted),
            weighted_score: round1(weighted),
        }
    }
}

/// Base value for the dominant verb tier
fn verb_subscore(dominant: Level) -> f64 {
    match dominant {
        Level::C2 => VERB_BASE_C2,
        Level::C1 => VERB_BASE_C1,
        Level::B2 => VERB_BASE_B2,
        Level::B1 => VERB_BASE_B1,
    }
}

/// 10 for a clean text, 6 for one confusion, 3 for two or more
fn false_friend_subscore(hits: usize) -> f64 {
    match hits {
        0 => 10.0,
        1 => 6.0,
        _ => 3.0,
    }
}

/// Bands over the per-100-words ratio
fn hesitation_subscore(ratio: f64) -> f64 {
    if ratio == 0.0 {
        10.0
    } else if ratio < 3.0 {
        7.0
    } else if ratio < 8.0 {
        4.0
    } else {
        2.0
    }
}

/// Longer answers score higher, with diminishing bands
fn length_subscore(word_count: usize) -> f64 {
    if word_count > 40 {
        10.0
    } else if word_count > 25 {
        7.0
    } else if word_count > 15 {
        5.0
    } else {
        3.0
    }
}

// =============================================================================
// TESTS
// =============================================================================
