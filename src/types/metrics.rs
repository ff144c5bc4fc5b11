//! Derived communication metrics

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse sentence complexity from average sentence length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentenceComplexity {
    /// Average sentence at most 10 words
    Simple,
    /// Average sentence between 11 and 20 words
    Medium,
    /// Average sentence above 20 words
    Complex,
}

impl fmt::Display for SentenceComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SentenceComplexity::Simple => "simple",
            SentenceComplexity::Medium => "medium",
            SentenceComplexity::Complex => "complex",
        };
        write!(f, "{}", label)
    }
}

/// Secondary metrics computed alongside the classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Complexity bucket from average sentence length
    pub sentence_complexity: SentenceComplexity,
    /// Technical verb matches per 100 words, rounded to one decimal
    pub technical_density: f64,
    /// Passive voice constructions found
    pub passive_voice_count: usize,
    /// Clarity score on the 1–10 scale
    pub clarity_score: f64,
}

impl DerivedMetrics {
    /// Metrics for empty input
    pub fn zero() -> Self {
        Self {
            sentence_complexity: SentenceComplexity::Simple,
            technical_density: 0.0,
            passive_voice_count: 0,
            clarity_score: 10.0,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
