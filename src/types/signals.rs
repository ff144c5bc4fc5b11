//! Signal structures produced by the lexical extractor

use serde::{Deserialize, Serialize};
use crate::types::Level;
use crate::TIER_DOMINANCE_MIN_HITS;

/// Technical verbs found per CEFR tier, with the resolved dominant tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerbTierProfile {
    /// B1 tier verbs present in the text
    pub b1: Vec<String>,
    /// B2 tier verbs present in the text
    pub b2: Vec<String>,
    /// C1 tier verbs present in the text
    pub c1: Vec<String>,
    /// C2 tier verbs present in the text
    pub c2: Vec<String>,
    /// Dominant tier: C2 from one hit, C1/B2 from two, B1 otherwise
    pub dominant: Level,
}

impl VerbTierProfile {
    /// Build a profile from per-tier hit lists, resolving dominance by the
    /// fixed priority C2 > C1(≥2) > B2(≥2) > B1.
    pub fn from_hits(b1: Vec<String>, b2: Vec<String>, c1: Vec<String>, c2: Vec<String>) -> Self {
        let dominant = if !c2.is_empty() {
            Level::C2
        } else if c1.len() >= TIER_DOMINANCE_MIN_HITS {
            Level::C1
        } else if b2.len() >= TIER_DOMINANCE_MIN_HITS {
            Level::B2
        } else {
            Level::B1
        };
        Self { b1, b2, c1, c2, dominant }
    }

    /// Empty profile (B1-dominant by default)
    pub fn zero() -> Self {
        Self::from_hits(Vec::new(), Vec::new(), Vec::new(), Vec::new())
    }

    /// Verbs found for one tier
    pub fn hits(&self, tier: Level) -> &[String] {
        match tier {
            Level::B1 => &self.b1,
            Level::B2 => &self.b2,
            Level::C1 => &self.c1,
            Level::C2 => &self.c2,
        }
    }

    /// Hit counts per tier, lowest tier first
    pub fn tier_counts(&self) -> [(Level, usize); 4] {
        [
            (Level::B1, self.b1.len()),
            (Level::B2, self.b2.len()),
            (Level::C1, self.c1.len()),
            (Level::C2, self.c2.len()),
        ]
    }

    /// Total distinct verbs matched across all tiers
    pub fn total_hits(&self) -> usize {
        self.b1.len() + self.b2.len() + self.c1.len() + self.c2.len()
    }
}

/// One confused-form detection with its correction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FalseFriendFinding {
    /// The form as written
    pub incorrect: String,
    /// What the writer most likely meant
    pub correct: String,
    /// Why the form is wrong for this meaning
    pub explanation: String,
    /// Corrective before → after example
    pub example: String,
}

/// Filler-marker profile for the text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HesitationProfile {
    /// Raw marker occurrences, ellipsis runs included
    pub count: usize,
    /// Markers per 100 words, rounded to two decimals
    pub ratio: f64,
    /// Distinct markers present, table order
    pub markers_found: Vec<String>,
}

impl HesitationProfile {
    /// No hesitation detected
    pub fn zero() -> Self {
        Self { count: 0, ratio: 0.0, markers_found: Vec::new() }
    }
}

/// Soft-skill indicator profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftSkillProfile {
    /// Score on the 1–10 scale (baseline 5, ±0.5 per distinct indicator)
    pub score: f64,
    /// Distinct positive phrases present
    pub positive_hits: Vec<String>,
    /// Distinct negative phrases present
    pub negative_hits: Vec<String>,
}

impl SoftSkillProfile {
    /// Neutral profile at the baseline score
    pub fn neutral() -> Self {
        Self {
            score: crate::SOFT_SKILL_BASELINE,
            positive_hits: Vec::new(),
            negative_hits: Vec::new(),
        }
    }
}

/// All four signal families extracted from one text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexicalSignals {
    pub verbs: VerbTierProfile,
    pub false_friends: Vec<FalseFriendFinding>,
    pub hesitation: HesitationProfile,
    pub soft_skills: SoftSkillProfile,
}

impl LexicalSignals {
    /// Signals for empty input
    pub fn zero() -> Self {
        Self {
            verbs: VerbTierProfile::zero(),
            false_friends: Vec::new(),
            hesitation: HesitationProfile::zero(),
            soft_skills: SoftSkillProfile::neutral(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
