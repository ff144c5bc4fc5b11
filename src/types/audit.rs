//! Audit output types: the classification result and its ranked diagnostics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{
    DerivedMetrics, FalseFriendFinding, HesitationProfile, Level, VerbTierProfile,
};

/// Diagnostic category for a ranked mistake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MistakeKind {
    FalseFriend,
    WeakTechnicalVocabulary,
    ExcessiveHesitation,
    VagueLanguage,
}

impl MistakeKind {
    /// Stable wire code for the kind
    pub fn code(&self) -> &'static str {
        match self {
            MistakeKind::FalseFriend => "false_friend",
            MistakeKind::WeakTechnicalVocabulary => "weak_technical_vocabulary",
            MistakeKind::ExcessiveHesitation => "excessive_hesitation",
            MistakeKind::VagueLanguage => "vague_language",
        }
    }
}

impl fmt::Display for MistakeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Severity attached to a ranked mistake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        };
        write!(f, "{}", label)
    }
}

/// One ranked diagnostic with its remediation advice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mistake {
    pub kind: MistakeKind,
    pub severity: Severity,
    /// What the speaker did wrong
    pub issue: String,
    /// How to correct it
    pub suggestion: String,
    /// Corrective before → after example, where one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// First-match power vocabulary upgrade for the text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularySuggestion {
    /// Everyday word found in the text
    pub basic_word: String,
    /// Executive-register replacement
    pub upgrade_word: String,
    /// Sentence-level example of the upgrade
    pub example: String,
}

/// Complete outcome of auditing one text. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditResult {
    /// CEFR level resolved from the weighted score
    pub detected_level: Level,
    /// Fixed per-bracket confidence, 0 when the input was empty
    pub confidence: u8,
    /// Weighted composite on the 0–10 scale, rounded to one decimal
    pub weighted_score: f64,
    /// Soft-skill score on the 1–10 scale
    pub soft_skill_score: f64,
    /// Technical verbs found per tier
    pub verb_profile: VerbTierProfile,
    /// Confused forms detected, table order
    pub false_friends: Vec<FalseFriendFinding>,
    /// Filler-marker profile
    pub hesitation: HesitationProfile,
    /// Ranked diagnostics, at most three, priority order
    pub mistakes: Vec<Mistake>,
    /// First-match vocabulary upgrade, if any basic word was present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_suggestion: Option<VocabularySuggestion>,
    /// Secondary communication metrics
    pub metrics: DerivedMetrics,
    /// Words in the input text
    pub word_count: usize,
    /// When the audit ran
    pub timestamp: DateTime<Utc>,
}

impl AuditResult {
    /// Result for empty or whitespace-only input: floor level, zero
    /// confidence, neutral signals.
    pub fn insufficient_data() -> Self {
        Self {
            detected_level: Level::B1,
            confidence: 0,
            weighted_score: 0.0,
            soft_skill_score: crate::SOFT_SKILL_BASELINE,
            verb_profile: VerbTierProfile::zero(),
            false_friends: Vec::new(),
            hesitation: HesitationProfile::zero(),
            mistakes: Vec::new(),
            vocabulary_suggestion: None,
            metrics: DerivedMetrics::zero(),
            word_count: 0,
            timestamp: Utc::now(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
