//! Derived metric calculators: sentence complexity, technical density,
//! passive voice, clarity

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::lexicon::{RE_ANY_TECHNICAL_VERB, RE_PASSIVE, RE_TIMELINE, VAGUE_WORD_REGEXES};
use crate::core::round1;
use crate::types::{DerivedMetrics, SentenceComplexity};

lazy_static! {
    static ref RE_SENTENCE_SPLIT: Regex = Regex::new(r"[.!?]+").unwrap();
}

/// Deterministic numeric derivations over one text
#[derive(Debug, Default)]
pub struct MetricCalculator;

impl MetricCalculator {
    pub fn new() -> Self {
        Self
    }

    /// All derived metrics. Sentence complexity reads the raw text so that
    /// terminal punctuation survives; the rest read the lowercased text.
    pub fn derive(&self, raw_text: &str, lower_text: &str, word_count: usize) -> DerivedMetrics {
        DerivedMetrics {
            sentence_complexity: self.sentence_complexity(raw_text),
            technical_density: self.technical_density(lower_text, word_count),
            passive_voice_count: self.passive_voice_count(lower_text),
            clarity_score: self.clarity_score(lower_text),
        }
    }

    /// Average words per sentence bucketed by fixed thresholds:
    /// above 20 complex, above 10 medium, else simple
    pub fn sentence_complexity(&self, text: &str) -> SentenceComplexity {
        let sentences: Vec<&str> = RE_SENTENCE_SPLIT
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if sentences.is_empty() {
            return SentenceComplexity::Simple;
        }

        let total_words: usize = sentences.iter().map(|s| s.split_whitespace().count()).sum();
        let avg = total_words as f64 / sentences.len() as f64;

        if avg > 20.0 {
            SentenceComplexity::Complex
        } else if avg > 10.0 {
            SentenceComplexity::Medium
        } else {
            SentenceComplexity::Simple
        }
    }

    /// Technical verb occurrences per 100 words, one decimal
    pub fn technical_density(&self, text: &str, word_count: usize) -> f64 {
        if word_count == 0 {
            return 0.0;
        }
        let occurrences = RE_ANY_TECHNICAL_VERB.find_iter(text).count();
        round1(occurrences as f64 / word_count as f64 * 100.0)
    }

    /// Auxiliary-plus-participle constructions found
    pub fn passive_voice_count(&self, text: &str) -> usize {
        RE_PASSIVE.find_iter(text).count()
    }

    /// Clarity on the 1–10 scale: start at 10, minus one per vague word
    /// present, minus half per passive construction, plus one for a concrete
    /// timeline, clamped
    pub fn clarity_score(&self, text: &str) -> f64 {
        let mut score = 10.0;

        for (_, regex) in VAGUE_WORD_REGEXES.iter() {
            if regex.is_match(text) {
                score -= 1.0;
            }
        }

        score -= self.passive_voice_count(text) as f64 * 0.5;

        if RE_TIMELINE.is_match(text) {
            score += 1.0;
        }

        round1(score.clamp(1.0, 10.0))
    }
}

// =============================================================================
// TESTS
// =============================================================================
