//! Lexical signal extraction: four independent signal families per text
//!
//! Pure functions of the lowercased input plus the static tables in
//! [`crate::core::lexicon`]. No side effects.

use crate::core::lexicon::{
    FALSE_FRIEND_REGEXES, HESITATION_REGEXES, RE_ELLIPSIS, SOFT_SKILL_NEGATIVE_REGEXES,
    SOFT_SKILL_POSITIVE_REGEXES, VERB_REGEXES,
};
use crate::core::{round1, round2};
use crate::types::{
    FalseFriendFinding, HesitationProfile, LexicalSignals, SoftSkillProfile, VerbTierProfile,
};
use crate::{SOFT_SKILL_BASELINE, SOFT_SKILL_STEP};

/// Extractor over the static signal tables
#[derive(Debug, Default)]
pub struct SignalExtractor;

impl SignalExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract all four signal families from lowercased text.
    /// `word_count` is the precomputed token count of the same text.
    pub fn extract(&self, text: &str, word_count: usize) -> LexicalSignals {
        LexicalSignals {
            verbs: self.verb_profile(text),
            false_friends: self.false_friends(text),
            hesitation: self.hesitation(text, word_count),
            soft_skills: self.soft_skills(text),
        }
    }

    /// Technical verbs present per tier, inflections included
    pub fn verb_profile(&self, text: &str) -> VerbTierProfile {
        let mut hits: [Vec<String>; 4] = Default::default();
        for (tier, compiled) in VERB_REGEXES.iter() {
            let slot = (tier.rank() - 1) as usize;
            for (verb, regex) in compiled {
                if regex.is_match(text) {
                    hits[slot].push((*verb).to_string());
                }
            }
        }
        let [b1, b2, c1, c2] = hits;
        VerbTierProfile::from_hits(b1, b2, c1, c2)
    }

    /// Confused forms found, table order. Entries with a context heuristic
    /// require it to fire; the rest count on presence alone.
    pub fn false_friends(&self, text: &str) -> Vec<FalseFriendFinding> {
        FALSE_FRIEND_REGEXES
            .iter()
            .filter(|(_, presence, heuristic)| {
                presence.is_match(text)
                    && heuristic.as_ref().map_or(true, |h| h.is_match(text))
            })
            .map(|(entry, _, _)| FalseFriendFinding {
                incorrect: entry.incorrect.to_string(),
                correct: entry.correct.to_string(),
                explanation: entry.explanation.to_string(),
                example: entry.example.to_string(),
            })
            .collect()
    }

    /// Filler markers and terminal-dot runs, as raw occurrences
    pub fn hesitation(&self, text: &str, word_count: usize) -> HesitationProfile {
        let mut count = 0;
        let mut markers_found = Vec::new();
        for (marker, regex) in HESITATION_REGEXES.iter() {
            let occurrences = regex.find_iter(text).count();
            if occurrences > 0 {
                count += occurrences;
                markers_found.push((*marker).to_string());
            }
        }
        // Each run of two-or-more dots counts once
        count += RE_ELLIPSIS.find_iter(text).count();

        let ratio = if word_count > 0 {
            round2(count as f64 / word_count as f64 * 100.0)
        } else {
            0.0
        };
        HesitationProfile { count, ratio, markers_found }
    }

    /// Soft-skill score: baseline 5, one half point per distinct phrase in
    /// either polarity set, clamped to [1, 10]
    pub fn soft_skills(&self, text: &str) -> SoftSkillProfile {
        let mut score = SOFT_SKILL_BASELINE;
        let mut positive_hits = Vec::new();
        let mut negative_hits = Vec::new();

        for (phrase, regex) in SOFT_SKILL_POSITIVE_REGEXES.iter() {
            if regex.is_match(text) {
                score += SOFT_SKILL_STEP;
                positive_hits.push((*phrase).to_string());
            }
        }
        for (phrase, regex) in SOFT_SKILL_NEGATIVE_REGEXES.iter() {
            if regex.is_match(text) {
                score -= SOFT_SKILL_STEP;
                negative_hits.push((*phrase).to_string());
            }
        }

        SoftSkillProfile {
            score: round1(score.clamp(1.0, 10.0)),
            positive_hits,
            negative_hits,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
