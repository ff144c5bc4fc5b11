//! Mistake ranking: fixed-priority selection of the top diagnostics
//!
//! Priority order is the contract: false friends first, then weak technical
//! vocabulary, excessive hesitation, vague language. Selection stops at the
//! cap and is never re-sorted.

use crate::core::lexicon::RE_VAGUE_MISTAKE;
use crate::types::{LexicalSignals, Level, Mistake, MistakeKind, Severity};
use crate::{HESITATION_MISTAKE_RATIO, MAX_RANKED_MISTAKES};

#[derive(Debug, Default)]
pub struct MistakeRanker;

impl MistakeRanker {
    pub fn new() -> Self {
        Self
    }

    /// Rank diagnostics for one text, at most [`MAX_RANKED_MISTAKES`]
    pub fn rank(&self, signals: &LexicalSignals, text: &str) -> Vec<Mistake> {
        let mut mistakes = Vec::new();

        // Priority 1: false friends, up to two, highest severity
        for finding in signals.false_friends.iter().take(2) {
            mistakes.push(Mistake {
                kind: MistakeKind::FalseFriend,
                severity: Severity::High,
                issue: format!(
                    "\"{}\" is a false friend: {}",
                    finding.incorrect, finding.explanation
                ),
                suggestion: format!("Use \"{}\" instead", finding.correct),
                example: Some(finding.example.clone()),
            });
        }

        // Priority 2: only basic verbs in play
        if signals.verbs.dominant == Level::B1 && mistakes.len() < MAX_RANKED_MISTAKES {
            mistakes.push(Mistake {
                kind: MistakeKind::WeakTechnicalVocabulary,
                severity: Severity::Medium,
                issue: format!(
                    "Using only B1-level verbs: {}",
                    signals.verbs.b1.join(", ")
                ),
                suggestion: "Upgrade to C1/C2 verbs like: mitigate, remediate, orchestrate"
                    .to_string(),
                example: Some("\"fix the issue\" → \"remediate the incident\"".to_string()),
            });
        }

        // Priority 3: heavy filler usage
        if signals.hesitation.ratio > HESITATION_MISTAKE_RATIO
            && mistakes.len() < MAX_RANKED_MISTAKES
        {
            mistakes.push(Mistake {
                kind: MistakeKind::ExcessiveHesitation,
                severity: Severity::Medium,
                issue: format!(
                    "Hesitation ratio: {}% ({} markers)",
                    signals.hesitation.ratio, signals.hesitation.count
                ),
                suggestion: "Practice speaking with confidence. Eliminate filler words like \
                             \"um\", \"like\", \"you know\""
                    .to_string(),
                example: Some(
                    "\"Um, we are, like, working on it\" → \"We are working on it\"".to_string(),
                ),
            });
        }

        // Priority 4: hedging words
        if RE_VAGUE_MISTAKE.is_match(text) && mistakes.len() < MAX_RANKED_MISTAKES {
            mistakes.push(Mistake {
                kind: MistakeKind::VagueLanguage,
                severity: Severity::Low,
                issue: "Using uncertain language (maybe, probably, perhaps)".to_string(),
                suggestion: "Be specific and confident. Provide concrete timelines and actions"
                    .to_string(),
                example: Some(
                    "\"Maybe we can fix it\" → \"We will restore service within 15 minutes\""
                        .to_string(),
                ),
            });
        }

        mistakes.truncate(MAX_RANKED_MISTAKES);
        mistakes
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SignalExtractor;
    use crate::core::lexicon::word_count;

    fn rank(text: &str) -> Vec<Mistake> {
        let signals = SignalExtractor::new().extract(text, word_count(text));
        MistakeRanker::new().rank(&signals, text)
    }

    #[test]
    fn test_false_friends_lead_and_cap_at_two() {
        let text = "i compromise to attend, the exit of the project is near, \
                    eventually we pretend to ship";
        let mistakes = rank(text);
        assert_eq!(mistakes.len(), 3);
        assert_eq!(mistakes[0].kind, MistakeKind::FalseFriend);
        assert_eq!(mistakes[1].kind, MistakeKind::FalseFriend);
        assert_eq!(mistakes[0].severity, Severity::High);
        // Third slot falls through to the next firing priority
        assert_ne!(mistakes[2].kind, MistakeKind::FalseFriend);
    }

    #[test]
    fn test_weak_vocabulary_fires_for_b1_dominant_text() {
        let mistakes = rank("we fix the server and check the logs and update the config \
                             and restart the service again");
        assert_eq!(mistakes[0].kind, MistakeKind::WeakTechnicalVocabulary);
        assert!(mistakes[0].issue.contains("fix"));
        assert!(mistakes[0].issue.contains("check"));
    }

    #[test]
    fn test_hesitation_mistake_requires_high_ratio() {
        // 3 markers in 13 words is above the 5 percent line
        let noisy = "um, we are, like, actually working on the fix for the database server";
        let mistakes = rank(noisy);
        assert!(mistakes.iter().any(|m| m.kind == MistakeKind::ExcessiveHesitation));

        // One marker spread over a long answer stays under it
        let calm_tail = "we fix the server then check logs then update configs then restart \
                         services then test endpoints then make reports then work through the \
                         queue for the remaining hosts in both regions tonight";
        let calm = format!("um, {}", calm_tail);
        let mistakes = rank(&calm);
        assert!(!mistakes.iter().any(|m| m.kind == MistakeKind::ExcessiveHesitation));
    }

    #[test]
    fn test_vague_language_is_lowest_priority() {
        let mistakes = rank("maybe we resolve and deploy it within the hour");
        assert_eq!(mistakes.len(), 1);
        assert_eq!(mistakes[0].kind, MistakeKind::VagueLanguage);
        assert_eq!(mistakes[0].severity, Severity::Low);
    }

    #[test]
    fn test_clean_text_has_no_mistakes() {
        let mistakes = rank("we will remediate the incident and restore service within 15 minutes");
        assert!(mistakes.is_empty());
    }
}
