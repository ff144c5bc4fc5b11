//! The audit pipeline: raw text in, one complete [`AuditResult`] out

use chrono::Utc;
use tracing::debug;

use crate::core::classifier::{CefrClassifier, ConfidencePolicy};
use crate::core::lexicon::word_count;
use crate::core::{MetricCalculator, MistakeRanker, SignalExtractor, VocabularyAdvisor};
use crate::types::AuditResult;

/// Stateless auditor wiring extractor, metrics, classifier, ranker and
/// advisor together. Cheap to share behind an `Arc`.
pub struct LinguisticAuditor {
    extractor: SignalExtractor,
    metrics: MetricCalculator,
    classifier: CefrClassifier,
    ranker: MistakeRanker,
    advisor: VocabularyAdvisor,
}

impl Default for LinguisticAuditor {
    fn default() -> Self {
        Self::new()
    }
}

impl LinguisticAuditor {
    pub fn new() -> Self {
        Self {
            extractor: SignalExtractor::new(),
            metrics: MetricCalculator::new(),
            classifier: CefrClassifier::new(),
            ranker: MistakeRanker::new(),
            advisor: VocabularyAdvisor::new(),
        }
    }

    /// Auditor with a replacement confidence function
    pub fn with_confidence_policy(policy: Box<dyn ConfidencePolicy>) -> Self {
        Self {
            classifier: CefrClassifier::with_policy(policy),
            ..Self::new()
        }
    }

    /// Audit one response. Matching runs over the lowercased text; sentence
    /// complexity reads the raw text for its punctuation.
    pub fn audit(&self, text: &str) -> AuditResult {
        let lower = text.to_lowercase();
        let words = word_count(&lower);

        if words == 0 {
            debug!("Audit skipped: no words in input");
            return AuditResult::insufficient_data();
        }

        let signals = self.extractor.extract(&lower, words);
        let classification = self.classifier.classify(&signals, words);
        let mistakes = self.ranker.rank(&signals, &lower);
        let vocabulary_suggestion = self.advisor.suggest(&lower);
        let metrics = self.metrics.derive(text, &lower, words);

        debug!(
            "Audit complete: {} at {}% confidence, score {} over {} words",
            classification.level, classification.confidence, classification.weighted_score, words
        );

        AuditResult {
            detected_level: classification.level,
            confidence: classification.confidence,
            weighted_score: classification.weighted_score,
            soft_skill_score: signals.soft_skills.score,
            verb_profile: signals.verbs,
            false_friends: signals.false_friends,
            hesitation: signals.hesitation,
            mistakes,
            vocabulary_suggestion,
            metrics,
            word_count: words,
            timestamp: Utc::now(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Level, MistakeKind, SentenceComplexity};

    #[test]
    fn test_executive_answer_reaches_c2() {
        let text = "We are currently triaging the incident and will remediate the root cause. \
                    Our team will leverage the standby cluster, and I am confident we can \
                    restore service within 30 minutes. Specifically, the rollback is \
                    orchestrated and monitored by our platform team.";
        let result = LinguisticAuditor::new().audit(text);

        assert_eq!(result.detected_level, Level::C2);
        assert_eq!(result.confidence, 90);
        assert_eq!(result.verb_profile.dominant, Level::C2);
        assert!(result.false_friends.is_empty());
        assert_eq!(result.hesitation.count, 0);
        assert!(result.weighted_score >= 8.5);
    }

    #[test]
    fn test_hesitant_basic_answer_stays_low() {
        let text = "Um, maybe we can fix the thing... you know, probably the server is, \
                    like, broken";
        let result = LinguisticAuditor::new().audit(text);

        assert_eq!(result.detected_level, Level::B1);
        assert_eq!(result.confidence, 75);
        assert_eq!(result.verb_profile.dominant, Level::B1);
        assert!(result.hesitation.count >= 3);
        assert!(!result.mistakes.is_empty());
    }

    #[test]
    fn test_empty_input_yields_insufficient_data() {
        let result = LinguisticAuditor::new().audit("   \t\n");
        assert_eq!(result.detected_level, Level::B1);
        assert_eq!(result.confidence, 0);
        assert_eq!(result.word_count, 0);
        assert_eq!(result.metrics.sentence_complexity, SentenceComplexity::Simple);
    }

    #[test]
    fn test_punctuation_only_input_yields_insufficient_data() {
        let result = LinguisticAuditor::new().audit("... !!! ???");
        assert_eq!(result.confidence, 0);
        assert_eq!(result.word_count, 0);
    }

    #[test]
    fn test_false_friend_flows_into_mistakes() {
        let text = "The actual status is that we will realize the change tomorrow";
        let result = LinguisticAuditor::new().audit(text);

        assert_eq!(result.false_friends.len(), 2);
        assert_eq!(result.mistakes[0].kind, MistakeKind::FalseFriend);
        assert!(result.mistakes[0].example.is_some());
    }

    #[test]
    fn test_vocabulary_suggestion_first_match() {
        let result = LinguisticAuditor::new().audit("We have a problem and an issue");
        let suggestion = result.vocabulary_suggestion.unwrap();
        assert_eq!(suggestion.basic_word, "problem");
        assert_eq!(suggestion.upgrade_word, "bottleneck");
    }

    #[test]
    fn test_word_count_and_density_are_consistent() {
        let result = LinguisticAuditor::new().audit("We deploy and monitor the service.");
        assert_eq!(result.word_count, 6);
        // Two technical verbs in six words
        assert_eq!(result.metrics.technical_density, 33.3);
    }
}
