//! Core modules for FluentOps

pub mod lexicon;
pub mod extractor;
pub mod metrics;
pub mod classifier;
pub mod mistakes;
pub mod vocabulary;
pub mod auditor;
pub mod store;
pub mod leveling;
pub mod api;

pub use extractor::SignalExtractor;
pub use metrics::MetricCalculator;
pub use classifier::{bracket, CefrClassifier, Classification, ConfidencePolicy, FixedBracketConfidence, SubScores};
pub use mistakes::MistakeRanker;
pub use vocabulary::VocabularyAdvisor;
pub use auditor::LinguisticAuditor;
pub use store::{InMemoryStore, UserAccount, UserStateStore};
pub use leveling::{
    AcceptOutcome, ConsistencyPolicy, LevelUpProgress, LevelingEngine, LevelingStatus,
    PromotionCheck, PromotionDecision, PromotionPolicy, RecordOutcome, SystemStats,
};
pub use api::{create_router, run_server};

/// Round to one decimal place
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
