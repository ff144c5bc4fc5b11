//! Core types for FluentOps

mod audit;
mod error;
mod history;
mod level;
mod metrics;
mod notification;
mod reason;
mod signals;
mod unlock;

pub use audit::{AuditResult, Mistake, MistakeKind, Severity, VocabularySuggestion};
pub use error::LevelingError;
pub use history::{AuditHistoryEntry, UserLevelState};
pub use level::Level;
pub use metrics::{DerivedMetrics, SentenceComplexity};
pub use notification::LevelUpNotification;
pub use reason::{ProgressStatus, PromotionReason};
pub use signals::{
    FalseFriendFinding, HesitationProfile, LexicalSignals, SoftSkillProfile, VerbTierProfile,
};
pub use unlock::{
    is_unlocked, newly_unlocked, unit_title, unlocked_for, ContentUnit, CONTENT_CATALOG,
};
