pub mod advice;
pub mod item_meta;
pub mod learning_record;
pub mod learning_session;
pub mod profile;
pub mod recommendation;
pub mod review_candidate;
pub mod review_scheduler;
pub mod statistics;
pub mod streak;

pub use advice::{AdviceItem, AdviceKind, AdvicePriority, StrategyRecommendation};
pub use item_meta::ItemMeta;
pub use learning_record::{LearningRecord, RecordStore};
pub use learning_session::{LearningSession, ReviewReminder};
pub use profile::{LearnerProfile, LearningSpeed};
pub use recommendation::{Recommendation, RecommendationKind};
pub use review_candidate::{ReviewCandidate, StrongItem, WeakItem};
pub use review_scheduler::ReviewScheduler;
pub use statistics::StatisticsSummary;
pub use streak::streak_after_activity;
