pub mod catalog;
pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;

pub use catalog::{InMemoryCatalog, ItemCatalog};
pub use config::{ForgettingCurveConfig, SchedulerConfig};
pub use error::{Result, SchedulerError};
pub use models::{
    AdviceItem, LearnerProfile, LearningRecord, LearningSession, Recommendation, RecordStore,
    ReviewCandidate, ReviewScheduler, StatisticsSummary,
};
