//! Transient ranking values produced by the scheduler. Never persisted.
use super::LearningRecord;
use serde::{Deserialize, Serialize};

/// A due item with its review priority
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewCandidate {
    pub priority: f64,
    pub hours_since_review: f64,
    #[serde(flatten)]
    pub record: LearningRecord,
}

impl ReviewCandidate {
    pub fn item_id(&self) -> &str {
        &self.record.item_id
    }
}

/// An item the learner keeps getting wrong
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeakItem {
    pub item_id: String,
    pub correct_rate: f64,
    pub total_attempts: u32,
    pub average_response_time_ms: f64,
    pub weakness_score: f64,
}

/// An item the learner reliably answers correctly
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrongItem {
    pub item_id: String,
    pub correct_rate: f64,
    pub total_attempts: u32,
    pub average_response_time_ms: f64,
    pub review_count: u32,
}
