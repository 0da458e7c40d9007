//! Aggregate figures over a whole record store.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub total_items: usize,
    /// Items whose correct rate is above the "poor" threshold
    pub items_learned: usize,
    /// Attempt-weighted; 0 without attempts
    pub average_correct_rate: f64,
    /// Attempt-weighted; 0 without attempts
    pub average_response_time_ms: f64,
    pub total_study_time_ms: u64,
    pub total_attempts: u64,
    pub total_correct: u64,
}
