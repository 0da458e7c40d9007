//! Per-item learning history, keyed by item id in a caller-owned [`RecordStore`].
use crate::error::{Result, SchedulerError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from item id to its learning record. Owned by the caller; the scheduler only
/// inserts and updates entries, it never removes them.
pub type RecordStore = BTreeMap<String, LearningRecord>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LearningRecord {
    pub item_id: String,
    pub total_attempts: u32,
    pub correct_attempts: u32,
    pub total_time_spent_ms: u64,
    pub last_review_at: Option<DateTime<Utc>>,
    /// Number of correct answers so far; indexes the forgetting curve
    pub review_count: u32,
    pub correct_rate: f64,
    pub average_response_time_ms: f64,
    /// Catalog weight copied at first encounter
    pub frequency: f64,
    pub first_seen_at: DateTime<Utc>,
}

impl LearningRecord {
    pub fn new(item_id: impl Into<String>, frequency: f64, first_seen_at: DateTime<Utc>) -> Self {
        Self {
            item_id: item_id.into(),
            total_attempts: 0,
            correct_attempts: 0,
            total_time_spent_ms: 0,
            last_review_at: None,
            review_count: 0,
            correct_rate: 0.0,
            average_response_time_ms: 0.0,
            frequency,
            first_seen_at,
        }
    }

    /// Applies one answer. Counts only ever grow.
    pub fn apply_answer(&mut self, correct: bool, latency_ms: u64, now: DateTime<Utc>) {
        self.total_attempts += 1;
        self.total_time_spent_ms += latency_ms;
        self.last_review_at = Some(now);

        if correct {
            self.correct_attempts += 1;
            self.review_count += 1;
        }

        self.refresh_derived();
    }

    fn refresh_derived(&mut self) {
        if self.total_attempts == 0 {
            self.correct_rate = 0.0;
            self.average_response_time_ms = 0.0;
        } else {
            let attempts = self.total_attempts as f64;
            self.correct_rate = self.correct_attempts as f64 / attempts;
            self.average_response_time_ms = self.total_time_spent_ms as f64 / attempts;
        }
    }

    /// Hours elapsed since the last review, `None` if never reviewed.
    pub fn hours_since_review(&self, now: DateTime<Utc>) -> Option<f64> {
        self.last_review_at
            .map(|last| (now - last).num_milliseconds() as f64 / 3_600_000.0)
    }

    /// Checks the counters and derived fields of a record coming from outside the scheduler.
    pub fn validate(&self) -> Result<()> {
        if self.correct_attempts > self.total_attempts {
            return Err(SchedulerError::InvalidInput(format!(
                "record '{}': {} correct out of {} attempts",
                self.item_id, self.correct_attempts, self.total_attempts
            )));
        }
        if !(0.0..=1.0).contains(&self.correct_rate) {
            return Err(SchedulerError::InvalidInput(format!(
                "record '{}': correct rate {} outside [0, 1]",
                self.item_id, self.correct_rate
            )));
        }
        let expected = if self.total_attempts == 0 {
            0.0
        } else {
            self.correct_attempts as f64 / self.total_attempts as f64
        };
        if (expected - self.correct_rate).abs() > 1e-9 {
            return Err(SchedulerError::InvalidInput(format!(
                "record '{}': correct rate {} does not match counts",
                self.item_id, self.correct_rate
            )));
        }
        Ok(())
    }
}
