//! Scheduler configuration.
//!
//! Every tunable constant lives in [`SchedulerConfig`], which is passed by value into the
//! scheduler and the learning session. `Default` carries the stock values; JSON overrides
//! may be partial because every field falls back to its default.

use crate::error::{Result, SchedulerError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Longest allowed review checkpoint: 100 years
pub const MAX_REVIEW_POINT_HOURS: f64 = 100.0 * 365.0 * 24.0;

/// Ebbinghaus review checkpoints in hours, paired positionally with retention fractions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgettingCurveConfig {
    pub review_points_hours: Vec<f64>,
    pub retention_rates: Vec<f64>,
}

impl Default for ForgettingCurveConfig {
    fn default() -> Self {
        Self {
            // 1h, 9h, 1 day, 3 days, 1 week, 1 month
            review_points_hours: vec![1.0, 9.0, 24.0, 72.0, 168.0, 720.0],
            retention_rates: vec![0.58, 0.44, 0.36, 0.28, 0.25, 0.21],
        }
    }
}

impl ForgettingCurveConfig {
    /// Checkpoint at `index`, clamped to the last one.
    pub fn checkpoint(&self, index: usize) -> f64 {
        let last = self.review_points_hours.len().saturating_sub(1);
        self.review_points_hours
            .get(index.min(last))
            .copied()
            .unwrap_or(0.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub forgetting_curve: ForgettingCurveConfig,

    pub excellent_correct_rate_threshold: f64,
    pub good_correct_rate_threshold: f64,
    pub poor_correct_rate_threshold: f64,

    /// Divides item frequency before it enters a priority score
    pub frequency_normalization_factor: f64,
    pub error_weight_multiplier: f64,
    /// Cap on the staleness term, in days
    pub max_time_weight: f64,
    pub response_time_threshold_ms: f64,

    /// Highest curve index for excellent items
    pub excellent_max_curve_index: usize,
    /// Highest curve index for good items
    pub good_max_curve_index: usize,

    /// Attempts required before an item shows up as a strength or weakness
    pub analysis_min_attempts: u32,
    pub review_focus_learned_threshold: usize,

    pub default_learning_count: usize,
    pub max_review_items: usize,
    pub minutes_per_review_item: u32,
    pub minutes_per_new_item: u32,
    pub reminder_preview_size: usize,
    pub profile_highlight_count: usize,

    pub streak_encouragement_days: u32,
    pub morning_start_hour: u32,
    pub morning_end_hour: u32,
    /// How often a caller should poll for due reviews
    pub review_check_interval_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            forgetting_curve: ForgettingCurveConfig::default(),
            excellent_correct_rate_threshold: 0.9,
            good_correct_rate_threshold: 0.7,
            poor_correct_rate_threshold: 0.6,
            frequency_normalization_factor: 100_000_000.0,
            error_weight_multiplier: 2.0,
            max_time_weight: 2.0,
            response_time_threshold_ms: 5000.0,
            excellent_max_curve_index: 5,
            good_max_curve_index: 3,
            analysis_min_attempts: 3,
            review_focus_learned_threshold: 50,
            default_learning_count: 10,
            max_review_items: 5,
            minutes_per_review_item: 2,
            minutes_per_new_item: 3,
            reminder_preview_size: 5,
            profile_highlight_count: 5,
            streak_encouragement_days: 7,
            morning_start_hour: 6,
            morning_end_hour: 8,
            review_check_interval_ms: 60 * 60 * 1000,
        }
    }
}

impl SchedulerConfig {
    /// Parses a (possibly partial) JSON config and validates it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SchedulerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&contents)?;
        tracing::info!(path = %path.as_ref().display(), "loaded scheduler config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let curve = &self.forgetting_curve;
        if curve.review_points_hours.is_empty() {
            return Err(SchedulerError::InvalidConfig(
                "forgetting curve has no review points".to_string(),
            ));
        }
        if curve.review_points_hours.len() != curve.retention_rates.len() {
            return Err(SchedulerError::InvalidConfig(format!(
                "{} review points but {} retention rates",
                curve.review_points_hours.len(),
                curve.retention_rates.len()
            )));
        }
        if curve.review_points_hours.iter().any(|h| !h.is_finite())
            || curve.review_points_hours[0] <= 0.0
            || curve.review_points_hours.windows(2).any(|w| w[1] <= w[0])
        {
            return Err(SchedulerError::InvalidConfig(
                "review points must be positive and strictly ascending".to_string(),
            ));
        }
        let longest = curve.review_points_hours[curve.review_points_hours.len() - 1];
        if longest > MAX_REVIEW_POINT_HOURS {
            return Err(SchedulerError::InvalidConfig(format!(
                "review point {longest}h exceeds {MAX_REVIEW_POINT_HOURS}h"
            )));
        }

        let thresholds = [
            ("excellent", self.excellent_correct_rate_threshold),
            ("good", self.good_correct_rate_threshold),
            ("poor", self.poor_correct_rate_threshold),
        ];
        for (name, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(SchedulerError::InvalidConfig(format!(
                    "{name} threshold {value} outside [0, 1]"
                )));
            }
        }

        if self.frequency_normalization_factor <= 0.0 {
            return Err(SchedulerError::InvalidConfig(
                "frequency normalization factor must be positive".to_string(),
            ));
        }
        if self.review_check_interval_ms == 0
            || i64::try_from(self.review_check_interval_ms).is_err()
        {
            return Err(SchedulerError::InvalidConfig(format!(
                "review check interval {}ms out of range",
                self.review_check_interval_ms
            )));
        }
        if self.morning_start_hour > self.morning_end_hour || self.morning_end_hour > 23 {
            return Err(SchedulerError::InvalidConfig(format!(
                "invalid morning window {}..={}",
                self.morning_start_hour, self.morning_end_hour
            )));
        }
        Ok(())
    }
}
