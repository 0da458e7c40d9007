//! Learner profile fields persisted by the caller between sessions.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerProfile {
    pub last_active: Option<DateTime<Utc>>,
    pub consecutive_days: u32,
    pub total_items_learned: usize,
    pub learning_speed: LearningSpeed,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}
