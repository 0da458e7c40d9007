//! Advisory tags and their fixed text/icon lookup.
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceKind {
    SlowDown,
    SpeedTraining,
    ReviewFocus,
    LearningStrategy,
    SpeedImprovement,
    Encouragement,
    TimeAdvice,
}

impl AdviceKind {
    pub fn message(self) -> &'static str {
        match self {
            AdviceKind::SlowDown => {
                "Slow down a little. Repeating items helps them stick."
            }
            AdviceKind::SpeedTraining => {
                "Get familiar with how each item looks and sounds first to answer faster."
            }
            AdviceKind::ReviewFocus => {
                "You have learned plenty of items. Focus on reviewing and consolidating them."
            }
            AdviceKind::LearningStrategy => {
                "Take a slower pace. Repeated practice builds lasting memory."
            }
            AdviceKind::SpeedImprovement => {
                "Try recognising each item's shape and sound before answering to speed up."
            }
            AdviceKind::Encouragement => {
                "A whole week of daily practice. Keep the habit going!"
            }
            AdviceKind::TimeAdvice => "Mornings are a great time to learn something new.",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            AdviceKind::SlowDown => "🐌",
            AdviceKind::SpeedTraining => "⚡",
            AdviceKind::ReviewFocus => "📚",
            AdviceKind::LearningStrategy => "\u{1F9D8}\u{200D}\u{2642}\u{FE0F}",
            AdviceKind::SpeedImprovement => "⚡",
            AdviceKind::Encouragement => "🌟",
            AdviceKind::TimeAdvice => "🌅",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvicePriority {
    High,
    Medium,
}

/// Strategy tag emitted by the scheduler from aggregate statistics
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategyRecommendation {
    pub kind: AdviceKind,
    pub message: String,
    pub priority: AdvicePriority,
}

impl StrategyRecommendation {
    pub fn new(kind: AdviceKind, priority: AdvicePriority) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
            priority,
        }
    }
}

/// Session-facing advice entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdviceItem {
    pub kind: AdviceKind,
    pub message: String,
    pub icon: String,
    pub priority: Option<AdvicePriority>,
}

impl AdviceItem {
    pub fn new(kind: AdviceKind) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
            icon: kind.icon().to_string(),
            priority: None,
        }
    }
}

impl From<StrategyRecommendation> for AdviceItem {
    fn from(strategy: StrategyRecommendation) -> Self {
        Self {
            kind: strategy.kind,
            message: format!("Tip: {}", strategy.message),
            icon: strategy.kind.icon().to_string(),
            priority: Some(strategy.priority),
        }
    }
}
