//! Output of the "what next" decision.
use super::{ItemMeta, ReviewCandidate};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Review,
    New,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Recommendation {
    Review {
        items: Vec<ReviewCandidate>,
        estimated_minutes: u32,
    },
    New {
        items: Vec<ItemMeta>,
        estimated_minutes: u32,
    },
    /// Nothing due and nothing new left in the catalog
    CaughtUp,
}

impl Recommendation {
    pub fn kind(&self) -> Option<RecommendationKind> {
        match self {
            Recommendation::Review { .. } => Some(RecommendationKind::Review),
            Recommendation::New { .. } => Some(RecommendationKind::New),
            Recommendation::CaughtUp => None,
        }
    }

    pub fn reason_tag(&self) -> &'static str {
        match self {
            Recommendation::Review { .. } => "review_due",
            Recommendation::New { .. } => "high_frequency_new",
            Recommendation::CaughtUp => "caught_up",
        }
    }

    pub fn estimated_minutes(&self) -> u32 {
        match self {
            Recommendation::Review {
                estimated_minutes, ..
            }
            | Recommendation::New {
                estimated_minutes, ..
            } => *estimated_minutes,
            Recommendation::CaughtUp => 0,
        }
    }

    pub fn item_ids(&self) -> Vec<&str> {
        match self {
            Recommendation::Review { items, .. } => items.iter().map(|c| c.item_id()).collect(),
            Recommendation::New { items, .. } => items.iter().map(|m| m.item_id.as_str()).collect(),
            Recommendation::CaughtUp => Vec::new(),
        }
    }

    pub fn is_caught_up(&self) -> bool {
        matches!(self, Recommendation::CaughtUp)
    }
}
