//! Learning session coordination.
//! Turns answer events into record updates and decides what the learner should do next.

use super::streak::streak_after_activity;
use super::{
    AdviceItem, AdviceKind, LearnerProfile, LearningRecord, LearningSpeed, Recommendation,
    RecordStore, ReviewCandidate, ReviewScheduler, StatisticsSummary,
};
use crate::catalog::ItemCatalog;
use crate::config::SchedulerConfig;
use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Due-review summary for a caller-driven periodic check
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewReminder {
    pub due_count: usize,
    pub preview: Vec<ReviewCandidate>,
}

/// Combines the scheduler with an item catalog.
///
/// Holds no learner state: records, profile and timestamps come in with every call.
pub struct LearningSession<C> {
    scheduler: ReviewScheduler,
    catalog: C,
}

impl<C: ItemCatalog> LearningSession<C> {
    pub fn new(config: SchedulerConfig, catalog: C) -> Self {
        Self {
            scheduler: ReviewScheduler::new(config),
            catalog,
        }
    }

    pub fn scheduler(&self) -> &ReviewScheduler {
        &self.scheduler
    }

    fn config(&self) -> &SchedulerConfig {
        self.scheduler.config()
    }

    /// Records an answer, seeding new records with catalog metadata when available.
    pub fn record_answer(
        &self,
        item_id: &str,
        correct: bool,
        latency_ms: u64,
        records: &mut RecordStore,
        now: DateTime<Utc>,
    ) -> LearningRecord {
        let meta = if records.contains_key(item_id) {
            None
        } else {
            self.catalog.get_meta(item_id)
        };
        self.scheduler
            .record_answer(item_id, correct, latency_ms, records, meta.as_ref(), now)
    }

    pub fn statistics(&self, records: &RecordStore) -> StatisticsSummary {
        self.scheduler.statistics(records)
    }

    /// Due reviews first, then new items from the catalog, else caught up.
    pub fn next_recommendation(&self, records: &RecordStore, now: DateTime<Utc>) -> Recommendation {
        let mut due = self.scheduler.due_for_review(records, now);
        if !due.is_empty() {
            due.truncate(self.config().max_review_items);
            let estimated_minutes = due.len() as u32 * self.config().minutes_per_review_item;
            return Recommendation::Review {
                items: due,
                estimated_minutes,
            };
        }

        // Any id with a record counts as learned, whatever its correct rate
        let learned: HashSet<&str> = records.keys().map(String::as_str).collect();
        let new_items = self
            .catalog
            .list_unlearned_ranked(&learned, self.config().default_learning_count);
        if new_items.is_empty() {
            tracing::debug!(tracked = records.len(), "learner is caught up");
            return Recommendation::CaughtUp;
        }

        let estimated_minutes = new_items.len() as u32 * self.config().minutes_per_new_item;
        Recommendation::New {
            items: new_items,
            estimated_minutes,
        }
    }

    /// How often the caller should run [`Self::review_reminder`]
    pub fn review_check_interval(&self) -> Duration {
        i64::try_from(self.config().review_check_interval_ms)
            .ok()
            .and_then(Duration::try_milliseconds)
            .unwrap_or(Duration::MAX)
    }

    pub fn review_reminder(&self, records: &RecordStore, now: DateTime<Utc>) -> Option<ReviewReminder> {
        let mut due = self.scheduler.due_for_review(records, now);
        if due.is_empty() {
            return None;
        }

        let due_count = due.len();
        due.truncate(self.config().reminder_preview_size);
        tracing::info!(due_count, "reviews are due");
        Some(ReviewReminder {
            due_count,
            preview: due,
        })
    }

    /// Strategy tags first, then the independent threshold checks.
    ///
    /// `now` must be in the learner's time zone for the morning check.
    pub fn advice<Tz: TimeZone>(
        &self,
        stats: &StatisticsSummary,
        streak_days: u32,
        now: &DateTime<Tz>,
    ) -> Vec<AdviceItem> {
        let config = self.config();
        let mut advice: Vec<AdviceItem> = self
            .scheduler
            .recommend_strategies(stats)
            .into_iter()
            .map(AdviceItem::from)
            .collect();

        if stats.average_correct_rate < config.good_correct_rate_threshold {
            advice.push(AdviceItem::new(AdviceKind::LearningStrategy));
        }
        if stats.average_response_time_ms > config.response_time_threshold_ms {
            advice.push(AdviceItem::new(AdviceKind::SpeedImprovement));
        }
        if streak_days >= config.streak_encouragement_days {
            advice.push(AdviceItem::new(AdviceKind::Encouragement));
        }
        if (config.morning_start_hour..=config.morning_end_hour).contains(&now.hour()) {
            advice.push(AdviceItem::new(AdviceKind::TimeAdvice));
        }

        advice
    }

    /// Profile after the learner was active at `now`.
    pub fn update_profile<Tz: TimeZone>(
        &self,
        profile: &LearnerProfile,
        records: &RecordStore,
        now: &DateTime<Tz>,
    ) -> LearnerProfile {
        let config = self.config();
        let stats = self.scheduler.statistics(records);

        let last_active = profile
            .last_active
            .map(|last| last.with_timezone(&now.timezone()));
        let consecutive_days =
            streak_after_activity(last_active.as_ref(), profile.consecutive_days, now);

        let learning_speed = if stats.average_correct_rate > config.excellent_correct_rate_threshold {
            LearningSpeed::Fast
        } else if stats.average_correct_rate < config.poor_correct_rate_threshold {
            LearningSpeed::Slow
        } else {
            LearningSpeed::Normal
        };

        let limit = config.profile_highlight_count;
        LearnerProfile {
            last_active: Some(now.with_timezone(&Utc)),
            consecutive_days,
            total_items_learned: stats.items_learned,
            learning_speed,
            strengths: self
                .scheduler
                .strengths(records, limit)
                .into_iter()
                .map(|s| s.item_id)
                .collect(),
            weaknesses: self
                .scheduler
                .weaknesses(records, limit)
                .into_iter()
                .map(|w| w.item_id)
                .collect(),
        }
    }
}
