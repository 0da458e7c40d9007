//! Forgetting-curve review scheduler.
//!
//! Decides when an item needs reviewing and how urgently, based on its accumulated record:
//! - Items answered correctly at least 90% of the time walk the full curve
//!   (1h → 9h → 1 day → 3 days → 1 week → 1 month), one step per correct answer
//! - Items at 70-90% only walk the first four checkpoints (up to 3 days)
//! - Anything weaker is re-checked after the shortest interval
//!
//! Due items are ranked by a priority mixing item value (frequency), error history and
//! staleness. Everything here is a pure function of the records, the config and `now`.

use super::{
    AdviceKind, AdvicePriority, ItemMeta, LearningRecord, RecordStore, ReviewCandidate,
    StatisticsSummary, StrategyRecommendation, StrongItem, WeakItem,
};
use crate::config::SchedulerConfig;
use chrono::{DateTime, Duration, Utc};

#[derive(Clone, Debug, Default)]
pub struct ReviewScheduler {
    config: SchedulerConfig,
}

impl ReviewScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Hours that must pass after the last review before the item is due again.
    pub fn required_interval_hours(&self, record: &LearningRecord) -> f64 {
        let curve = &self.config.forgetting_curve;
        let review_count = record.review_count as usize;

        if record.correct_rate >= self.config.excellent_correct_rate_threshold {
            curve.checkpoint(review_count.min(self.config.excellent_max_curve_index))
        } else if record.correct_rate >= self.config.good_correct_rate_threshold {
            curve.checkpoint(review_count.min(self.config.good_max_curve_index))
        } else {
            curve.checkpoint(0)
        }
    }

    pub fn is_due(&self, record: &LearningRecord, hours_since_review: f64) -> bool {
        hours_since_review >= self.required_interval_hours(record)
    }

    /// priority = value term + error term + capped staleness term
    pub fn priority(&self, record: &LearningRecord, hours_since_review: f64) -> f64 {
        let frequency_weight = record.frequency / self.config.frequency_normalization_factor;
        let error_weight = (1.0 - record.correct_rate) * self.config.error_weight_multiplier;
        let time_weight = (hours_since_review / 24.0).min(self.config.max_time_weight);

        frequency_weight + error_weight + time_weight
    }

    /// Items due at `now`, highest priority first. Ties keep store iteration order.
    pub fn due_for_review(&self, records: &RecordStore, now: DateTime<Utc>) -> Vec<ReviewCandidate> {
        let mut due: Vec<ReviewCandidate> = records
            .values()
            .filter_map(|record| {
                let hours = record.hours_since_review(now)?;
                self.is_due(record, hours).then(|| ReviewCandidate {
                    priority: self.priority(record, hours),
                    hours_since_review: hours,
                    record: record.clone(),
                })
            })
            .collect();

        due.sort_by(|a, b| b.priority.total_cmp(&a.priority));

        tracing::debug!(
            tracked = records.len(),
            due = due.len(),
            "computed due reviews"
        );
        due
    }

    /// When the item next becomes due; `None` if it was never reviewed or the date is
    /// out of range.
    pub fn next_review_at(&self, record: &LearningRecord) -> Option<DateTime<Utc>> {
        let last = record.last_review_at?;
        let interval_ms = (self.required_interval_hours(record) * 3_600_000.0).round();
        if !interval_ms.is_finite() || interval_ms.abs() >= i64::MAX as f64 {
            return None;
        }
        let interval = Duration::try_milliseconds(interval_ms as i64)?;
        last.checked_add_signed(interval)
    }

    /// Curve retention for the elapsed time since the last review.
    pub fn retention_at(&self, record: &LearningRecord, now: DateTime<Utc>) -> Option<f64> {
        let hours = record.hours_since_review(now)?;
        let curve = &self.config.forgetting_curve;

        let retention = curve
            .review_points_hours
            .iter()
            .zip(&curve.retention_rates)
            .take_while(|&(&point, _)| point <= hours)
            .last()
            .map(|(_, &rate)| rate)
            .unwrap_or(1.0);
        Some(retention)
    }

    /// Records one answer, creating the record on first sight.
    ///
    /// `meta` seeds the static frequency of a new record; it is ignored for existing ones.
    pub fn record_answer(
        &self,
        item_id: &str,
        correct: bool,
        latency_ms: u64,
        records: &mut RecordStore,
        meta: Option<&ItemMeta>,
        now: DateTime<Utc>,
    ) -> LearningRecord {
        let record = records.entry(item_id.to_string()).or_insert_with(|| {
            let frequency = meta.map(|m| m.frequency).unwrap_or(0.0);
            LearningRecord::new(item_id, frequency, now)
        });

        record.apply_answer(correct, latency_ms, now);

        tracing::debug!(
            item_id,
            correct,
            latency_ms,
            attempts = record.total_attempts,
            correct_rate = record.correct_rate,
            "recorded answer"
        );
        record.clone()
    }

    pub fn statistics(&self, records: &RecordStore) -> StatisticsSummary {
        let mut total_attempts: u64 = 0;
        let mut total_correct: u64 = 0;
        let mut total_time: u64 = 0;
        let mut items_learned = 0;

        for record in records.values() {
            total_attempts += u64::from(record.total_attempts);
            total_correct += u64::from(record.correct_attempts);
            total_time += record.total_time_spent_ms;
            if record.correct_rate > self.config.poor_correct_rate_threshold {
                items_learned += 1;
            }
        }

        let (average_correct_rate, average_response_time_ms) = if total_attempts > 0 {
            (
                total_correct as f64 / total_attempts as f64,
                total_time as f64 / total_attempts as f64,
            )
        } else {
            (0.0, 0.0)
        };

        StatisticsSummary {
            total_items: records.len(),
            items_learned,
            average_correct_rate,
            average_response_time_ms,
            total_study_time_ms: total_time,
            total_attempts,
            total_correct,
        }
    }

    pub fn weakness_score(&self, record: &LearningRecord) -> f64 {
        let error_rate = 1.0 - record.correct_rate;
        let attempt_weight = (record.total_attempts as f64 / 10.0).min(1.0);
        let frequency_weight = record.frequency / self.config.frequency_normalization_factor;
        let slow_weight =
            if record.average_response_time_ms > self.config.response_time_threshold_ms {
                1.0
            } else {
                0.0
            };

        error_rate * 2.0 + attempt_weight + frequency_weight + slow_weight
    }

    /// Poorly answered items with enough attempts, highest weakness score first.
    pub fn weaknesses(&self, records: &RecordStore, limit: usize) -> Vec<WeakItem> {
        let mut weak: Vec<WeakItem> = records
            .values()
            .filter(|r| {
                r.correct_rate < self.config.good_correct_rate_threshold
                    && r.total_attempts >= self.config.analysis_min_attempts
            })
            .map(|r| WeakItem {
                item_id: r.item_id.clone(),
                correct_rate: r.correct_rate,
                total_attempts: r.total_attempts,
                average_response_time_ms: r.average_response_time_ms,
                weakness_score: self.weakness_score(r),
            })
            .collect();

        weak.sort_by(|a, b| b.weakness_score.total_cmp(&a.weakness_score));
        weak.truncate(limit);
        weak
    }

    /// Reliably answered items with enough attempts, best correct rate first.
    pub fn strengths(&self, records: &RecordStore, limit: usize) -> Vec<StrongItem> {
        let mut strong: Vec<StrongItem> = records
            .values()
            .filter(|r| {
                r.correct_rate >= self.config.excellent_correct_rate_threshold
                    && r.total_attempts >= self.config.analysis_min_attempts
            })
            .map(|r| StrongItem {
                item_id: r.item_id.clone(),
                correct_rate: r.correct_rate,
                total_attempts: r.total_attempts,
                average_response_time_ms: r.average_response_time_ms,
                review_count: r.review_count,
            })
            .collect();

        strong.sort_by(|a, b| b.correct_rate.total_cmp(&a.correct_rate));
        strong.truncate(limit);
        strong
    }

    /// All strategy tags that fire for these statistics, in a fixed order.
    pub fn recommend_strategies(&self, stats: &StatisticsSummary) -> Vec<StrategyRecommendation> {
        let mut strategies = Vec::new();

        if stats.average_correct_rate < self.config.good_correct_rate_threshold {
            strategies.push(StrategyRecommendation::new(
                AdviceKind::SlowDown,
                AdvicePriority::High,
            ));
        }
        if stats.average_response_time_ms > self.config.response_time_threshold_ms {
            strategies.push(StrategyRecommendation::new(
                AdviceKind::SpeedTraining,
                AdvicePriority::Medium,
            ));
        }
        if stats.items_learned >= self.config.review_focus_learned_threshold {
            strategies.push(StrategyRecommendation::new(
                AdviceKind::ReviewFocus,
                AdvicePriority::Medium,
            ));
        }

        strategies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn hours_ago(hours: f64) -> DateTime<Utc> {
        now() - Duration::milliseconds((hours * 3_600_000.0).round() as i64)
    }

    fn record(id: &str, correct: u32, total: u32, review_count: u32, last: DateTime<Utc>) -> LearningRecord {
        let mut record = LearningRecord::new(id, 0.0, last);
        record.total_attempts = total;
        record.correct_attempts = correct;
        record.correct_rate = if total == 0 { 0.0 } else { correct as f64 / total as f64 };
        record.review_count = review_count;
        record.last_review_at = Some(last);
        record
    }

    fn store(records: Vec<LearningRecord>) -> RecordStore {
        records
            .into_iter()
            .map(|r| (r.item_id.clone(), r))
            .collect()
    }

    #[test]
    fn test_interval_tiers() {
        let scheduler = ReviewScheduler::default();

        // 19/20 = 0.95, full curve clamped at index 5
        let excellent = record("a", 19, 20, 9, now());
        assert_eq!(scheduler.required_interval_hours(&excellent), 720.0);

        // 8/10 = 0.8, compressed curve clamped at index 3
        let good = record("b", 8, 10, 8, now());
        assert_eq!(scheduler.required_interval_hours(&good), 72.0);

        let good_early = record("c", 8, 10, 1, now());
        assert_eq!(scheduler.required_interval_hours(&good_early), 9.0);

        let poor = record("d", 1, 10, 1, now());
        assert_eq!(scheduler.required_interval_hours(&poor), 1.0);
    }

    #[test]
    fn test_due_exactly_at_checkpoint() {
        let scheduler = ReviewScheduler::default();
        let checkpoint = scheduler.config().forgetting_curve.checkpoint(2);

        // 19/20 = 0.95 with review_count 2
        let records = store(vec![record("a", 19, 20, 2, hours_ago(checkpoint))]);
        let due = scheduler.due_for_review(&records, now());
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].item_id(), "a");
    }

    #[test]
    fn test_not_due_just_before_checkpoint() {
        let scheduler = ReviewScheduler::default();
        let checkpoint = scheduler.config().forgetting_curve.checkpoint(2);

        let records = store(vec![record("a", 19, 20, 2, hours_ago(checkpoint - 0.01))]);
        assert!(scheduler.due_for_review(&records, now()).is_empty());
    }

    #[test]
    fn test_never_reviewed_is_skipped() {
        let scheduler = ReviewScheduler::default();
        let mut fresh = LearningRecord::new("a", 100.0, now() - Duration::days(30));
        fresh.total_attempts = 0;
        let records = store(vec![fresh]);
        assert!(scheduler.due_for_review(&records, now()).is_empty());
    }

    #[test]
    fn test_lower_correct_rate_ranks_higher() {
        let scheduler = ReviewScheduler::default();
        let last = hours_ago(5.0);
        let records = store(vec![record("a", 5, 10, 1, last), record("b", 2, 10, 1, last)]);

        let due = scheduler.due_for_review(&records, now());
        assert_eq!(due.len(), 2);
        assert_eq!(due[0].item_id(), "b");
        assert!(due[0].priority >= due[1].priority);
    }

    #[test]
    fn test_equal_priority_keeps_store_order() {
        let scheduler = ReviewScheduler::default();
        let last = hours_ago(2.0);
        let records = store(vec![record("x", 0, 3, 0, last), record("y", 0, 3, 0, last)]);

        let due = scheduler.due_for_review(&records, now());
        let ids: Vec<&str> = due.iter().map(|c| c.item_id()).collect();
        assert_eq!(ids, vec!["x", "y"]);
    }

    #[test]
    fn test_priority_components() {
        let scheduler = ReviewScheduler::default();
        let mut r = record("a", 1, 2, 1, now());
        r.frequency = 50_000_000.0;

        // 0.5 + 0.5 * 2 + 12/24
        let priority = scheduler.priority(&r, 12.0);
        assert!((priority - 2.0).abs() < 1e-9);

        // staleness capped at 2 days
        let stale = scheduler.priority(&r, 24.0 * 100.0);
        assert!((stale - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_due_query_is_pure() {
        let scheduler = ReviewScheduler::default();
        let records = store(vec![
            record("a", 1, 4, 1, hours_ago(3.0)),
            record("b", 9, 10, 0, hours_ago(30.0)),
            record("c", 10, 10, 4, hours_ago(10.0)),
        ]);
        let before = records.clone();

        let first = scheduler.due_for_review(&records, now());
        let second = scheduler.due_for_review(&records, now());
        assert_eq!(first, second);
        assert_eq!(records, before);
        assert_eq!(
            scheduler.statistics(&records),
            scheduler.statistics(&records)
        );
    }

    #[test]
    fn test_record_answer_first_correct() {
        let scheduler = ReviewScheduler::default();
        let mut records = RecordStore::new();
        let meta = ItemMeta {
            item_id: "A".to_string(),
            frequency: 5000.0,
            rank: 1,
        };

        let updated = scheduler.record_answer("A", true, 1200, &mut records, Some(&meta), now());
        assert_eq!(updated.total_attempts, 1);
        assert_eq!(updated.correct_attempts, 1);
        assert_eq!(updated.correct_rate, 1.0);
        assert_eq!(updated.review_count, 1);
        assert_eq!(updated.average_response_time_ms, 1200.0);
        assert_eq!(updated.frequency, 5000.0);
        assert_eq!(updated.first_seen_at, now());
        assert_eq!(records.get("A"), Some(&updated));
    }

    #[test]
    fn test_record_answer_without_meta_defaults_frequency() {
        let scheduler = ReviewScheduler::default();
        let mut records = RecordStore::new();
        let updated = scheduler.record_answer("Z", false, 800, &mut records, None, now());
        assert_eq!(updated.frequency, 0.0);
    }

    #[test]
    fn test_frequency_is_immutable_after_creation() {
        let scheduler = ReviewScheduler::default();
        let mut records = RecordStore::new();
        let first = ItemMeta {
            item_id: "A".to_string(),
            frequency: 10.0,
            rank: 1,
        };
        let second = ItemMeta {
            frequency: 99.0,
            ..first.clone()
        };

        scheduler.record_answer("A", true, 100, &mut records, Some(&first), now());
        let later = now() + Duration::hours(1);
        let updated = scheduler.record_answer("A", true, 100, &mut records, Some(&second), later);
        assert_eq!(updated.frequency, 10.0);
        assert_eq!(updated.first_seen_at, now());
        assert_eq!(updated.last_review_at, Some(later));
    }

    #[test]
    fn test_three_wrong_answers_become_weakness() {
        let scheduler = ReviewScheduler::default();
        let mut records = RecordStore::new();

        for attempt in 0..3 {
            let weak = scheduler.weaknesses(&records, 10);
            assert!(weak.is_empty(), "no weakness after {attempt} attempts");
            scheduler.record_answer("B", false, 2000, &mut records, None, now());
        }

        let record = &records["B"];
        assert_eq!(record.total_attempts, 3);
        assert_eq!(record.correct_attempts, 0);
        assert_eq!(record.correct_rate, 0.0);

        let weak = scheduler.weaknesses(&records, 10);
        assert_eq!(weak.len(), 1);
        assert_eq!(weak[0].item_id, "B");
        // 1 * 2 + 0.3 + 0 + 0
        assert!((weak[0].weakness_score - 2.3).abs() < 1e-9);
    }

    #[test]
    fn test_weakness_score_slow_answers() {
        let scheduler = ReviewScheduler::default();
        let mut r = record("a", 1, 20, 1, now());
        r.average_response_time_ms = 6000.0;
        // 0.95 * 2 + 1 + 0 + 1
        assert!((scheduler.weakness_score(&r) - 3.9).abs() < 1e-9);
    }

    #[test]
    fn test_weaknesses_ranked_and_limited() {
        let scheduler = ReviewScheduler::default();
        let records = store(vec![
            record("a", 2, 4, 2, now()),
            record("b", 0, 4, 0, now()),
            record("c", 1, 4, 1, now()),
            record("d", 1, 2, 1, now()),
        ]);

        let weak = scheduler.weaknesses(&records, 2);
        let ids: Vec<&str> = weak.iter().map(|w| w.item_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_strengths_ranked_and_filtered() {
        let scheduler = ReviewScheduler::default();
        let records = store(vec![
            record("a", 9, 10, 9, now()),
            record("b", 5, 5, 5, now()),
            record("c", 2, 2, 2, now()),
            record("d", 7, 10, 7, now()),
        ]);

        let strong = scheduler.strengths(&records, 10);
        let ids: Vec<&str> = strong.iter().map(|s| s.item_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_statistics() {
        let scheduler = ReviewScheduler::default();
        let mut a = record("a", 3, 4, 3, now());
        a.total_time_spent_ms = 4000;
        let mut b = record("b", 1, 4, 1, now());
        b.total_time_spent_ms = 12000;
        let records = store(vec![a, b]);

        let stats = scheduler.statistics(&records);
        assert_eq!(stats.total_items, 2);
        assert_eq!(stats.items_learned, 1);
        assert_eq!(stats.total_attempts, 8);
        assert_eq!(stats.total_correct, 4);
        assert_eq!(stats.average_correct_rate, 0.5);
        assert_eq!(stats.average_response_time_ms, 2000.0);
        assert_eq!(stats.total_study_time_ms, 16000);
    }

    #[test]
    fn test_statistics_empty_store() {
        let scheduler = ReviewScheduler::default();
        let stats = scheduler.statistics(&RecordStore::new());
        assert_eq!(stats, StatisticsSummary::default());
    }

    #[test]
    fn test_strategies_all_fire() {
        let scheduler = ReviewScheduler::default();
        let stats = StatisticsSummary {
            items_learned: 50,
            average_correct_rate: 0.5,
            average_response_time_ms: 6000.0,
            ..Default::default()
        };

        let kinds: Vec<AdviceKind> = scheduler
            .recommend_strategies(&stats)
            .into_iter()
            .map(|s| s.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                AdviceKind::SlowDown,
                AdviceKind::SpeedTraining,
                AdviceKind::ReviewFocus
            ]
        );
    }

    #[test]
    fn test_strategies_none_fire() {
        let scheduler = ReviewScheduler::default();
        let stats = StatisticsSummary {
            items_learned: 49,
            average_correct_rate: 0.7,
            average_response_time_ms: 5000.0,
            ..Default::default()
        };
        assert!(scheduler.recommend_strategies(&stats).is_empty());
    }

    #[test]
    fn test_next_review_at() {
        let scheduler = ReviewScheduler::default();
        let last = now();
        let r = record("a", 10, 10, 1, last);
        assert_eq!(scheduler.next_review_at(&r), Some(last + Duration::hours(9)));

        let mut fresh = LearningRecord::new("b", 0.0, now());
        fresh.last_review_at = None;
        assert!(scheduler.next_review_at(&fresh).is_none());
    }

    #[test]
    fn test_next_review_at_out_of_range() {
        let mut config = SchedulerConfig::default();
        config.forgetting_curve = crate::config::ForgettingCurveConfig {
            review_points_hours: vec![1e10],
            retention_rates: vec![0.5],
        };
        let scheduler = ReviewScheduler::new(config);
        let mut records = RecordStore::new();
        let updated = scheduler.record_answer("a", true, 1000, &mut records, None, now());

        assert!(scheduler.due_for_review(&records, now()).is_empty());
        assert!(scheduler.next_review_at(&updated).is_none());

        let mut huge = SchedulerConfig::default();
        huge.forgetting_curve.review_points_hours = vec![f64::MAX];
        huge.forgetting_curve.retention_rates = vec![0.5];
        assert!(ReviewScheduler::new(huge).next_review_at(&updated).is_none());
    }

    #[test]
    fn test_retention_at() {
        let scheduler = ReviewScheduler::default();
        let r = record("a", 1, 1, 1, hours_ago(30.0));
        assert_eq!(scheduler.retention_at(&r, now()), Some(0.36));

        let recent = record("b", 1, 1, 1, hours_ago(0.5));
        assert_eq!(scheduler.retention_at(&recent, now()), Some(1.0));
    }
}
