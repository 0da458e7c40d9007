//! Consecutive-day streak, computed from two timestamps in the learner's time zone.
use chrono::{DateTime, TimeZone};

/// Streak after the learner is active at `now`.
///
/// Same calendar day as the last activity keeps the stored streak (at least 1), the next
/// calendar day extends it, and any other gap (or no previous activity) starts over at 1.
pub fn streak_after_activity<Tz: TimeZone>(
    last_active: Option<&DateTime<Tz>>,
    consecutive_days: u32,
    now: &DateTime<Tz>,
) -> u32 {
    let Some(last_active) = last_active else {
        return 1;
    };

    let days_apart = (now.date_naive() - last_active.date_naive()).num_days();
    match days_apart {
        0 => consecutive_days.max(1),
        1 => consecutive_days + 1,
        _ => 1,
    }
}
