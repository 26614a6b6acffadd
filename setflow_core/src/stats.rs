//! Progress aggregation over the logged-set history.
//!
//! Pure functions: given the full log for a user (newest first or not,
//! order does not matter), compute summary statistics on demand. Nothing
//! here is incrementally maintained or stored.

use crate::{LoggedSet, UserStats};
use chrono::{Duration, NaiveDate};
use std::collections::HashSet;

/// Compute aggregate statistics for a user's logged sets
///
/// `today` is the host-local calendar day; passing it in keeps the
/// function pure and the streak boundary testable.
///
/// Streak policy: a missing entry for `today` does not break the streak,
/// because the day is not over yet. The walk anchors at `today` when it
/// has an entry, otherwise at yesterday; any earlier gap ends the streak.
pub fn compute_stats(log: &[LoggedSet], today: NaiveDate) -> UserStats {
    let total_sets = log.len();
    let total_volume = log.iter().map(|s| s.volume()).sum();

    let dates: HashSet<NaiveDate> = log.iter().map(|s| s.date).collect();
    let total_workouts = dates.len();
    let current_streak = streak_ending_at(&dates, today);

    UserStats {
        total_workouts,
        total_volume,
        total_sets,
        current_streak,
    }
}

/// Count consecutive training days walking backward from `today`
fn streak_ending_at(dates: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    if dates.is_empty() {
        return 0;
    }

    // Grace for an unfinished day: the streak may anchor at yesterday
    let anchor = if dates.contains(&today) {
        today
    } else if dates.contains(&(today - Duration::days(1))) {
        today - Duration::days(1)
    } else {
        return 0;
    };

    let mut streak = 0;
    let mut day = anchor;
    while dates.contains(&day) {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}
