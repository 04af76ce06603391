//! Streak computation.
//!
//! A streak is a run of consecutive calendar days that each hold at least
//! one activity. Both streaks are measured inside one bounded window of
//! `window_days` days ending at the as-of date:
//! - current: walk back from as-of, stop at the first inactive day
//!   (an inactive as-of day yields 0)
//! - longest: the longest run anywhere inside the window
//!
//! Activity dated after as-of is outside the window and never counts.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::ActivityRecord;

/// Default streak window: two years of days.
pub const DEFAULT_WINDOW_DAYS: u32 = 730;

/// Current and longest streak, in days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub current: u32,
    pub longest: u32,
}

/// Distinct days holding at least one activity.
pub fn active_days(activities: &[ActivityRecord]) -> BTreeSet<NaiveDate> {
    activities.iter().map(|a| a.date).collect()
}

/// Days of the window, newest first: `as_of`, `as_of - 1`, ...
fn window(as_of: NaiveDate, window_days: u32) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(as_of), |d| d.pred_opt()).take(window_days as usize)
}

/// Consecutive active days ending at `as_of`.
pub fn current_streak(active: &BTreeSet<NaiveDate>, as_of: NaiveDate, window_days: u32) -> u32 {
    window(as_of, window_days)
        .take_while(|day| active.contains(day))
        .count() as u32
}

/// Longest run of active days inside the window.
pub fn longest_streak(active: &BTreeSet<NaiveDate>, as_of: NaiveDate, window_days: u32) -> u32 {
    let mut longest = 0u32;
    let mut running = 0u32;

    for day in window(as_of, window_days) {
        if active.contains(&day) {
            running += 1;
        } else {
            longest = longest.max(running);
            running = 0;
        }
    }

    // A run touching the window edge never hits a reset.
    longest.max(running)
}

/// Compute both streaks for an activity list.
pub fn summarize(activities: &[ActivityRecord], as_of: NaiveDate, window_days: u32) -> StreakSummary {
    if activities.is_empty() {
        return StreakSummary::default();
    }

    let active = active_days(activities);
    StreakSummary {
        current: current_streak(&active, as_of, window_days),
        longest: longest_streak(&active, as_of, window_days),
    }
}
