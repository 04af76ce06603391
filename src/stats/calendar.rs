//! Contribution calendar.
//!
//! Buckets the same activity data the engine consumes into one cell per
//! day, about a year back, laid out in whole Sunday-to-Saturday weeks.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::ActivityRecord;

/// Days shown before the final Saturday.
pub const CALENDAR_SPAN_DAYS: i64 = 370;

/// One day of the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// Summed effort level of the day's records.
    pub effort: u32,
    /// Number of records on the day.
    pub count: usize,
    /// Color tier 0-4.
    pub intensity: u8,
}

/// Calendar of cells from a Sunday to the Saturday ending the as-of week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionCalendar {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub cells: Vec<CalendarCell>,
}

impl ContributionCalendar {
    /// Records inside the calendar range.
    pub fn total_contributions(&self) -> usize {
        self.cells.iter().map(|c| c.count).sum()
    }

    /// Cells grouped into Sunday-first weeks.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(7)
    }
}

/// Map a day's summed effort to a color tier.
pub fn intensity(effort: u32) -> u8 {
    match effort {
        0 => 0,
        1..=2 => 1,
        3..=5 => 2,
        6..=8 => 3,
        _ => 4,
    }
}

/// The Saturday closing the week that holds `date`.
pub fn week_end(date: NaiveDate) -> NaiveDate {
    let to_saturday = 6 - date.weekday().num_days_from_sunday();
    date + Duration::days(i64::from(to_saturday))
}

/// Build the calendar ending with the week of `as_of`.
pub fn contribution_calendar(
    activities: &[ActivityRecord],
    as_of: NaiveDate,
) -> ContributionCalendar {
    let end = week_end(as_of);
    let start = end - Duration::days(CALENDAR_SPAN_DAYS);

    let mut buckets: BTreeMap<NaiveDate, (u32, usize)> = BTreeMap::new();
    for activity in activities {
        if activity.date < start || activity.date > end {
            continue;
        }
        let bucket = buckets.entry(activity.date).or_insert((0, 0));
        bucket.0 += u32::from(activity.effort_level.get());
        bucket.1 += 1;
    }

    let cells = start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|date| {
            let (effort, count) = buckets.get(&date).copied().unwrap_or((0, 0));
            CalendarCell {
                date,
                effort,
                count,
                intensity: intensity(effort),
            }
        })
        .collect();

    ContributionCalendar { start, end, cells }
}

/// Records logged on one day, in input order.
pub fn activities_on(activities: &[ActivityRecord], date: NaiveDate) -> Vec<&ActivityRecord> {
    activities.iter().filter(|a| a.date == date).collect()
}
