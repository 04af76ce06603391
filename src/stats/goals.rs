//! Weekly goal progress.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::GoalConfig;
use crate::core::{ActivityCategory, ActivityRecord};

/// Progress toward a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub category: ActivityCategory,
    pub count: u32,
    pub target: u32,
    /// Percentage complete, capped at 100.
    pub percent: f64,
}

impl GoalProgress {
    /// Whether the target has been reached.
    pub fn is_complete(&self) -> bool {
        self.count >= self.target
    }
}

/// Count `goal.category` records dated in `[as_of - window_days, as_of]`.
pub fn weekly_goal_progress(
    activities: &[ActivityRecord],
    goal: &GoalConfig,
    as_of: NaiveDate,
) -> GoalProgress {
    let since = as_of
        .checked_sub_days(Days::new(u64::from(goal.window_days)))
        .unwrap_or(NaiveDate::MIN);
    let count = activities
        .iter()
        .filter(|a| a.category == goal.category && a.date >= since && a.date <= as_of)
        .count() as u32;

    let percent = if goal.target == 0 {
        100.0
    } else {
        (f64::from(count) / f64::from(goal.target) * 100.0).min(100.0)
    };

    GoalProgress {
        category: goal.category,
        count,
        target: goal.target,
        percent,
    }
}
