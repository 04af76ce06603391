//! Gamified stats for Chairside.
//!
//! This module turns a profile's activity log and reviews into points, a
//! level, streaks, badges and an average rating. Everything here is a pure
//! function of its inputs and an explicit as-of date; nothing reads the
//! clock.
//!
//! The calendar, goal and leaderboard views read the same activity data the
//! engine does.

pub mod badges;
pub mod calendar;
pub mod engine;
pub mod goals;
pub mod leaderboard;
pub mod levels;
pub mod rating;
pub mod streaks;

pub use badges::{
    category_counts, default_catalog, evaluate as evaluate_badges, Badge, BadgeDefinition,
    BadgeFacts, BadgeKind, BadgeRule,
};
pub use calendar::{activities_on, contribution_calendar, CalendarCell, ContributionCalendar};
pub use engine::{compute_stats, ProfileStats, StatsEngine, StatsReport};
pub use goals::{weekly_goal_progress, GoalProgress};
pub use leaderboard::{
    rank_by, summarize_profiles, LeaderboardEntry, LeaderboardKey, ProfileSummary,
};
pub use levels::{default_levels, level_for_points, next_level_for_points, LevelTier, NextLevel};
pub use rating::average_rating;
pub use streaks::{active_days, current_streak, longest_streak, StreakSummary};
