//! Chairside - stats and achievements for a dental professionals directory
//!
//! Chairside turns a professional's logged activities and patient reviews
//! into points, a level, streaks, an average rating and earned badges. On top
//! of that core it draws a contribution calendar, tracks a weekly goal and
//! ranks a directory of profiles on leaderboards.

pub mod cli;
pub mod config;
pub mod core;
pub mod demo;
pub mod error;
pub mod stats;
pub mod storage;
pub mod util;

pub use config::Config;
pub use core::{
    ActivityCategory, ActivityRecord, EffortLevel, ProfileRecord, ReviewRecord, StatsRequest,
};
pub use error::{ChairsideError, Result};
pub use stats::{
    compute_stats, contribution_calendar, rank_by, weekly_goal_progress, Badge, BadgeDefinition,
    ContributionCalendar, GoalProgress, LeaderboardEntry, LeaderboardKey, ProfileStats,
    StatsEngine, StatsReport,
};
pub use storage::{FileProfileSource, MemoryProfileSource, ProfileSource};

// CLI commands
pub use cli::{
    BadgesCommand, GenerateCommand, GoalsCommand, GraphCommand, InitCommand, LeaderboardCommand,
    StatsCommand,
};
