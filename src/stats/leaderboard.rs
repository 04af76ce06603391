//! Leaderboards over many profiles.
//!
//! Each profile is run through the engine once; boards are then plain sorts
//! of the resulting stats. Sorting is stable, so ties keep input order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::engine::{ProfileStats, StatsEngine};
use crate::core::ProfileRecord;

/// Sort key of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardKey {
    Points,
    LongestStreak,
}

impl LeaderboardKey {
    /// Board title.
    pub fn title(&self) -> &'static str {
        match self {
            LeaderboardKey::Points => "Top by Total Points",
            LeaderboardKey::LongestStreak => "Longest Contribution Streak",
        }
    }

    /// Unit label for values on this board.
    pub fn unit(&self) -> &'static str {
        match self {
            LeaderboardKey::Points => "points",
            LeaderboardKey::LongestStreak => "days",
        }
    }

    /// Extract the sort value from stats.
    pub fn value(&self, stats: &ProfileStats) -> u64 {
        match self {
            LeaderboardKey::Points => stats.points,
            LeaderboardKey::LongestStreak => u64::from(stats.longest_streak),
        }
    }
}

/// A profile with its computed stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub profile_id: String,
    pub name: String,
    pub stats: ProfileStats,
}

/// One row of a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// 1-based position.
    pub rank: usize,
    pub profile_id: String,
    pub name: String,
    pub value: u64,
}

/// Compute stats for every profile.
pub fn summarize_profiles(
    engine: &StatsEngine,
    profiles: &[ProfileRecord],
    as_of: NaiveDate,
) -> Vec<ProfileSummary> {
    profiles
        .iter()
        .map(|profile| ProfileSummary {
            profile_id: profile.id.clone(),
            name: profile.name.clone(),
            stats: engine
                .compute(&profile.activities, &profile.reviews, as_of)
                .stats,
        })
        .collect()
}

/// Rank summaries by `key`, highest first, keeping at most `limit` rows.
pub fn rank_by(
    summaries: &[ProfileSummary],
    key: LeaderboardKey,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    let mut ordered: Vec<&ProfileSummary> = summaries.iter().collect();
    ordered.sort_by(|a, b| key.value(&b.stats).cmp(&key.value(&a.stats)));

    ordered
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, summary)| LeaderboardEntry {
            rank: i + 1,
            profile_id: summary.profile_id.clone(),
            name: summary.name.clone(),
            value: key.value(&summary.stats),
        })
        .collect()
}
