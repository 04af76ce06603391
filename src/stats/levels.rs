//! Level progression for Chairside.
//!
//! Levels are a monotonic step function of cumulative points. The table is
//! an ordered list of `(min_points, level, name)` tiers; a professional sits
//! at the last tier whose threshold does not exceed their points. Adding or
//! retuning tiers never changes the lookup.

use serde::{Deserialize, Serialize};

use crate::error::{ChairsideError, Result};

/// One tier of the level table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTier {
    /// Level number shown to users.
    pub level: u32,
    /// Level title.
    pub name: String,
    /// Points needed to reach this tier.
    pub min_points: u64,
}

impl LevelTier {
    /// Create a new tier.
    pub fn new(level: u32, name: impl Into<String>, min_points: u64) -> Self {
        Self {
            level,
            name: name.into(),
            min_points,
        }
    }
}

/// Default level table.
pub fn default_levels() -> Vec<LevelTier> {
    vec![
        LevelTier::new(1, "New Graduate", 0),
        LevelTier::new(2, "Resident", 500),
        LevelTier::new(3, "Associate Dentist", 1500),
        LevelTier::new(4, "Senior Clinician", 3000),
        LevelTier::new(5, "Practice Leader", 5000),
        LevelTier::new(6, "Master Clinician", 8000),
    ]
}

/// Find the tier for a points total.
///
/// Returns the last tier with `points >= min_points`. When no tier
/// qualifies (a table whose first threshold is above zero), the first tier
/// is returned. `None` only for an empty table.
pub fn level_for_points(tiers: &[LevelTier], points: u64) -> Option<&LevelTier> {
    tiers
        .iter()
        .rev()
        .find(|tier| points >= tier.min_points)
        .or_else(|| tiers.first())
}

/// Find the next tier above a points total, if any.
pub fn next_level_for_points(tiers: &[LevelTier], points: u64) -> Option<&LevelTier> {
    tiers.iter().find(|tier| tier.min_points > points)
}

/// Progress toward the next tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextLevel {
    pub level: u32,
    pub level_name: String,
    pub min_points: u64,
    pub points_remaining: u64,
}

impl NextLevel {
    /// Progress from `points` toward `tier`.
    pub fn toward(tier: &LevelTier, points: u64) -> Self {
        Self {
            level: tier.level,
            level_name: tier.name.clone(),
            min_points: tier.min_points,
            points_remaining: tier.min_points.saturating_sub(points),
        }
    }
}

/// Validate a level table.
///
/// The table must be non-empty with strictly ascending thresholds and level
/// numbers, so that the step function is monotonic.
pub fn validate_levels(tiers: &[LevelTier]) -> Result<()> {
    if tiers.is_empty() {
        return Err(ChairsideError::config("level table is empty"));
    }

    for pair in tiers.windows(2) {
        let (lower, upper) = (&pair[0], &pair[1]);
        if upper.min_points <= lower.min_points {
            return Err(ChairsideError::config(format!(
                "level '{}' threshold {} must be above '{}' threshold {}",
                upper.name, upper.min_points, lower.name, lower.min_points
            )));
        }
        if upper.level <= lower.level {
            return Err(ChairsideError::config(format!(
                "level numbers must ascend ('{}' is {} after '{}' at {})",
                upper.name, upper.level, lower.name, lower.level
            )));
        }
    }

    Ok(())
}
