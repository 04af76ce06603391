//! Configuration loading for Chairside.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. Project config (`.chairside/config.toml`)
//! 3. User config (`~/.chairside/config.toml`)
//! 4. Defaults (lowest priority)
//!
//! All configuration is optional. The level table and badge catalog are
//! ordinary config tables, so thresholds can be retuned without touching the
//! engine.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::ActivityCategory;
use crate::error::{ChairsideError, FailOpen, Result};
use crate::stats::badges::{default_catalog, validate_catalog, BadgeDefinition};
use crate::stats::levels::{default_levels, validate_levels, LevelTier};
use crate::stats::streaks::DEFAULT_WINDOW_DAYS;

/// Name of the per-project and per-user config directory.
pub const CONFIG_DIR_NAME: &str = ".chairside";

/// Main configuration struct for Chairside.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Point scoring and level table.
    pub scoring: ScoringConfig,
    /// Streak window.
    pub streaks: StreakConfig,
    /// Badge catalog.
    pub badges: BadgeConfig,
    /// Weekly goal.
    pub goals: GoalConfig,
    /// Leaderboard display.
    pub leaderboard: LeaderboardConfig,
}

/// Point scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    /// Points awarded per unit of effort level.
    pub points_per_effort_level: u64,
    /// Ascending level table.
    pub levels: Vec<LevelTier>,
}

/// Minimum valid points_per_effort_level.
pub const MIN_POINTS_PER_EFFORT_LEVEL: u64 = 1;

impl ScoringConfig {
    /// Check if a points multiplier is valid (must be >= 1).
    pub fn is_valid_points_per_effort_level(value: u64) -> bool {
        value >= MIN_POINTS_PER_EFFORT_LEVEL
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            points_per_effort_level: 10,
            levels: default_levels(),
        }
    }
}

/// Streak configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StreakConfig {
    /// Days scanned back from the as-of date, for both the current and the
    /// longest streak.
    pub window_days: u32,
}

/// Minimum valid window_days.
pub const MIN_WINDOW_DAYS: u32 = 1;

/// Maximum valid window_days (about a century).
pub const MAX_WINDOW_DAYS: u32 = 36_600;

/// Check if a look-back window is within `MIN_WINDOW_DAYS..=MAX_WINDOW_DAYS`.
pub fn is_valid_window_days(value: u32) -> bool {
    (MIN_WINDOW_DAYS..=MAX_WINDOW_DAYS).contains(&value)
}

impl StreakConfig {
    /// Check if a streak window is valid.
    pub fn is_valid_window_days(value: u32) -> bool {
        is_valid_window_days(value)
    }
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

/// Badge catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BadgeConfig {
    /// Ordered catalog; earned badges are returned in this order.
    pub catalog: Vec<BadgeDefinition>,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
        }
    }
}

/// Weekly goal configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GoalConfig {
    /// Category counted toward the goal.
    pub category: ActivityCategory,
    /// Activities needed to complete the goal.
    pub target: u32,
    /// Look-back in days from the as-of date.
    pub window_days: u32,
}

impl GoalConfig {
    /// Check if a goal target is valid (must be >= 1).
    pub fn is_valid_target(value: u32) -> bool {
        value >= 1
    }
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            category: ActivityCategory::ContinuingEducation,
            target: 3,
            window_days: 7,
        }
    }
}

/// Leaderboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LeaderboardConfig {
    /// Entries shown per board.
    pub limit: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

impl Config {
    /// Load configuration with full precedence chain.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables
    /// 2. Project config (`.chairside/config.toml` in the project root)
    /// 3. User config (`~/.chairside/config.toml`)
    /// 4. Defaults
    pub fn load() -> Self {
        match env::current_dir() {
            Ok(cwd) => Self::load_from_cwd(&cwd),
            Err(_) => {
                let mut config = Config::default();
                if let Some(user_config) = Self::load_user_config() {
                    config = config.merge(user_config);
                }
                config.apply_env_overrides();
                config
            }
        }
    }

    /// Load configuration with a specific working directory.
    pub fn load_from_cwd(cwd: &Path) -> Self {
        let mut config = Config::default();

        if let Some(user_config) = Self::load_user_config() {
            config = config.merge(user_config);
        }

        if let Some(project_config) = Self::load_project_config(cwd) {
            config = config.merge(project_config);
        }

        config.apply_env_overrides();

        tracing::debug!(
            window_days = config.streaks.window_days,
            levels = config.scoring.levels.len(),
            badges = config.badges.catalog.len(),
            "configuration loaded"
        );

        config
    }

    /// Load user config from `~/.chairside/config.toml`.
    fn load_user_config() -> Option<Config> {
        let path = chairside_home()?.join("config.toml");
        Self::load_optional(&path, "loading user config")
    }

    /// Load project config from `.chairside/config.toml` under the project root.
    fn load_project_config(cwd: &Path) -> Option<Config> {
        let path = project_config_dir(cwd).join("config.toml");
        Self::load_optional(&path, "loading project config")
    }

    /// Load a config file that may legitimately be absent.
    ///
    /// A missing file is silent; a present but broken file warns and is
    /// skipped.
    fn load_optional(path: &Path, context: &str) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        Self::load_from_file(path).map(Some).fail_open_default(context)
    }

    /// Load and validate config from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| ChairsideError::storage(path, e))?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ChairsideError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the level table, badge catalog and numeric bounds.
    pub fn validate(&self) -> Result<()> {
        validate_levels(&self.scoring.levels)?;
        validate_catalog(&self.badges.catalog)?;

        if !ScoringConfig::is_valid_points_per_effort_level(self.scoring.points_per_effort_level) {
            return Err(ChairsideError::config(format!(
                "scoring.points_per_effort_level must be >= {}",
                MIN_POINTS_PER_EFFORT_LEVEL
            )));
        }
        if !StreakConfig::is_valid_window_days(self.streaks.window_days) {
            return Err(ChairsideError::config(format!(
                "streaks.window_days must be between {} and {}",
                MIN_WINDOW_DAYS, MAX_WINDOW_DAYS
            )));
        }
        if !is_valid_window_days(self.goals.window_days) {
            return Err(ChairsideError::config(format!(
                "goals.window_days must be between {} and {}",
                MIN_WINDOW_DAYS, MAX_WINDOW_DAYS
            )));
        }
        if !GoalConfig::is_valid_target(self.goals.target) {
            return Err(ChairsideError::config("goals.target must be >= 1"));
        }
        if self.leaderboard.limit == 0 {
            return Err(ChairsideError::config("leaderboard.limit must be >= 1"));
        }

        Ok(())
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // CHAIRSIDE_POINTS_PER_EFFORT
        if let Ok(val) = env::var("CHAIRSIDE_POINTS_PER_EFFORT") {
            match val.parse::<u64>() {
                Ok(n) if ScoringConfig::is_valid_points_per_effort_level(n) => {
                    self.scoring.points_per_effort_level = n;
                }
                _ => tracing::warn!(
                    value = %val,
                    current = self.scoring.points_per_effort_level,
                    "invalid CHAIRSIDE_POINTS_PER_EFFORT, expected an integer >= {}",
                    MIN_POINTS_PER_EFFORT_LEVEL
                ),
            }
        }

        // CHAIRSIDE_STREAK_WINDOW_DAYS
        if let Ok(val) = env::var("CHAIRSIDE_STREAK_WINDOW_DAYS") {
            match val.parse::<u32>() {
                Ok(n) if StreakConfig::is_valid_window_days(n) => {
                    self.streaks.window_days = n;
                }
                _ => tracing::warn!(
                    value = %val,
                    current = self.streaks.window_days,
                    "invalid CHAIRSIDE_STREAK_WINDOW_DAYS, expected an integer in {}..={}",
                    MIN_WINDOW_DAYS,
                    MAX_WINDOW_DAYS
                ),
            }
        }

        // CHAIRSIDE_GOAL_TARGET
        if let Ok(val) = env::var("CHAIRSIDE_GOAL_TARGET") {
            match val.parse::<u32>() {
                Ok(n) if GoalConfig::is_valid_target(n) => self.goals.target = n,
                _ => tracing::warn!(
                    value = %val,
                    current = self.goals.target,
                    "invalid CHAIRSIDE_GOAL_TARGET, expected a positive integer"
                ),
            }
        }

        // CHAIRSIDE_LEADERBOARD_LIMIT
        if let Ok(val) = env::var("CHAIRSIDE_LEADERBOARD_LIMIT") {
            match val.parse::<usize>() {
                Ok(n) if n >= 1 => self.leaderboard.limit = n,
                _ => tracing::warn!(
                    value = %val,
                    current = self.leaderboard.limit,
                    "invalid CHAIRSIDE_LEADERBOARD_LIMIT, expected a positive integer"
                ),
            }
        }
    }

    /// Merge another config into this one.
    ///
    /// The `other` config takes precedence. Every field of `other` that
    /// differs from the default is applied to `self`, so each layer only needs
    /// to spell out its customizations. Tables (levels, badge catalog) are
    /// replaced whole, never spliced.
    ///
    /// # Limitation
    ///
    /// A layer cannot set a value back to its default to undo a lower layer's
    /// customization, since "unset" and "set to default" look the same.
    fn merge(mut self, other: Config) -> Self {
        let default_scoring = ScoringConfig::default();
        if other.scoring.points_per_effort_level != default_scoring.points_per_effort_level {
            self.scoring.points_per_effort_level = other.scoring.points_per_effort_level;
        }
        if other.scoring.levels != default_scoring.levels {
            self.scoring.levels = other.scoring.levels;
        }

        if other.streaks.window_days != StreakConfig::default().window_days {
            self.streaks.window_days = other.streaks.window_days;
        }

        if other.badges.catalog != BadgeConfig::default().catalog {
            self.badges.catalog = other.badges.catalog;
        }

        let default_goals = GoalConfig::default();
        if other.goals.category != default_goals.category {
            self.goals.category = other.goals.category;
        }
        if other.goals.target != default_goals.target {
            self.goals.target = other.goals.target;
        }
        if other.goals.window_days != default_goals.window_days {
            self.goals.window_days = other.goals.window_days;
        }

        if other.leaderboard.limit != LeaderboardConfig::default().limit {
            self.leaderboard.limit = other.leaderboard.limit;
        }

        self
    }

    /// Save configuration to the project config file.
    ///
    /// Writes `.chairside/config.toml` under `cwd`, creating the directory if
    /// needed. Writes to a temp file first, then renames.
    pub fn save_project(&self, cwd: &Path) -> Result<PathBuf> {
        let dir = cwd.join(CONFIG_DIR_NAME);
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| ChairsideError::storage(&dir, e))?;
        }

        let config_path = dir.join("config.toml");
        let content =
            toml::to_string_pretty(self).map_err(|e| ChairsideError::config(e.to_string()))?;

        let temp_path = dir.join(".config.toml.tmp");
        fs::write(&temp_path, &content).map_err(|e| ChairsideError::storage(&temp_path, e))?;
        fs::rename(&temp_path, &config_path)
            .map_err(|e| ChairsideError::storage(&config_path, e))?;

        Ok(config_path)
    }
}

/// Get the Chairside home directory.
///
/// Checks `CHAIRSIDE_HOME` first, then falls back to `~/.chairside`.
/// An empty `CHAIRSIDE_HOME` is ignored.
pub fn chairside_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("CHAIRSIDE_HOME") {
        if home.is_empty() {
            tracing::warn!("CHAIRSIDE_HOME is empty, using default");
        } else {
            return Some(PathBuf::from(home));
        }
    }

    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME))
}

/// Find the project root for a given working directory.
///
/// The nearest ancestor holding a `.chairside/` directory wins; otherwise the
/// working directory itself is the root.
pub fn find_project_root(cwd: &Path) -> PathBuf {
    cwd.ancestors()
        .find(|ancestor| ancestor.join(CONFIG_DIR_NAME).is_dir())
        .unwrap_or(cwd)
        .to_path_buf()
}

/// Get the project `.chairside/` directory.
pub fn project_config_dir(cwd: &Path) -> PathBuf {
    find_project_root(cwd).join(CONFIG_DIR_NAME)
}

/// Get the default profiles directory: `<project>/.chairside/profiles/`.
pub fn project_profiles_dir(cwd: &Path) -> PathBuf {
    project_config_dir(cwd).join("profiles")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::badges::BadgeRule;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.scoring.points_per_effort_level, 10);
        assert_eq!(config.scoring.levels.len(), 6);
        assert_eq!(config.scoring.levels[0].name, "New Graduate");
        assert_eq!(config.streaks.window_days, 730);
        assert_eq!(config.badges.catalog.len(), 8);
        assert_eq!(config.goals.category, ActivityCategory::ContinuingEducation);
        assert_eq!(config.goals.target, 3);
        assert_eq!(config.goals.window_days, 7);
        assert_eq!(config.leaderboard.limit, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");

        let toml_content = r#"
[scoring]
points_per_effort_level = 25

[streaks]
window_days = 1095

[goals]
category = "Community Outreach"
target = 2
"#;
        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_from_file(&config_path).unwrap();

        assert_eq!(config.scoring.points_per_effort_level, 25);
        assert_eq!(config.streaks.window_days, 1095);
        assert_eq!(config.goals.category, ActivityCategory::CommunityOutreach);
        assert_eq!(config.goals.target, 2);

        // Untouched sections keep defaults
        assert_eq!(config.scoring.levels, default_levels());
        assert_eq!(config.leaderboard.limit, 10);
    }

    #[test]
    fn test_load_custom_tables() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");

        let toml_content = r#"
[[scoring.levels]]
level = 1
name = "Intern"
min_points = 0

[[scoring.levels]]
level = 2
name = "Partner"
min_points = 100

[[badges.catalog]]
id = "research-5"
name = "Published"
description = "Logged 5 research activities."
rule = { kind = "category", category = "Research & Publications", min = 5 }
"#;
        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_from_file(&config_path).unwrap();
        assert_eq!(config.scoring.levels.len(), 2);
        assert_eq!(config.scoring.levels[1].name, "Partner");
        assert_eq!(config.badges.catalog.len(), 1);
        assert_eq!(
            config.badges.catalog[0].rule,
            BadgeRule::Category {
                category: ActivityCategory::Research,
                min: 5
            }
        );
    }

    #[test]
    fn test_load_from_file_missing() {
        let result = Config::load_from_file(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "this is not valid toml [[[").unwrap();

        assert!(Config::load_from_file(&config_path).is_err());
    }

    #[test]
    fn test_load_from_file_rejects_unordered_levels() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");
        let toml_content = r#"
[[scoring.levels]]
level = 1
name = "High"
min_points = 500

[[scoring.levels]]
level = 2
name = "Low"
min_points = 100
"#;
        fs::write(&config_path, toml_content).unwrap();

        let err = Config::load_from_file(&config_path).unwrap_err();
        assert!(err.to_string().contains("threshold"));
    }

    #[test]
    fn test_validate_rejects_oversized_windows() {
        let mut config = Config::default();
        config.goals.window_days = u32::MAX;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("goals.window_days"));

        let mut config = Config::default();
        config.streaks.window_days = MAX_WINDOW_DAYS + 1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("streaks.window_days"));

        let mut config = Config::default();
        config.goals.window_days = MAX_WINDOW_DAYS;
        config.streaks.window_days = MAX_WINDOW_DAYS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file_rejects_oversized_goal_window() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[goals]\nwindow_days = 4000000000\n").unwrap();

        assert!(Config::load_from_file(&config_path).is_err());
    }

    #[test]
    #[serial]
    fn test_oversized_env_window_ignored() {
        let dir = TempDir::new().unwrap();
        env::set_var("CHAIRSIDE_STREAK_WINDOW_DAYS", "4000000000");

        let config = Config::load_from_cwd(dir.path());

        env::remove_var("CHAIRSIDE_STREAK_WINDOW_DAYS");

        assert_eq!(config.streaks.window_days, 730);
    }

    #[test]
    #[serial]
    fn test_project_config_precedence() {
        let dir = TempDir::new().unwrap();
        let config_dir = dir.path().join(CONFIG_DIR_NAME);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("config.toml"),
            "[streaks]\nwindow_days = 400\n",
        )
        .unwrap();

        let config = Config::load_from_cwd(dir.path());

        assert_eq!(config.streaks.window_days, 400);
        assert_eq!(config.scoring.points_per_effort_level, 10);
    }

    #[test]
    #[serial]
    fn test_broken_project_config_fails_open() {
        let dir = TempDir::new().unwrap();
        let config_dir = dir.path().join(CONFIG_DIR_NAME);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("config.toml"), "[streaks\nwindow_days = ").unwrap();

        let config = Config::load_from_cwd(dir.path());
        assert_eq!(config.streaks.window_days, 730);
    }

    #[test]
    #[serial]
    fn test_env_var_precedence() {
        let dir = TempDir::new().unwrap();
        let config_dir = dir.path().join(CONFIG_DIR_NAME);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("config.toml"),
            "[streaks]\nwindow_days = 400\n",
        )
        .unwrap();

        env::set_var("CHAIRSIDE_STREAK_WINDOW_DAYS", "900");
        let config = Config::load_from_cwd(dir.path());
        env::remove_var("CHAIRSIDE_STREAK_WINDOW_DAYS");

        assert_eq!(config.streaks.window_days, 900);
    }

    #[test]
    #[serial]
    fn test_env_var_overrides() {
        let dir = TempDir::new().unwrap();
        env::set_var("CHAIRSIDE_POINTS_PER_EFFORT", "15");
        env::set_var("CHAIRSIDE_GOAL_TARGET", "5");
        env::set_var("CHAIRSIDE_LEADERBOARD_LIMIT", "3");

        let config = Config::load_from_cwd(dir.path());

        env::remove_var("CHAIRSIDE_POINTS_PER_EFFORT");
        env::remove_var("CHAIRSIDE_GOAL_TARGET");
        env::remove_var("CHAIRSIDE_LEADERBOARD_LIMIT");

        assert_eq!(config.scoring.points_per_effort_level, 15);
        assert_eq!(config.goals.target, 5);
        assert_eq!(config.leaderboard.limit, 3);
    }

    #[test]
    #[serial]
    fn test_invalid_env_values_ignored() {
        let dir = TempDir::new().unwrap();
        env::set_var("CHAIRSIDE_POINTS_PER_EFFORT", "0");
        env::set_var("CHAIRSIDE_STREAK_WINDOW_DAYS", "forever");

        let config = Config::load_from_cwd(dir.path());

        env::remove_var("CHAIRSIDE_POINTS_PER_EFFORT");
        env::remove_var("CHAIRSIDE_STREAK_WINDOW_DAYS");

        assert_eq!(config.scoring.points_per_effort_level, 10);
        assert_eq!(config.streaks.window_days, 730);
    }

    #[test]
    fn test_merge_configs() {
        let base = Config {
            streaks: StreakConfig { window_days: 365 },
            ..Default::default()
        };
        let overlay = Config {
            goals: GoalConfig {
                target: 6,
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = base.merge(overlay);
        assert_eq!(merged.streaks.window_days, 365);
        assert_eq!(merged.goals.target, 6);
    }

    #[test]
    #[serial]
    fn test_chairside_home_with_env() {
        env::set_var("CHAIRSIDE_HOME", "/custom/chairside");
        let home = chairside_home();
        env::remove_var("CHAIRSIDE_HOME");

        assert_eq!(home, Some(PathBuf::from("/custom/chairside")));
    }

    #[test]
    #[serial]
    fn test_chairside_home_empty_env() {
        env::set_var("CHAIRSIDE_HOME", "");
        let home = chairside_home();
        env::remove_var("CHAIRSIDE_HOME");

        if let Some(path) = home {
            assert!(path.ends_with(CONFIG_DIR_NAME));
        }
    }

    #[test]
    fn test_find_project_root_walks_up() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(CONFIG_DIR_NAME)).unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested), dir.path().to_path_buf());
        assert_eq!(
            project_profiles_dir(&nested),
            dir.path().join(CONFIG_DIR_NAME).join("profiles")
        );
    }

    #[test]
    fn test_save_project_roundtrip() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            streaks: StreakConfig { window_days: 1000 },
            ..Default::default()
        };

        let path = config.save_project(dir.path()).unwrap();
        let loaded = Config::load_from_file(&path).unwrap();

        assert_eq!(loaded, config);
    }
}
