//! Leaderboard command for Chairside.
//!
//! Ranks a directory of profiles by points and by longest streak.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::input::DirectoryInput;
use crate::config::Config;
use crate::stats::{rank_by, summarize_profiles, LeaderboardEntry, LeaderboardKey, StatsEngine};

/// Options for the leaderboard command.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Show a single board; both when unset.
    pub key: Option<LeaderboardKey>,
    /// Rows per board; config value when unset.
    pub limit: Option<usize>,
}

/// One ranked board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub key: LeaderboardKey,
    pub title: String,
    pub entries: Vec<LeaderboardEntry>,
}

/// Output format for the leaderboard command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardOutput {
    /// Whether the boards were built successfully.
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
    /// Profiles considered.
    pub profile_count: usize,
    pub boards: Vec<Board>,
    /// Error message if the command failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LeaderboardOutput {
    /// Create a successful output.
    pub fn success(as_of: NaiveDate, profile_count: usize, boards: Vec<Board>) -> Self {
        Self {
            success: true,
            as_of: Some(as_of),
            profile_count,
            boards,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            as_of: None,
            profile_count: 0,
            boards: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// The leaderboard command implementation.
pub struct LeaderboardCommand {
    config: Config,
    cwd: PathBuf,
}

impl LeaderboardCommand {
    /// Create a new leaderboard command.
    pub fn new(config: Config, cwd: impl AsRef<Path>) -> Self {
        Self {
            config,
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    /// Run the leaderboard command.
    pub fn run(
        &self,
        input: &DirectoryInput,
        as_of: NaiveDate,
        options: &LeaderboardOptions,
    ) -> LeaderboardOutput {
        let profiles = match input.load(&self.cwd, as_of) {
            Ok(profiles) => profiles,
            Err(e) => return LeaderboardOutput::failure(e.to_string()),
        };

        let engine = match StatsEngine::new(&self.config) {
            Ok(engine) => engine,
            Err(e) => return LeaderboardOutput::failure(e.to_string()),
        };
        let summaries = summarize_profiles(&engine, &profiles, as_of);
        let limit = options.limit.unwrap_or(self.config.leaderboard.limit);

        let keys = match options.key {
            Some(key) => vec![key],
            None => vec![LeaderboardKey::Points, LeaderboardKey::LongestStreak],
        };
        let boards = keys
            .into_iter()
            .map(|key| Board {
                key,
                title: key.title().to_string(),
                entries: rank_by(&summaries, key, limit),
            })
            .collect();

        tracing::debug!(profiles = profiles.len(), limit, "built leaderboards");
        LeaderboardOutput::success(as_of, profiles.len(), boards)
    }

    /// Format output based on options.
    pub fn format_output(
        &self,
        output: &LeaderboardOutput,
        options: &LeaderboardOptions,
    ) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    /// Format output as human-readable text.
    fn format_human_readable(&self, output: &LeaderboardOutput) -> String {
        if !output.success {
            return format!(
                "Leaderboard failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        if output.profile_count == 0 {
            return "No profiles found. Add profiles to .chairside/profiles/ or use --demo.\n"
                .to_string();
        }

        let mut lines = Vec::new();
        for board in &output.boards {
            lines.push(format!("=== {} ===", board.title));
            for entry in &board.entries {
                lines.push(format!(
                    "{:>3}. {:<28} {:>6} {}",
                    entry.rank,
                    entry.name,
                    entry.value,
                    board.key.unit()
                ));
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }
}
