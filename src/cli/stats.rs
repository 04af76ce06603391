//! Stats command for Chairside.
//!
//! Computes one profile's stats and earned badges.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::input::ProfileInput;
use crate::config::Config;
use crate::stats::{Badge, BadgeKind, ProfileStats, StatsEngine};

/// Options for the stats command.
#[derive(Debug, Clone, Default)]
pub struct StatsOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Override the as-of date.
    pub as_of: Option<NaiveDate>,
}

/// Output format for the stats command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsOutput {
    /// Whether stats were computed successfully.
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<ProfileStats>,
    #[serde(default)]
    pub badges: Vec<Badge>,
    /// Error message if the command failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatsOutput {
    /// Create a successful output.
    pub fn success(
        profile_id: Option<String>,
        name: Option<String>,
        as_of: NaiveDate,
        stats: ProfileStats,
        badges: Vec<Badge>,
    ) -> Self {
        Self {
            success: true,
            profile_id,
            name,
            as_of: Some(as_of),
            stats: Some(stats),
            badges,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            profile_id: None,
            name: None,
            as_of: None,
            stats: None,
            badges: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// The stats command implementation.
pub struct StatsCommand {
    config: Config,
    cwd: PathBuf,
}

impl StatsCommand {
    /// Create a new stats command.
    pub fn new(config: Config, cwd: impl AsRef<Path>) -> Self {
        Self {
            config,
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    /// Run the stats command.
    pub fn run(&self, input: &ProfileInput, options: &StatsOptions) -> StatsOutput {
        let loaded = match input.load(&self.cwd, options.as_of) {
            Ok(loaded) => loaded,
            Err(e) => return StatsOutput::failure(e.to_string()),
        };

        let engine = match StatsEngine::new(&self.config) {
            Ok(engine) => engine,
            Err(e) => return StatsOutput::failure(e.to_string()),
        };
        let report = engine.compute(&loaded.activities, &loaded.reviews, loaded.as_of);

        StatsOutput::success(
            loaded.profile_id,
            loaded.name,
            loaded.as_of,
            report.stats,
            report.badges,
        )
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &StatsOutput, options: &StatsOptions) -> String {
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
    fn format_human_readable(&self, output: &StatsOutput) -> String {
        let stats = match (&output.stats, output.success) {
            (Some(stats), true) => stats,
            _ => {
                return format!(
                    "Stats failed: {}\n",
                    output.error.as_deref().unwrap_or("unknown error")
                )
            }
        };

        let mut lines = Vec::new();
        let title = output
            .name
            .as_deref()
            .or(output.profile_id.as_deref())
            .unwrap_or("Profile");
        match output.as_of {
            Some(as_of) => lines.push(format!("=== {} (as of {}) ===\n", title, as_of)),
            None => lines.push(format!("=== {} ===\n", title)),
        }

        lines.push(format!(
            "🏅 Level {}: {} ({} points)",
            stats.level, stats.level_name, stats.points
        ));
        match &stats.next_level {
            Some(next) => lines.push(format!(
                "   {} points to Level {}: {}",
                next.points_remaining, next.level, next.level_name
            )),
            None => lines.push("   Top level reached".to_string()),
        }
        lines.push(String::new());

        lines.push(format!("📈 Contributions: {}", stats.total_contributions));
        lines.push(format!(
            "🔥 Streak: {} current | {} longest",
            day_count(stats.current_streak),
            day_count(stats.longest_streak)
        ));
        if stats.review_count == 0 {
            lines.push("⭐ Rating: no reviews".to_string());
        } else {
            lines.push(format!(
                "⭐ Rating: {:.1} ({} reviews)",
                stats.average_rating, stats.review_count
            ));
        }
        lines.push(String::new());

        if output.badges.is_empty() {
            lines.push("No badges earned yet.".to_string());
        } else {
            lines.push(format!("Badges ({})", output.badges.len()));
            for badge in &output.badges {
                lines.push(format!(
                    "   {} {}: {}",
                    badge_marker(badge.kind),
                    badge.name,
                    badge.description
                ));
            }
        }

        lines.join("\n") + "\n"
    }
}

fn day_count(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

/// Terminal stand-in for a badge icon.
pub(crate) fn badge_marker(kind: BadgeKind) -> &'static str {
    match kind {
        BadgeKind::Contributions => "🏆",
        BadgeKind::Streak => "🔥",
        BadgeKind::Category => "🎓",
    }
}
