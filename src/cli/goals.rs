//! Goals command for Chairside.
//!
//! Shows progress toward the weekly goal.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::input::ProfileInput;
use crate::config::Config;
use crate::stats::{weekly_goal_progress, GoalProgress};

/// Width of the text progress bar.
const BAR_WIDTH: usize = 20;

/// Options for the goals command.
#[derive(Debug, Clone, Default)]
pub struct GoalsOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Override the as-of date.
    pub as_of: Option<NaiveDate>,
}

/// Output format for the goals command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalsOutput {
    /// Whether progress was computed successfully.
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
    /// Look-back in days.
    pub window_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<GoalProgress>,
    /// Error message if the command failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GoalsOutput {
    /// Create a successful output.
    pub fn success(as_of: NaiveDate, window_days: u32, progress: GoalProgress) -> Self {
        Self {
            success: true,
            as_of: Some(as_of),
            window_days,
            progress: Some(progress),
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            as_of: None,
            window_days: 0,
            progress: None,
            error: Some(error.into()),
        }
    }
}

/// The goals command implementation.
pub struct GoalsCommand {
    config: Config,
    cwd: PathBuf,
}

impl GoalsCommand {
    /// Create a new goals command.
    pub fn new(config: Config, cwd: impl AsRef<Path>) -> Self {
        Self {
            config,
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    /// Run the goals command.
    pub fn run(&self, input: &ProfileInput, options: &GoalsOptions) -> GoalsOutput {
        let loaded = match input.load(&self.cwd, options.as_of) {
            Ok(loaded) => loaded,
            Err(e) => return GoalsOutput::failure(e.to_string()),
        };

        let goal = &self.config.goals;
        let progress = weekly_goal_progress(&loaded.activities, goal, loaded.as_of);
        GoalsOutput::success(loaded.as_of, goal.window_days, progress)
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &GoalsOutput, options: &GoalsOptions) -> String {
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
    fn format_human_readable(&self, output: &GoalsOutput) -> String {
        let progress = match (&output.progress, output.success) {
            (Some(progress), true) => progress,
            _ => {
                return format!(
                    "Goals failed: {}\n",
                    output.error.as_deref().unwrap_or("unknown error")
                )
            }
        };

        let filled = ((progress.percent / 100.0) * BAR_WIDTH as f64).round() as usize;
        let bar = format!(
            "[{}{}]",
            "#".repeat(filled.min(BAR_WIDTH)),
            "-".repeat(BAR_WIDTH.saturating_sub(filled))
        );

        let mut lines = vec![
            format!(
                "🎯 Goal: {} {} activities in {} days",
                progress.target, progress.category, output.window_days
            ),
            format!(
                "   {} {}/{} ({:.0}%)",
                bar, progress.count, progress.target, progress.percent
            ),
        ];
        if progress.is_complete() {
            lines.push("   Goal complete!".to_string());
        }

        lines.join("\n") + "\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActivityCategory;
    use std::fs;
    use tempfile::TempDir;

    const REQUEST: &str = r#"{
        "activities": [
            {"id": "a1", "date": "2026-10-16", "category": "Continuing Education", "effortLevel": 2},
            {"id": "a2", "date": "2026-10-12", "category": "Continuing Education", "effortLevel": 2},
            {"id": "a3", "date": "2026-10-01", "category": "Continuing Education", "effortLevel": 2},
            {"id": "a4", "date": "2026-10-15", "category": "Community Outreach", "effortLevel": 2}
        ],
        "asOf": "2026-10-16"
    }"#;

    fn setup() -> (TempDir, ProfileInput) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("request.json");
        fs::write(&path, REQUEST).unwrap();
        (temp, ProfileInput::File(path))
    }

    #[test]
    fn test_default_goal() {
        let (temp, input) = setup();
        let cmd = GoalsCommand::new(Config::default(), temp.path());

        let output = cmd.run(&input, &GoalsOptions::default());

        assert!(output.success);
        let progress = output.progress.unwrap();
        assert_eq!(progress.count, 2);
        assert_eq!(progress.target, 3);
        assert_eq!(output.window_days, 7);
    }

    #[test]
    fn test_configured_goal() {
        let (temp, input) = setup();
        let mut config = Config::default();
        config.goals.category = ActivityCategory::CommunityOutreach;
        config.goals.target = 1;
        let cmd = GoalsCommand::new(config, temp.path());

        let options = GoalsOptions::default();
        let output = cmd.run(&input, &options);
        assert!(output.progress.as_ref().unwrap().is_complete());

        let formatted = cmd.format_output(&output, &options);
        assert!(formatted.contains("1 Community Outreach activities in 7 days"));
        assert!(formatted.contains("[####################] 1/1 (100%)"));
        assert!(formatted.contains("Goal complete!"));
    }

    #[test]
    fn test_format_partial() {
        let (temp, input) = setup();
        let cmd = GoalsCommand::new(Config::default(), temp.path());
        let options = GoalsOptions::default();

        let output = cmd.run(&input, &options);
        let formatted = cmd.format_output(&output, &options);
        assert!(formatted.contains("[#############-------] 2/3 (67%)"));
        assert!(!formatted.contains("Goal complete!"));
    }

    #[test]
    fn test_format_json() {
        let (temp, input) = setup();
        let cmd = GoalsCommand::new(Config::default(), temp.path());
        let options = GoalsOptions {
            json: true,
            ..Default::default()
        };

        let output = cmd.run(&input, &options);
        let formatted = cmd.format_output(&output, &options);
        assert!(formatted.contains("\"windowDays\": 7"));
        assert!(formatted.contains("\"category\": \"Continuing Education\""));
    }
}
