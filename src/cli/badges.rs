//! Badges command for Chairside.
//!
//! Lists the badge catalog, optionally marking which badges a profile holds.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::input::ProfileInput;
use super::stats::badge_marker;
use crate::config::Config;
use crate::stats::{BadgeDefinition, BadgeKind, StatsEngine};

/// Options for the badges command.
#[derive(Debug, Clone, Default)]
pub struct BadgesOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Override the as-of date.
    pub as_of: Option<NaiveDate>,
}

/// A catalog entry with its requirement and, for a profile, earned status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: BadgeKind,
    pub requirement: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earned: Option<bool>,
}

impl BadgeInfo {
    fn from_definition(def: &BadgeDefinition, earned: Option<bool>) -> Self {
        Self {
            id: def.id.clone(),
            name: def.name.clone(),
            description: def.description.clone(),
            kind: def.rule.kind(),
            requirement: def.rule.describe(),
            earned,
        }
    }
}

/// Output format for the badges command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgesOutput {
    /// Whether the catalog was evaluated successfully.
    pub success: bool,
    pub badges: Vec<BadgeInfo>,
    /// Error message if the command failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BadgesOutput {
    /// Create a successful output.
    pub fn success(badges: Vec<BadgeInfo>) -> Self {
        Self {
            success: true,
            badges,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            badges: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Number of earned badges, if a profile was evaluated.
    pub fn earned_count(&self) -> Option<usize> {
        if self.badges.iter().any(|b| b.earned.is_none()) {
            return None;
        }
        Some(self.badges.iter().filter(|b| b.earned == Some(true)).count())
    }
}

/// The badges command implementation.
pub struct BadgesCommand {
    config: Config,
    cwd: PathBuf,
}

impl BadgesCommand {
    /// Create a new badges command.
    pub fn new(config: Config, cwd: impl AsRef<Path>) -> Self {
        Self {
            config,
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    /// Run the badges command. Without an input, lists the catalog only.
    pub fn run(&self, input: Option<&ProfileInput>, options: &BadgesOptions) -> BadgesOutput {
        let engine = match StatsEngine::new(&self.config) {
            Ok(engine) => engine,
            Err(e) => return BadgesOutput::failure(e.to_string()),
        };

        let Some(input) = input else {
            let badges = engine
                .catalog()
                .iter()
                .map(|def| BadgeInfo::from_definition(def, None))
                .collect();
            return BadgesOutput::success(badges);
        };

        let loaded = match input.load(&self.cwd, options.as_of) {
            Ok(loaded) => loaded,
            Err(e) => return BadgesOutput::failure(e.to_string()),
        };
        let report = engine.compute(&loaded.activities, &loaded.reviews, loaded.as_of);
        let earned: HashSet<&str> = report.badges.iter().map(|b| b.id.as_str()).collect();

        let badges = engine
            .catalog()
            .iter()
            .map(|def| BadgeInfo::from_definition(def, Some(earned.contains(def.id.as_str()))))
            .collect();
        BadgesOutput::success(badges)
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &BadgesOutput, options: &BadgesOptions) -> String {
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
    fn format_human_readable(&self, output: &BadgesOutput) -> String {
        if !output.success {
            return format!(
                "Badges failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        let mut lines = Vec::new();
        match output.earned_count() {
            Some(count) => lines.push(format!(
                "=== Badges: {} of {} earned ===\n",
                count,
                output.badges.len()
            )),
            None => lines.push("=== Badge Catalog ===\n".to_string()),
        }

        for badge in &output.badges {
            let status = match badge.earned {
                Some(true) => "[x] ",
                Some(false) => "[ ] ",
                None => "",
            };
            lines.push(format!(
                "{}{} {} ({})",
                status,
                badge_marker(badge.kind),
                badge.name,
                badge.requirement
            ));
            lines.push(format!("      {}", badge.description));
        }

        lines.join("\n") + "\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::BadgeRule;
    use std::fs;
    use tempfile::TempDir;

    fn streak_request(days: u32) -> String {
        let activities: Vec<String> = (1..=days)
            .map(|d| {
                format!(
                    r#"{{"id": "a{d}", "date": "2026-10-{d:02}", "category": "Patient Care", "effortLevel": 1}}"#
                )
            })
            .collect();
        format!(
            r#"{{"activities": [{}], "asOf": "2026-10-{:02}"}}"#,
            activities.join(","),
            days
        )
    }

    #[test]
    fn test_catalog_listing() {
        let cmd = BadgesCommand::new(Config::default(), ".");
        let output = cmd.run(None, &BadgesOptions::default());

        assert!(output.success);
        assert_eq!(output.badges.len(), 8);
        assert!(output.badges.iter().all(|b| b.earned.is_none()));
        assert_eq!(output.earned_count(), None);
        assert_eq!(output.badges[6].name, "Lifelong Learner");
    }

    #[test]
    fn test_earned_status() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("request.json");
        fs::write(&path, streak_request(8)).unwrap();

        let cmd = BadgesCommand::new(Config::default(), temp.path());
        let output = cmd.run(Some(&ProfileInput::File(path)), &BadgesOptions::default());

        assert!(output.success);
        assert_eq!(output.earned_count(), Some(1));
        let streak = output.badges.iter().find(|b| b.id == "streak-7").unwrap();
        assert_eq!(streak.earned, Some(true));
    }

    #[test]
    fn test_custom_catalog() {
        let mut config = Config::default();
        config.badges.catalog = vec![BadgeDefinition::new(
            "first-step",
            "First Step",
            "Logged a first contribution.",
            BadgeRule::Contributions { min: 1 },
        )];
        let cmd = BadgesCommand::new(config, ".");
        let output = cmd.run(None, &BadgesOptions::default());
        assert_eq!(output.badges.len(), 1);
        assert_eq!(output.badges[0].requirement, "1+ contributions");
    }

    #[test]
    fn test_format_output() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("request.json");
        fs::write(&path, streak_request(8)).unwrap();
        let cmd = BadgesCommand::new(Config::default(), temp.path());
        let options = BadgesOptions::default();

        let listing = cmd.format_output(&cmd.run(None, &options), &options);
        assert!(listing.contains("=== Badge Catalog ==="));
        assert!(listing.contains("Weekly Warrior (7-day streak)"));

        let earned = cmd.format_output(
            &cmd.run(Some(&ProfileInput::File(path)), &options),
            &options,
        );
        assert!(earned.contains("1 of 8 earned"));
        assert!(earned.contains("[x] "));
        assert!(earned.contains("[ ] "));
    }

    #[test]
    fn test_format_json() {
        let cmd = BadgesCommand::new(Config::default(), ".");
        let options = BadgesOptions {
            json: true,
            ..Default::default()
        };
        let formatted = cmd.format_output(&cmd.run(None, &options), &options);
        assert!(formatted.contains("\"kind\": \"streak\""));
        assert!(!formatted.contains("\"earned\""));
    }
}
