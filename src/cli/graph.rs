//! Graph command for Chairside.
//!
//! Renders the contribution calendar, and optionally the records of one day.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::input::ProfileInput;
use crate::config::Config;
use crate::core::ActivityRecord;
use crate::stats::{activities_on, contribution_calendar, ContributionCalendar};

/// Options for the graph command.
#[derive(Debug, Clone, Default)]
pub struct GraphOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Override the as-of date.
    pub as_of: Option<NaiveDate>,
    /// Also list the records of this day.
    pub day: Option<NaiveDate>,
}

/// Records of a single day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayDetail {
    pub date: NaiveDate,
    pub activities: Vec<ActivityRecord>,
}

/// Output format for the graph command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphOutput {
    /// Whether the calendar was built successfully.
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_contributions: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar: Option<ContributionCalendar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<DayDetail>,
    /// Error message if the command failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GraphOutput {
    /// Create a successful output.
    pub fn success(
        name: Option<String>,
        calendar: ContributionCalendar,
        day: Option<DayDetail>,
    ) -> Self {
        Self {
            success: true,
            name,
            total_contributions: Some(calendar.total_contributions()),
            calendar: Some(calendar),
            day,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            name: None,
            total_contributions: None,
            calendar: None,
            day: None,
            error: Some(error.into()),
        }
    }
}

/// Shade for each intensity tier, lowest first.
const SHADES: [char; 5] = ['·', '░', '▒', '▓', '█'];

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "   ", "Tue", "   ", "Thu", "   ", "Sat"];

/// The graph command implementation.
pub struct GraphCommand {
    #[allow(dead_code)]
    config: Config,
    cwd: PathBuf,
}

impl GraphCommand {
    /// Create a new graph command.
    pub fn new(config: Config, cwd: impl AsRef<Path>) -> Self {
        Self {
            config,
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    /// Run the graph command.
    pub fn run(&self, input: &ProfileInput, options: &GraphOptions) -> GraphOutput {
        let loaded = match input.load(&self.cwd, options.as_of) {
            Ok(loaded) => loaded,
            Err(e) => return GraphOutput::failure(e.to_string()),
        };

        let calendar = contribution_calendar(&loaded.activities, loaded.as_of);
        let day = options.day.map(|date| DayDetail {
            date,
            activities: activities_on(&loaded.activities, date)
                .into_iter()
                .cloned()
                .collect(),
        });

        GraphOutput::success(Some(loaded.label()), calendar, day)
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &GraphOutput, options: &GraphOptions) -> String {
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
    fn format_human_readable(&self, output: &GraphOutput) -> String {
        let calendar = match (&output.calendar, output.success) {
            (Some(calendar), true) => calendar,
            _ => {
                return format!(
                    "Graph failed: {}\n",
                    output.error.as_deref().unwrap_or("unknown error")
                )
            }
        };

        let mut lines = Vec::new();
        lines.push(format!(
            "{}: {} contributions in the last year",
            output.name.as_deref().unwrap_or("Profile"),
            calendar.total_contributions()
        ));
        lines.push(String::new());

        let weeks: Vec<_> = calendar.weeks().collect();
        for (weekday, label) in WEEKDAY_LABELS.iter().enumerate() {
            let row: String = weeks
                .iter()
                .map(|week| {
                    week.get(weekday)
                        .map(|cell| SHADES[usize::from(cell.intensity.min(4))])
                        .unwrap_or(' ')
                })
                .collect();
            lines.push(format!("{} {}", label, row));
        }

        lines.push(String::new());
        lines.push(format!("Less {} More", SHADES.iter().collect::<String>()));

        if let Some(day) = &output.day {
            lines.push(String::new());
            if day.activities.is_empty() {
                lines.push(format!("No contributions on {}.", day.date));
            } else {
                lines.push(format!(
                    "{} contribution(s) on {}:",
                    day.activities.len(),
                    day.date
                ));
                for activity in &day.activities {
                    lines.push(format!(
                        "  • {} (effort {}): {}",
                        activity.category,
                        activity.effort_level.get(),
                        activity.description
                    ));
                }
            }
        }

        lines.join("\n") + "\n"
    }
}
