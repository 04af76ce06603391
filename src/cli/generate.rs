//! Generate command for Chairside.
//!
//! Emits deterministic demo profiles. In JSON mode the output is the profile
//! document itself (one record, or an array for the whole directory), so it
//! can be fed straight back to `stats --input` or `leaderboard --input`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::ProfileRecord;
use crate::demo::{self, ActivityLevel};

/// Options for the generate command.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Output the profile document as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Generate one profile; the whole demo directory when unset.
    pub profile_id: Option<String>,
    /// Override the activity level.
    pub level: Option<ActivityLevel>,
}

/// Output format for the generate command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutput {
    /// Whether generation succeeded.
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
    pub profiles: Vec<ProfileRecord>,
    /// Whether a single profile was requested.
    #[serde(skip)]
    pub single: bool,
    /// Error message if generation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateOutput {
    /// Create a successful output.
    pub fn success(as_of: NaiveDate, profiles: Vec<ProfileRecord>, single: bool) -> Self {
        Self {
            success: true,
            as_of: Some(as_of),
            profiles,
            single,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            as_of: None,
            profiles: Vec::new(),
            single: false,
            error: Some(error.into()),
        }
    }
}

/// The generate command implementation.
#[derive(Debug, Default)]
pub struct GenerateCommand;

impl GenerateCommand {
    /// Create a new generate command.
    pub fn new() -> Self {
        Self
    }

    /// Run the generate command.
    ///
    /// Unknown profile ids are generated with the requested level (medium by
    /// default) and no reviews.
    pub fn run(&self, as_of: NaiveDate, options: &GenerateOptions) -> GenerateOutput {
        let Some(id) = options.profile_id.as_deref() else {
            let profiles = demo::DEMO_PROFILES
                .iter()
                .map(|sample| {
                    let mut sample = *sample;
                    if let Some(level) = options.level {
                        sample.level = level;
                    }
                    demo::profile(&sample, as_of)
                })
                .collect();
            return GenerateOutput::success(as_of, profiles, false);
        };

        if id.trim().is_empty() {
            return GenerateOutput::failure("profile id must not be empty");
        }

        let level = options
            .level
            .unwrap_or_else(|| demo::activity_level_for(id));
        let name = demo::DEMO_PROFILES
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.to_string())
            .unwrap_or_else(|| id.to_string());

        let mut profile = ProfileRecord::new(id, name);
        profile.activities = demo::generate_activities(id, level, as_of);
        profile.reviews = demo::reviews_for(id);

        GenerateOutput::success(as_of, vec![profile], true)
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &GenerateOutput, options: &GenerateOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            let document = match (output.success, output.single, output.profiles.first()) {
                (true, true, Some(profile)) => serde_json::to_string_pretty(profile),
                (true, _, _) => serde_json::to_string_pretty(&output.profiles),
                (false, _, _) => serde_json::to_string_pretty(output),
            };
            document.unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    /// Format output as human-readable text.
    fn format_human_readable(&self, output: &GenerateOutput) -> String {
        if !output.success {
            return format!(
                "Generate failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        let mut lines = Vec::new();
        if let Some(as_of) = output.as_of {
            lines.push(format!("Generated demo activity up to {}:", as_of));
        }
        for profile in &output.profiles {
            lines.push(format!(
                "  {:<14} {:<20} {:>4} activities, {} reviews",
                profile.id,
                profile.name,
                profile.activities.len(),
                profile.reviews.len()
            ));
        }
        lines.push(String::new());
        lines.push("Use --json to print the profile document.".to_string());

        lines.join("\n") + "\n"
    }
}
