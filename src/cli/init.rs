//! Init command for Chairside.
//!
//! Scaffolds `.chairside/` with a default config and a profiles directory,
//! optionally seeded with the demo directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{Config, CONFIG_DIR_NAME};
use crate::demo;
use crate::util::write_json_atomic;

/// Options for the init command.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Force overwrite existing files.
    pub force: bool,
    /// Seed the profiles directory with demo profiles as of this date.
    pub demo_as_of: Option<NaiveDate>,
}

/// Output format for the init command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitOutput {
    /// Whether initialization was successful.
    pub success: bool,
    /// Files and directories created.
    pub created: Vec<String>,
    /// Files that already existed (skipped).
    pub skipped: Vec<String>,
    /// Error message if initialization failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InitOutput {
    /// Create a successful output.
    pub fn success(created: Vec<String>, skipped: Vec<String>) -> Self {
        Self {
            success: true,
            created,
            skipped,
            error: None,
        }
    }

    /// Create a failed output, keeping what was created before the failure.
    pub fn failure(error: impl Into<String>, created: Vec<String>, skipped: Vec<String>) -> Self {
        Self {
            success: false,
            created,
            skipped,
            error: Some(error.into()),
        }
    }
}

/// The init command implementation.
pub struct InitCommand {
    cwd: PathBuf,
}

impl InitCommand {
    /// Create a new init command.
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    /// Run the init command.
    pub fn run(&self, options: &InitOptions) -> InitOutput {
        let mut created = Vec::new();
        let mut skipped = Vec::new();

        let config_dir = self.cwd.join(CONFIG_DIR_NAME);
        match ensure_dir(&config_dir) {
            Ok(true) => created.push(config_dir.display().to_string()),
            Ok(false) => skipped.push(config_dir.display().to_string()),
            Err(e) => return InitOutput::failure(e, created, skipped),
        }

        let config_path = config_dir.join("config.toml");
        if config_path.exists() && !options.force {
            skipped.push(config_path.display().to_string());
        } else {
            match Config::default().save_project(&self.cwd) {
                Ok(path) => created.push(path.display().to_string()),
                Err(e) => return InitOutput::failure(e.to_string(), created, skipped),
            }
        }

        let profiles_dir = config_dir.join("profiles");
        match ensure_dir(&profiles_dir) {
            Ok(true) => created.push(profiles_dir.display().to_string()),
            Ok(false) => skipped.push(profiles_dir.display().to_string()),
            Err(e) => return InitOutput::failure(e, created, skipped),
        }

        if let Some(as_of) = options.demo_as_of {
            for profile in demo::directory(as_of) {
                let path = profiles_dir.join(format!("{}.json", profile.id));
                if path.exists() && !options.force {
                    skipped.push(path.display().to_string());
                    continue;
                }
                if let Err(e) = write_json_atomic(&path, &profile) {
                    return InitOutput::failure(e.to_string(), created, skipped);
                }
                created.push(path.display().to_string());
            }
        }

        InitOutput::success(created, skipped)
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &InitOutput, options: &InitOptions) -> String {
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
    fn format_human_readable(&self, output: &InitOutput) -> String {
        let mut lines = Vec::new();

        if !output.success {
            lines.push(format!(
                "Init failed: {}",
                output.error.as_deref().unwrap_or("unknown error")
            ));
            if !output.created.is_empty() {
                lines.push(String::new());
                lines.push("Partially created before failure:".to_string());
                lines.extend(output.created.iter().map(|p| format!("  {}", p)));
            }
            return lines.join("\n") + "\n";
        }

        if output.created.is_empty() {
            return "Chairside already initialized.\n".to_string();
        }

        lines.push("Created:".to_string());
        lines.extend(output.created.iter().map(|p| format!("  {}", p)));
        if !output.skipped.is_empty() {
            lines.push("Already exists (skipped):".to_string());
            lines.extend(output.skipped.iter().map(|p| format!("  {}", p)));
        }
        lines.push(String::new());
        lines.push("Chairside initialized successfully.".to_string());

        lines.join("\n") + "\n"
    }
}

/// Ensure a directory exists. Returns `Ok(true)` if it was created.
fn ensure_dir(path: &Path) -> Result<bool, String> {
    if path.exists() {
        if path.is_dir() {
            return Ok(false);
        }
        return Err(format!("{} exists but is not a directory", path.display()));
    }

    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))?;
    Ok(true)
}
