//! Unified error types for Chairside.
//!
//! Input errors are never coerced into numbers. Malformed records are
//! rejected at ingestion with the offending record id, so the stats engine
//! can assume clean input. Configuration problems are the one place where
//! we fail open: a broken config file logs a warning and defaults apply.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Chairside operations.
#[derive(Error, Debug)]
pub enum ChairsideError {
    /// I/O errors while reading profile or config files.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON or TOML parsing/serialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Configuration loading or validation errors.
    #[error("config error: {message}")]
    Config { message: String },

    /// A record failed ingestion validation.
    #[error("invalid record {record_id}: {message}")]
    InvalidRecord { record_id: String, message: String },

    /// Profile not found in the source.
    #[error("profile not found: {profile_id}")]
    ProfileNotFound { profile_id: String },
}

/// A specialized Result type for Chairside operations.
pub type Result<T> = std::result::Result<T, ChairsideError>;

impl ChairsideError {
    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid record error.
    pub fn invalid_record(record_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            record_id: record_id.into(),
            message: message.into(),
        }
    }

    /// Create a profile not found error.
    pub fn profile_not_found(profile_id: impl Into<String>) -> Self {
        Self::ProfileNotFound {
            profile_id: profile_id.into(),
        }
    }
}

impl From<io::Error> for ChairsideError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ChairsideError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Trait for fail-open error handling.
///
/// Used where a missing or broken optional input (config files) must not
/// stop a stats computation: log the error and return a safe default.
pub trait FailOpen<T> {
    /// Handle an error by logging a warning and returning the default value.
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default;

    /// Handle an error by logging a warning and returning the provided fallback.
    fn fail_open_with(self, context: &str, fallback: T) -> T;
}

impl<T> FailOpen<T> for Result<T> {
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using default)", context, err);
                T::default()
            }
        }
    }

    fn fail_open_with(self, context: &str, fallback: T) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using fallback)", context, err);
                fallback
            }
        }
    }
}

/// Exit codes for the Chairside CLI.
pub mod exit_codes {
    /// Command completed.
    pub const SUCCESS: i32 = 0;

    /// Command failed (bad input, unreadable file, unknown profile).
    pub const ERROR: i32 = 1;
}
