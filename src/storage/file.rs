//! File-based profile source for Chairside.
//!
//! Profiles are read from `<id>.json` files in a directory, by default
//! `.chairside/profiles/` under the project root. The source never writes.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::project_profiles_dir;
use crate::core::{ProfileRecord, RawProfileRecord};
use crate::error::{ChairsideError, Result};
use crate::storage::ProfileSource;
use crate::util::read_json;

/// Directory of profile JSON files.
#[derive(Debug, Clone)]
pub struct FileProfileSource {
    profiles_dir: PathBuf,
}

impl FileProfileSource {
    /// Source rooted at the project's profiles directory.
    pub fn for_project(cwd: &Path) -> Self {
        Self::with_dir(project_profiles_dir(cwd))
    }

    /// Source rooted at a custom directory.
    pub fn with_dir(profiles_dir: impl Into<PathBuf>) -> Self {
        Self {
            profiles_dir: profiles_dir.into(),
        }
    }

    /// The directory profiles are read from.
    pub fn dir(&self) -> &Path {
        &self.profiles_dir
    }

    /// Get the path for a profile file.
    fn profile_path(&self, id: &str) -> PathBuf {
        self.profiles_dir.join(format!("{}.json", id))
    }

    /// Read and validate one profile file.
    fn read_profile(path: &Path) -> Result<ProfileRecord> {
        let raw: RawProfileRecord = read_json(path)?;
        raw.validate()
    }
}

/// Ids are file stems, so they cannot name other paths.
fn is_plain_id(id: &str) -> bool {
    !id.is_empty() && !id.starts_with('.') && !id.contains(['/', '\\'])
}

impl ProfileSource for FileProfileSource {
    fn get(&self, id: &str) -> Result<Option<ProfileRecord>> {
        if !is_plain_id(id) {
            return Ok(None);
        }

        let path = self.profile_path(id);
        if !path.exists() {
            return Ok(None);
        }

        let profile = Self::read_profile(&path)?;
        if profile.id != id {
            return Err(ChairsideError::invalid_record(
                id,
                format!("{} holds profile '{}'", path.display(), profile.id),
            ));
        }

        Ok(Some(profile))
    }

    fn list(&self) -> Result<Vec<ProfileRecord>> {
        if !self.profiles_dir.exists() {
            tracing::debug!(dir = %self.profiles_dir.display(), "no profiles directory");
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.profiles_dir)
            .map_err(|e| ChairsideError::storage(&self.profiles_dir, e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ChairsideError::storage(&self.profiles_dir, e))?;
            let path = entry.path();

            if path.extension().map(|e| e != "json").unwrap_or(true) {
                continue;
            }
            if path
                .file_name()
                .map(|n| n.to_string_lossy().starts_with('.'))
                .unwrap_or(true)
            {
                tracing::debug!(path = %path.display(), "skipping hidden file");
                continue;
            }
            paths.push(path);
        }

        paths.sort();
        paths.iter().map(|path| Self::read_profile(path)).collect()
    }
}
