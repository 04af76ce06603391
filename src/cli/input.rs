//! Input resolution shared by the CLI commands.
//!
//! A single-profile command reads one of: a JSON file holding a stats request
//! or a profile record, a stored profile under `.chairside/profiles/`, or a
//! demo profile. Directory-wide commands read a profile array file, a profile
//! directory, the project profiles, or the demo directory.
//!
//! The as-of date resolves as: explicit flag, then the file's `asOf`, then
//! the local date. This is the only place the clock is read.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::core::{ActivityRecord, ProfileRecord, RawProfileRecord, ReviewRecord, StatsRequest};
use crate::demo;
use crate::error::{ChairsideError, Result};
use crate::storage::{FileProfileSource, MemoryProfileSource, ProfileSource};
use crate::util::read_json;

/// Today's date on the local clock.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Where a single profile's data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileInput {
    /// A stats request or profile record JSON file.
    File(PathBuf),
    /// A stored profile, from `dir` or the project profiles directory.
    Stored { id: String, dir: Option<PathBuf> },
    /// A generated demo profile.
    Demo(String),
}

/// A resolved single-profile input.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedProfile {
    pub profile_id: Option<String>,
    pub name: Option<String>,
    pub activities: Vec<ActivityRecord>,
    pub reviews: Vec<ReviewRecord>,
    pub as_of: NaiveDate,
}

impl LoadedProfile {
    fn from_profile(profile: ProfileRecord, as_of: NaiveDate) -> Self {
        Self {
            profile_id: Some(profile.id),
            name: Some(profile.name),
            activities: profile.activities,
            reviews: profile.reviews,
            as_of,
        }
    }

    /// Label for human-readable headers.
    pub fn label(&self) -> String {
        match (&self.name, &self.profile_id) {
            (Some(name), _) => name.clone(),
            (None, Some(id)) => id.clone(),
            (None, None) => "Profile".to_string(),
        }
    }
}

impl ProfileInput {
    /// Load and validate the input.
    pub fn load(&self, cwd: &Path, as_of: Option<NaiveDate>) -> Result<LoadedProfile> {
        match self {
            ProfileInput::File(path) => load_profile_file(path, as_of),
            ProfileInput::Stored { id, dir } => {
                let source = match dir {
                    Some(dir) => FileProfileSource::with_dir(dir),
                    None => FileProfileSource::for_project(cwd),
                };
                let profile = source.load(id)?;
                Ok(LoadedProfile::from_profile(
                    profile,
                    as_of.unwrap_or_else(local_today),
                ))
            }
            ProfileInput::Demo(id) => {
                let as_of = as_of.unwrap_or_else(local_today);
                let profile = demo::DEMO_PROFILES
                    .iter()
                    .find(|p| p.id == id.as_str())
                    .map(|p| demo::profile(p, as_of))
                    .ok_or_else(|| ChairsideError::profile_not_found(id.as_str()))?;
                Ok(LoadedProfile::from_profile(profile, as_of))
            }
        }
    }
}

/// A file is a profile record when it names a profile, else a stats request.
fn load_profile_file(path: &Path, as_of: Option<NaiveDate>) -> Result<LoadedProfile> {
    let value: serde_json::Value = read_json(path)?;
    let is_profile = value.get("id").is_some() && value.get("name").is_some();

    if is_profile {
        let raw: RawProfileRecord = serde_json::from_value(value)
            .map_err(|e| ChairsideError::serde(format!("{}: {}", path.display(), e)))?;
        let profile = raw.validate()?;
        return Ok(LoadedProfile::from_profile(
            profile,
            as_of.unwrap_or_else(local_today),
        ));
    }

    let request: StatsRequest = serde_json::from_value(value)
        .map_err(|e| ChairsideError::serde(format!("{}: {}", path.display(), e)))?;
    let request = request.validate()?;
    Ok(LoadedProfile {
        profile_id: None,
        name: None,
        activities: request.activities,
        reviews: request.reviews,
        as_of: as_of.or(request.as_of).unwrap_or_else(local_today),
    })
}

/// Where a set of profiles comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryInput {
    /// A JSON file holding one profile record or an array of them.
    File(PathBuf),
    /// A directory of `<id>.json` profile files.
    Dir(PathBuf),
    /// The project's `.chairside/profiles/` directory.
    Project,
    /// The generated demo directory.
    Demo,
}

impl DirectoryInput {
    /// Load and validate every profile.
    pub fn load(&self, cwd: &Path, as_of: NaiveDate) -> Result<Vec<ProfileRecord>> {
        let source: Box<dyn ProfileSource> = match self {
            DirectoryInput::File(path) => Box::new(load_profiles_file(path)?),
            DirectoryInput::Dir(dir) => Box::new(FileProfileSource::with_dir(dir)),
            DirectoryInput::Project => Box::new(FileProfileSource::for_project(cwd)),
            DirectoryInput::Demo => {
                Box::new(MemoryProfileSource::from_profiles(demo::directory(as_of)))
            }
        };
        source.list()
    }
}

fn load_profiles_file(path: &Path) -> Result<MemoryProfileSource> {
    let value: serde_json::Value = read_json(path)?;
    let raw = if value.is_array() {
        serde_json::from_value::<Vec<RawProfileRecord>>(value)
    } else {
        serde_json::from_value::<RawProfileRecord>(value).map(|profile| vec![profile])
    }
    .map_err(|e| ChairsideError::serde(format!("{}: {}", path.display(), e)))?;

    let mut source = MemoryProfileSource::new();
    for profile in raw {
        let profile = profile.validate()?;
        if source.get(&profile.id)?.is_some() {
            return Err(ChairsideError::invalid_record(
                profile.id,
                "duplicate profile id",
            ));
        }
        source.insert(profile);
    }
    Ok(source)
}
