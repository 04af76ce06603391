//! In-memory profile source.
//!
//! Backs the demo directory, profile arrays read from a single JSON file,
//! and tests.

use crate::core::ProfileRecord;
use crate::error::Result;
use crate::storage::ProfileSource;

/// Profiles held in memory, listed in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileSource {
    profiles: Vec<ProfileRecord>,
}

impl MemoryProfileSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source from already-validated profiles.
    pub fn from_profiles(profiles: Vec<ProfileRecord>) -> Self {
        Self { profiles }
    }

    /// Add a profile, replacing any profile with the same id in place.
    pub fn insert(&mut self, profile: ProfileRecord) {
        match self.profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Check if the source is empty.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl ProfileSource for MemoryProfileSource {
    fn get(&self, id: &str) -> Result<Option<ProfileRecord>> {
        Ok(self.profiles.iter().find(|p| p.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<ProfileRecord>> {
        Ok(self.profiles.clone())
    }
}
