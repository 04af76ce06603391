//! Profile source traits for Chairside.

use crate::core::ProfileRecord;
use crate::error::{ChairsideError, Result};

/// Trait for read-only profile sources.
///
/// Implementations hand out validated profiles; malformed input is rejected
/// when it is read, never passed on to the engine.
pub trait ProfileSource: Send + Sync {
    /// Retrieve a profile by ID.
    ///
    /// Returns `Ok(None)` if the profile doesn't exist.
    fn get(&self, id: &str) -> Result<Option<ProfileRecord>>;

    /// List all profiles in a stable order.
    fn list(&self) -> Result<Vec<ProfileRecord>>;

    /// Retrieve a profile, failing with `ProfileNotFound` if it is absent.
    fn load(&self, id: &str) -> Result<ProfileRecord> {
        self.get(id)?
            .ok_or_else(|| ChairsideError::profile_not_found(id))
    }
}

/// Test utilities for ProfileSource implementations.
#[cfg(test)]
pub mod tests {
    use super::*;

    /// Verify a source seeded with exactly the profiles `alpha` and `beta`.
    pub fn check_seeded_source<S: ProfileSource>(source: &S) {
        assert!(source.get("alpha").unwrap().is_some());
        assert!(source.get("gamma").unwrap().is_none());

        let alpha = source.load("alpha").unwrap();
        assert_eq!(alpha.id, "alpha");

        let err = source.load("gamma").unwrap_err();
        assert!(matches!(err, ChairsideError::ProfileNotFound { .. }));

        let ids: Vec<String> = source.list().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["alpha", "beta"]);
    }
}
