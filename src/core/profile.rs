//! Profile records.

use serde::{Deserialize, Serialize};

use super::{ActivityRecord, ReviewRecord};

/// One professional's full history: the unit the CLI and leaderboard consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub activities: Vec<ActivityRecord>,
    #[serde(default)]
    pub reviews: Vec<ReviewRecord>,
}

impl ProfileRecord {
    /// Create an empty profile.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            activities: Vec::new(),
            reviews: Vec::new(),
        }
    }
}
