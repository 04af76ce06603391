//! Activity record types.
//!
//! An activity record is one logged unit of professional effort on a given
//! day. Records carry a category and an effort weight; the date is a day
//! bucket with no time-of-day component.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of a logged activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActivityCategory {
    /// Chairside treatment and examinations.
    #[serde(rename = "Patient Care")]
    PatientCare,
    /// Courses, webinars, workshops and reading.
    #[serde(rename = "Continuing Education")]
    ContinuingEducation,
    /// Studies, abstracts and peer review.
    #[serde(rename = "Research & Publications")]
    Research,
    /// Screenings, health fairs and volunteering.
    #[serde(rename = "Community Outreach")]
    CommunityOutreach,
    /// Records, inventory, staff training and reporting.
    #[serde(rename = "Administrative Work")]
    AdministrativeWork,
}

impl ActivityCategory {
    /// Get all category variants, in declaration order.
    pub fn all() -> &'static [ActivityCategory] {
        &[
            ActivityCategory::PatientCare,
            ActivityCategory::ContinuingEducation,
            ActivityCategory::Research,
            ActivityCategory::CommunityOutreach,
            ActivityCategory::AdministrativeWork,
        ]
    }

    /// Get the display name for this category.
    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityCategory::PatientCare => "Patient Care",
            ActivityCategory::ContinuingEducation => "Continuing Education",
            ActivityCategory::Research => "Research & Publications",
            ActivityCategory::CommunityOutreach => "Community Outreach",
            ActivityCategory::AdministrativeWork => "Administrative Work",
        }
    }

    /// Get the short snake_case key used on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            ActivityCategory::PatientCare => "patient_care",
            ActivityCategory::ContinuingEducation => "continuing_education",
            ActivityCategory::Research => "research",
            ActivityCategory::CommunityOutreach => "community_outreach",
            ActivityCategory::AdministrativeWork => "administrative_work",
        }
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Error returned when a category name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown activity category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for ActivityCategory {
    type Err = UnknownCategory;

    /// Accepts either the display name or the snake_case key, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ActivityCategory::all()
            .iter()
            .copied()
            .find(|c| {
                c.display_name().eq_ignore_ascii_case(wanted) || c.key().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Lowest valid effort level.
pub const MIN_EFFORT_LEVEL: u8 = 1;

/// Highest valid effort level.
pub const MAX_EFFORT_LEVEL: u8 = 4;

/// Effort weight of an activity, guaranteed to be in 1-4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct EffortLevel(u8);

/// Error returned when an effort level is outside 1-4.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("effort level {0} is outside 1-4")]
pub struct InvalidEffortLevel(pub i64);

impl EffortLevel {
    /// Create an effort level, rejecting values outside 1-4.
    pub fn new(value: u8) -> Result<Self, InvalidEffortLevel> {
        if (MIN_EFFORT_LEVEL..=MAX_EFFORT_LEVEL).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidEffortLevel(value as i64))
        }
    }

    /// Create an effort level, clamping into 1-4.
    pub fn saturating(value: u8) -> Self {
        Self(value.clamp(MIN_EFFORT_LEVEL, MAX_EFFORT_LEVEL))
    }

    /// The raw weight.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for EffortLevel {
    type Error = InvalidEffortLevel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for EffortLevel {
    type Error = InvalidEffortLevel;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| InvalidEffortLevel(value))
            .and_then(Self::new)
    }
}

impl From<EffortLevel> for u8 {
    fn from(level: EffortLevel) -> Self {
        level.0
    }
}

/// One logged unit of professional effort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    /// Opaque identifier, unique within one professional's records.
    pub id: String,
    /// Day bucket of the activity.
    pub date: NaiveDate,
    /// Category of the activity.
    pub category: ActivityCategory,
    /// Free-text label; never interpreted.
    #[serde(default)]
    pub description: String,
    /// Weight used for point scoring.
    pub effort_level: EffortLevel,
}

impl ActivityRecord {
    /// Create a new activity record.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        category: ActivityCategory,
        effort_level: EffortLevel,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            category,
            description: String::new(),
            effort_level,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
