//! Patient review records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lowest valid review rating.
pub const MIN_RATING: f64 = 1.0;

/// Highest valid review rating.
pub const MAX_RATING: f64 = 5.0;

/// A patient review. Only `rating` feeds the stats engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    /// Rating in 1-5.
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl ReviewRecord {
    /// Create a review with just a rating.
    pub fn new(rating: f64) -> Self {
        Self {
            rating,
            patient_name: None,
            comment: None,
            date: None,
        }
    }

    /// Attach the reviewer and comment text.
    pub fn with_comment(mut self, patient_name: impl Into<String>, comment: impl Into<String>) -> Self {
        self.patient_name = Some(patient_name.into());
        self.comment = Some(comment.into());
        self
    }

    /// Set the review date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}
