//! Ingestion-time validation.
//!
//! Input files are first read into loosely typed `Raw*` records, then
//! validated once into the strongly typed domain records. Every rejection
//! names the offending record so the caller can fix the input. Nothing past
//! this boundary re-validates.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ActivityCategory, ActivityRecord, EffortLevel, ProfileRecord, ReviewRecord};
use super::review::{MAX_RATING, MIN_RATING};
use crate::error::{ChairsideError, Result};

/// Date format for all day buckets.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` day bucket.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// An activity record as it appears in an input file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActivityRecord {
    pub id: String,
    pub date: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub effort_level: i64,
}

impl RawActivityRecord {
    /// Validate into a domain record.
    pub fn validate(self) -> Result<ActivityRecord> {
        let date = parse_date(&self.date).ok_or_else(|| {
            ChairsideError::invalid_record(
                &self.id,
                format!("unparseable date '{}' (expected YYYY-MM-DD)", self.date),
            )
        })?;
        let category = self
            .category
            .parse::<ActivityCategory>()
            .map_err(|e| ChairsideError::invalid_record(&self.id, e.to_string()))?;
        let effort_level = EffortLevel::try_from(self.effort_level)
            .map_err(|e| ChairsideError::invalid_record(&self.id, e.to_string()))?;

        Ok(ActivityRecord {
            id: self.id,
            date,
            category,
            description: self.description,
            effort_level,
        })
    }
}

/// A review as it appears in an input file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReviewRecord {
    pub rating: f64,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl RawReviewRecord {
    /// Validate into a domain record. Reviews have no id, so errors name
    /// them by position (`review[2]`).
    pub fn validate(self, index: usize) -> Result<ReviewRecord> {
        let label = format!("review[{}]", index);
        if !self.rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(ChairsideError::invalid_record(
                label,
                format!("rating {} is outside 1-5", self.rating),
            ));
        }
        let date = match self.date {
            Some(raw) => Some(parse_date(&raw).ok_or_else(|| {
                ChairsideError::invalid_record(
                    &label,
                    format!("unparseable date '{}' (expected YYYY-MM-DD)", raw),
                )
            })?),
            None => None,
        };

        Ok(ReviewRecord {
            rating: self.rating,
            patient_name: self.patient_name,
            comment: self.comment,
            date,
        })
    }
}

/// Validate a full activity list, rejecting duplicate ids.
pub fn validate_activities(raw: Vec<RawActivityRecord>) -> Result<Vec<ActivityRecord>> {
    let mut seen = HashSet::with_capacity(raw.len());
    let mut records = Vec::with_capacity(raw.len());

    for record in raw {
        if !seen.insert(record.id.clone()) {
            return Err(ChairsideError::invalid_record(
                &record.id,
                "duplicate activity id",
            ));
        }
        records.push(record.validate()?);
    }

    Ok(records)
}

/// Validate a full review list.
pub fn validate_reviews(raw: Vec<RawReviewRecord>) -> Result<Vec<ReviewRecord>> {
    raw.into_iter()
        .enumerate()
        .map(|(i, review)| review.validate(i))
        .collect()
}

/// A profile as it appears in an input file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfileRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub activities: Vec<RawActivityRecord>,
    #[serde(default)]
    pub reviews: Vec<RawReviewRecord>,
}

impl RawProfileRecord {
    /// Validate into a domain profile.
    pub fn validate(self) -> Result<ProfileRecord> {
        Ok(ProfileRecord {
            activities: validate_activities(self.activities)?,
            reviews: validate_reviews(self.reviews)?,
            id: self.id,
            name: self.name,
        })
    }
}

/// A stats request: the in-process contract in serialized form.
///
/// `{ "activities": [...], "reviews": [...], "asOf": "YYYY-MM-DD" }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRequest {
    #[serde(default)]
    pub activities: Vec<RawActivityRecord>,
    #[serde(default)]
    pub reviews: Vec<RawReviewRecord>,
    #[serde(default)]
    pub as_of: Option<String>,
}

/// A validated stats request.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidStatsRequest {
    pub activities: Vec<ActivityRecord>,
    pub reviews: Vec<ReviewRecord>,
    pub as_of: Option<NaiveDate>,
}

impl StatsRequest {
    /// Validate every record and the optional as-of date.
    pub fn validate(self) -> Result<ValidStatsRequest> {
        let as_of = match self.as_of {
            Some(raw) => Some(parse_date(&raw).ok_or_else(|| {
                ChairsideError::invalid_record(
                    "asOf",
                    format!("unparseable date '{}' (expected YYYY-MM-DD)", raw),
                )
            })?),
            None => None,
        };

        Ok(ValidStatsRequest {
            activities: validate_activities(self.activities)?,
            reviews: validate_reviews(self.reviews)?,
            as_of,
        })
    }
}
