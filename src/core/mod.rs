//! Core domain types for Chairside.
//!
//! Activity records, reviews and profiles, plus the ingestion boundary that
//! validates raw input into them.

pub mod activity;
pub mod ingest;
pub mod profile;
pub mod review;

pub use activity::{
    ActivityCategory, ActivityRecord, EffortLevel, InvalidEffortLevel, UnknownCategory,
    MAX_EFFORT_LEVEL, MIN_EFFORT_LEVEL,
};
pub use ingest::{
    parse_date, validate_activities, validate_reviews, RawActivityRecord, RawProfileRecord,
    RawReviewRecord, StatsRequest, ValidStatsRequest, DATE_FORMAT,
};
pub use profile::ProfileRecord;
pub use review::{ReviewRecord, MAX_RATING, MIN_RATING};
