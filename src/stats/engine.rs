//! The stats engine.
//!
//! Converts one professional's activity log and reviews into a
//! [`ProfileStats`] summary and the list of earned badges. The computation
//! is a pure function of its inputs: the as-of date is always injected, and
//! the result does not depend on input order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::badges::{self, Badge, BadgeDefinition, BadgeFacts};
use super::levels::{level_for_points, next_level_for_points, LevelTier, NextLevel};
use super::rating::average_rating;
use super::streaks;
use crate::config::Config;
use crate::error::Result;
use crate::core::{ActivityRecord, ReviewRecord};

/// Derived profile summary. Recomputed on every call, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub total_contributions: usize,
    pub longest_streak: u32,
    pub current_streak: u32,
    pub points: u64,
    pub level: u32,
    pub level_name: String,
    /// Mean rating to one decimal; 0 when `review_count` is 0.
    pub average_rating: f64,
    pub review_count: usize,
    /// `None` at the top tier.
    pub next_level: Option<NextLevel>,
}

/// Engine output: `{ stats, badges }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub stats: ProfileStats,
    pub badges: Vec<Badge>,
}

/// The stats engine, holding the scoring tables it evaluates against.
#[derive(Debug, Clone)]
pub struct StatsEngine {
    points_per_effort_level: u64,
    levels: Vec<LevelTier>,
    window_days: u32,
    catalog: Vec<BadgeDefinition>,
}

impl Default for StatsEngine {
    fn default() -> Self {
        Self::from_validated(&Config::default())
    }
}

impl StatsEngine {
    /// Create an engine from configuration.
    ///
    /// # Errors
    ///
    /// Returns a config error if the configuration fails
    /// [`Config::validate`], e.g. an empty level table.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: &Config) -> Self {
        Self {
            points_per_effort_level: config.scoring.points_per_effort_level,
            levels: config.scoring.levels.clone(),
            window_days: config.streaks.window_days,
            catalog: config.badges.catalog.clone(),
        }
    }

    /// The badge catalog this engine evaluates.
    pub fn catalog(&self) -> &[BadgeDefinition] {
        &self.catalog
    }

    /// The level table this engine uses.
    pub fn levels(&self) -> &[LevelTier] {
        &self.levels
    }

    /// Points for an activity list: `sum(effort_level * multiplier)`.
    pub fn points(&self, activities: &[ActivityRecord]) -> u64 {
        activities
            .iter()
            .map(|a| u64::from(a.effort_level.get()) * self.points_per_effort_level)
            .sum()
    }

    /// Compute stats and earned badges.
    ///
    /// Empty inputs are not errors: they yield zero-valued stats at the first
    /// level and no badges.
    pub fn compute(
        &self,
        activities: &[ActivityRecord],
        reviews: &[ReviewRecord],
        as_of: NaiveDate,
    ) -> StatsReport {
        let points = self.points(activities);
        let streaks = streaks::summarize(activities, as_of, self.window_days);

        // The level table is validated non-empty.
        let (level, level_name) = level_for_points(&self.levels, points)
            .map(|tier| (tier.level, tier.name.clone()))
            .unwrap_or((1, String::new()));
        let next_level =
            next_level_for_points(&self.levels, points).map(|tier| NextLevel::toward(tier, points));

        let stats = ProfileStats {
            total_contributions: activities.len(),
            longest_streak: streaks.longest,
            current_streak: streaks.current,
            points,
            level,
            level_name,
            average_rating: average_rating(reviews),
            review_count: reviews.len(),
            next_level,
        };

        let facts = BadgeFacts {
            total_contributions: stats.total_contributions,
            longest_streak: stats.longest_streak,
            category_counts: badges::category_counts(activities),
        };
        let badges = badges::evaluate(&self.catalog, &facts);

        tracing::debug!(
            contributions = stats.total_contributions,
            points = stats.points,
            level = stats.level,
            current_streak = stats.current_streak,
            longest_streak = stats.longest_streak,
            badges = badges.len(),
            %as_of,
            "computed profile stats"
        );

        StatsReport { stats, badges }
    }
}

/// Compute stats with the default tables.
pub fn compute_stats(
    activities: &[ActivityRecord],
    reviews: &[ReviewRecord],
    as_of: NaiveDate,
) -> StatsReport {
    StatsEngine::default().compute(activities, reviews, as_of)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActivityCategory, EffortLevel};
    use chrono::Duration;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn activity(id: usize, days_ago: i64, category: ActivityCategory, effort: u8) -> ActivityRecord {
        ActivityRecord::new(
            format!("a{}", id),
            today() - Duration::days(days_ago),
            category,
            EffortLevel::new(effort).unwrap(),
        )
    }

    /// `n` records, one per day going back from `start_days_ago`.
    fn daily(n: usize, start_days_ago: i64, category: ActivityCategory) -> Vec<ActivityRecord> {
        (0..n)
            .map(|i| activity(i, start_days_ago + i as i64, category, 1))
            .collect()
    }

    /// `n` records spread every other day so no streak badge is earned.
    fn sparse(n: usize, category: ActivityCategory) -> Vec<ActivityRecord> {
        (0..n)
            .map(|i| activity(i, (i as i64) * 2, category, 1))
            .collect()
    }

    fn badge_ids(report: &StatsReport) -> Vec<&str> {
        report.badges.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_empty_inputs_zero_state() {
        let report = compute_stats(&[], &[], today());
        let stats = &report.stats;

        assert_eq!(stats.total_contributions, 0);
        assert_eq!(stats.points, 0);
        assert_eq!(stats.level, 1);
        assert_eq!(stats.level_name, "New Graduate");
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 0);
        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(stats.review_count, 0);
        assert!(report.badges.is_empty());
    }

    #[test]
    fn test_points_and_level() {
        let activities: Vec<ActivityRecord> = (0..20)
            .map(|i| activity(i, i as i64 * 3, ActivityCategory::PatientCare, 4))
            .collect();
        let report = compute_stats(&activities, &[], today());

        assert_eq!(report.stats.points, 800);
        assert_eq!(report.stats.level, 2);
        assert_eq!(report.stats.level_name, "Resident");
        let next = report.stats.next_level.unwrap();
        assert_eq!(next.level_name, "Associate Dentist");
        assert_eq!(next.points_remaining, 700);
    }

    #[test]
    fn test_streak_scenarios() {
        let consecutive = vec![
            activity(0, 0, ActivityCategory::PatientCare, 1),
            activity(1, 1, ActivityCategory::PatientCare, 1),
            activity(2, 2, ActivityCategory::PatientCare, 1),
            activity(3, 4, ActivityCategory::PatientCare, 1),
        ];
        assert_eq!(compute_stats(&consecutive, &[], today()).stats.current_streak, 3);

        let old_run = daily(6, 5, ActivityCategory::PatientCare);
        let stats = compute_stats(&old_run, &[], today()).stats;
        assert_eq!(stats.current_streak, 0);
        assert!(stats.longest_streak >= 6);
    }

    #[test]
    fn test_contribution_badges() {
        let report = compute_stats(&sparse(49, ActivityCategory::PatientCare), &[], today());
        assert!(!badge_ids(&report).contains(&"contrib-50"));

        let report = compute_stats(&sparse(50, ActivityCategory::PatientCare), &[], today());
        assert!(badge_ids(&report).contains(&"contrib-50"));

        let report = compute_stats(&sparse(250, ActivityCategory::PatientCare), &[], today());
        assert_eq!(
            badge_ids(&report),
            vec!["contrib-50", "contrib-100", "contrib-250"]
        );
    }

    #[test]
    fn test_lifelong_learner_threshold() {
        let report = compute_stats(
            &sparse(20, ActivityCategory::ContinuingEducation),
            &[],
            today(),
        );
        assert_eq!(badge_ids(&report), vec!["cat-edu-20"]);
        assert_eq!(report.badges[0].name, "Lifelong Learner");

        let report = compute_stats(
            &sparse(19, ActivityCategory::ContinuingEducation),
            &[],
            today(),
        );
        assert!(report.badges.is_empty());
    }

    #[test]
    fn test_broken_streak_keeps_badge() {
        let report = compute_stats(&daily(8, 30, ActivityCategory::PatientCare), &[], today());
        assert_eq!(report.stats.current_streak, 0);
        assert_eq!(badge_ids(&report), vec!["streak-7"]);
    }

    #[test]
    fn test_average_rating() {
        let reviews: Vec<ReviewRecord> = [5.0, 5.0, 4.0].iter().map(|r| ReviewRecord::new(*r)).collect();
        let report = compute_stats(&[], &reviews, today());
        assert_eq!(report.stats.average_rating, 4.7);
        assert_eq!(report.stats.review_count, 3);
    }

    #[test]
    fn test_custom_config_tables() {
        let mut config = Config::default();
        config.scoring.points_per_effort_level = 100;
        config.streaks.window_days = 3;
        let engine = StatsEngine::new(&config).unwrap();

        let activities = daily(5, 0, ActivityCategory::PatientCare);
        let report = engine.compute(&activities, &[], today());
        assert_eq!(report.stats.points, 500);
        assert_eq!(report.stats.level_name, "Resident");
        assert_eq!(report.stats.current_streak, 3);
        assert_eq!(report.stats.longest_streak, 3);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = Config::default();
        config.scoring.levels.clear();
        let err = StatsEngine::new(&config).unwrap_err();
        assert!(err.to_string().contains("level table is empty"));

        let mut config = Config::default();
        config.goals.window_days = u32::MAX;
        assert!(StatsEngine::new(&config).is_err());
    }

    #[test]
    fn test_report_json_shape() {
        let report = compute_stats(&daily(7, 0, ActivityCategory::PatientCare), &[], today());
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["stats"]["totalContributions"], 7);
        assert_eq!(value["stats"]["currentStreak"], 7);
        assert_eq!(value["stats"]["levelName"], "New Graduate");
        assert_eq!(value["stats"]["nextLevel"]["pointsRemaining"], 430);
        assert_eq!(value["badges"][0]["id"], "streak-7");
        assert_eq!(value["badges"][0]["kind"], "streak");
    }

    fn arb_activities() -> impl Strategy<Value = Vec<ActivityRecord>> {
        prop::collection::vec((0i64..120, 0usize..5, 1u8..=4), 0..150).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (days_ago, cat, effort))| {
                    activity(i, days_ago, ActivityCategory::all()[cat], effort)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_total_and_points(activities in arb_activities()) {
            let stats = compute_stats(&activities, &[], today()).stats;
            let expected: u64 = activities.iter().map(|a| a.effort_level.get() as u64 * 10).sum();
            prop_assert_eq!(stats.total_contributions, activities.len());
            prop_assert_eq!(stats.points, expected);
        }

        #[test]
        fn prop_points_scale_with_multiplier(activities in arb_activities(), k in 1u64..6) {
            let mut config = Config::default();
            config.scoring.points_per_effort_level = 10 * k;
            let scaled = StatsEngine::new(&config).unwrap().points(&activities);
            let base = StatsEngine::default().points(&activities);
            prop_assert_eq!(scaled, base * k);
        }

        #[test]
        fn prop_order_independent(activities in arb_activities(), seed in any::<u64>()) {
            let mut shuffled = activities.clone();
            // Deterministic rotate plus reverse covers reorderings without an RNG.
            if !shuffled.is_empty() {
                let mid = (seed as usize) % shuffled.len();
                shuffled.rotate_left(mid);
            }
            shuffled.reverse();

            let a = compute_stats(&activities, &[], today());
            let b = compute_stats(&shuffled, &[], today());
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_idempotent(activities in arb_activities()) {
            let engine = StatsEngine::default();
            let first = engine.compute(&activities, &[], today());
            let second = engine.compute(&activities, &[], today());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_current_never_exceeds_longest(activities in arb_activities()) {
            let stats = compute_stats(&activities, &[], today()).stats;
            prop_assert!(stats.current_streak <= stats.longest_streak);
        }
    }
}
