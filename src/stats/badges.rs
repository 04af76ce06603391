//! Badge catalog and unlocking.
//!
//! A badge is earned when the holder's stats cross a fixed threshold. The
//! catalog is an ordered table of definitions, each carrying a rule; every
//! qualifying badge is returned in catalog order. Tiers are independent, so
//! holding the 250-contribution badge also means holding 50 and 100.
//!
//! Earned status is recomputed from current stats on every call. A badge is
//! never "awarded once".

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::core::{ActivityCategory, ActivityRecord};
use crate::error::{ChairsideError, Result};

/// Unlock rule for a badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BadgeRule {
    /// Total activity records `>= min`.
    Contributions { min: usize },
    /// Longest streak `>= min` days. A broken streak keeps its badge.
    LongestStreak { min: u32 },
    /// Records in `category` `>= min`.
    Category {
        category: ActivityCategory,
        min: usize,
    },
}

impl BadgeRule {
    /// The presentation family of this rule.
    pub fn kind(&self) -> BadgeKind {
        match self {
            BadgeRule::Contributions { .. } => BadgeKind::Contributions,
            BadgeRule::LongestStreak { .. } => BadgeKind::Streak,
            BadgeRule::Category { .. } => BadgeKind::Category,
        }
    }

    /// Short human-readable requirement.
    pub fn describe(&self) -> String {
        match self {
            BadgeRule::Contributions { min } => format!("{}+ contributions", min),
            BadgeRule::LongestStreak { min } => format!("{}-day streak", min),
            BadgeRule::Category { category, min } => format!("{}+ {} activities", min, category),
        }
    }

    /// Whether the facts satisfy this rule.
    pub fn is_met(&self, facts: &BadgeFacts) -> bool {
        match self {
            BadgeRule::Contributions { min } => facts.total_contributions >= *min,
            BadgeRule::LongestStreak { min } => facts.longest_streak >= *min,
            BadgeRule::Category { category, min } => facts.category_count(*category) >= *min,
        }
    }
}

/// Presentation family of a badge. Callers map it to an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    Contributions,
    Streak,
    Category,
}

impl BadgeKind {
    /// Get the display name for this kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            BadgeKind::Contributions => "Contributions",
            BadgeKind::Streak => "Streak",
            BadgeKind::Category => "Category",
        }
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rule: BadgeRule,
}

impl BadgeDefinition {
    /// Create a catalog entry.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        rule: BadgeRule,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            rule,
        }
    }

    /// The earned form of this badge.
    pub fn to_badge(&self) -> Badge {
        Badge {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            kind: self.rule.kind(),
        }
    }
}

/// An earned badge as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: BadgeKind,
}

/// The stats badge rules are evaluated against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BadgeFacts {
    pub total_contributions: usize,
    pub longest_streak: u32,
    pub category_counts: BTreeMap<ActivityCategory, usize>,
}

impl BadgeFacts {
    /// Records in one category (0 if none).
    pub fn category_count(&self, category: ActivityCategory) -> usize {
        self.category_counts.get(&category).copied().unwrap_or(0)
    }
}

/// Count records per category.
pub fn category_counts(activities: &[ActivityRecord]) -> BTreeMap<ActivityCategory, usize> {
    let mut counts = BTreeMap::new();
    for activity in activities {
        *counts.entry(activity.category).or_insert(0) += 1;
    }
    counts
}

/// Default badge catalog.
pub fn default_catalog() -> Vec<BadgeDefinition> {
    vec![
        BadgeDefinition::new(
            "contrib-50",
            "Committed Contributor",
            "Made 50 total contributions.",
            BadgeRule::Contributions { min: 50 },
        ),
        BadgeDefinition::new(
            "contrib-100",
            "Century Contributor",
            "Made 100 total contributions.",
            BadgeRule::Contributions { min: 100 },
        ),
        BadgeDefinition::new(
            "contrib-250",
            "Dedicated Professional",
            "Made 250 total contributions.",
            BadgeRule::Contributions { min: 250 },
        ),
        BadgeDefinition::new(
            "streak-7",
            "Weekly Warrior",
            "Maintained a 7-day contribution streak.",
            BadgeRule::LongestStreak { min: 7 },
        ),
        BadgeDefinition::new(
            "streak-30",
            "Monthly Motivator",
            "Maintained a 30-day contribution streak.",
            BadgeRule::LongestStreak { min: 30 },
        ),
        BadgeDefinition::new(
            "streak-100",
            "Centurion Streak",
            "Maintained an incredible 100-day contribution streak!",
            BadgeRule::LongestStreak { min: 100 },
        ),
        BadgeDefinition::new(
            "cat-edu-20",
            "Lifelong Learner",
            "Logged 20+ Continuing Education activities.",
            BadgeRule::Category {
                category: ActivityCategory::ContinuingEducation,
                min: 20,
            },
        ),
        BadgeDefinition::new(
            "cat-comm-20",
            "Community Champion",
            "Logged 20+ Community Outreach activities.",
            BadgeRule::Category {
                category: ActivityCategory::CommunityOutreach,
                min: 20,
            },
        ),
    ]
}

/// Evaluate a catalog, returning earned badges in catalog order.
pub fn evaluate(catalog: &[BadgeDefinition], facts: &BadgeFacts) -> Vec<Badge> {
    catalog
        .iter()
        .filter(|def| def.rule.is_met(facts))
        .map(BadgeDefinition::to_badge)
        .collect()
}

/// Validate a catalog: ids must be non-empty and unique.
pub fn validate_catalog(catalog: &[BadgeDefinition]) -> Result<()> {
    let mut seen = HashSet::new();
    for def in catalog {
        if def.id.trim().is_empty() {
            return Err(ChairsideError::config(format!(
                "badge '{}' has an empty id",
                def.name
            )));
        }
        if !seen.insert(def.id.as_str()) {
            return Err(ChairsideError::config(format!(
                "duplicate badge id '{}'",
                def.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(total: usize, longest: u32) -> BadgeFacts {
        BadgeFacts {
            total_contributions: total,
            longest_streak: longest,
            category_counts: BTreeMap::new(),
        }
    }

    fn ids(badges: &[Badge]) -> Vec<&str> {
        badges.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_no_facts_no_badges() {
        assert!(evaluate(&default_catalog(), &BadgeFacts::default()).is_empty());
    }

    #[test]
    fn test_contribution_tiers() {
        let catalog = default_catalog();
        assert!(evaluate(&catalog, &facts(49, 0)).is_empty());
        assert_eq!(ids(&evaluate(&catalog, &facts(50, 0))), vec!["contrib-50"]);
        assert_eq!(
            ids(&evaluate(&catalog, &facts(250, 0))),
            vec!["contrib-50", "contrib-100", "contrib-250"]
        );
    }

    #[test]
    fn test_streak_tiers_use_longest() {
        let catalog = default_catalog();
        assert_eq!(ids(&evaluate(&catalog, &facts(0, 6))), Vec::<&str>::new());
        assert_eq!(
            ids(&evaluate(&catalog, &facts(0, 30))),
            vec!["streak-7", "streak-30"]
        );
        assert_eq!(evaluate(&catalog, &facts(0, 100)).len(), 3);
    }

    #[test]
    fn test_category_badges() {
        let catalog = default_catalog();
        let mut f = BadgeFacts::default();
        f.category_counts
            .insert(ActivityCategory::ContinuingEducation, 19);
        assert!(evaluate(&catalog, &f).is_empty());

        f.category_counts
            .insert(ActivityCategory::ContinuingEducation, 20);
        f.category_counts.insert(ActivityCategory::CommunityOutreach, 25);
        assert_eq!(
            ids(&evaluate(&catalog, &f)),
            vec!["cat-edu-20", "cat-comm-20"]
        );
    }

    #[test]
    fn test_order_follows_catalog_not_significance() {
        let mut f = facts(100, 7);
        f.category_counts.insert(ActivityCategory::CommunityOutreach, 20);
        assert_eq!(
            ids(&evaluate(&default_catalog(), &f)),
            vec!["contrib-50", "contrib-100", "streak-7", "cat-comm-20"]
        );
    }

    #[test]
    fn test_rule_describe() {
        let catalog = default_catalog();
        assert_eq!(catalog[0].rule.describe(), "50+ contributions");
        assert_eq!(catalog[3].rule.describe(), "7-day streak");
        assert_eq!(
            catalog[6].rule.describe(),
            "20+ Continuing Education activities"
        );
    }

    #[test]
    fn test_badge_kind() {
        let badges = evaluate(&default_catalog(), &facts(50, 7));
        assert_eq!(badges[0].kind, BadgeKind::Contributions);
        assert_eq!(badges[1].kind, BadgeKind::Streak);
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = vec![BadgeDefinition::new(
            "research-5",
            "Published",
            "Logged 5 research activities.",
            BadgeRule::Category {
                category: ActivityCategory::Research,
                min: 5,
            },
        )];
        let mut f = BadgeFacts::default();
        f.category_counts.insert(ActivityCategory::Research, 5);
        assert_eq!(ids(&evaluate(&catalog, &f)), vec!["research-5"]);
    }

    #[test]
    fn test_validate_catalog() {
        assert!(validate_catalog(&default_catalog()).is_ok());

        let mut dup = default_catalog();
        dup.push(dup[0].clone());
        assert!(validate_catalog(&dup).is_err());

        let blank = vec![BadgeDefinition::new(
            " ",
            "Blank",
            "",
            BadgeRule::Contributions { min: 1 },
        )];
        assert!(validate_catalog(&blank).is_err());
    }

    #[test]
    fn test_rule_serializes_with_kind_tag() {
        let rule = BadgeRule::Category {
            category: ActivityCategory::ContinuingEducation,
            min: 20,
        };
        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(value["kind"], "category");
        assert_eq!(value["category"], "Continuing Education");
        assert_eq!(value["min"], 20);
    }
}
