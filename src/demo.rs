//! Demo data for Chairside.
//!
//! A deterministic generator of plausible activity logs plus a small sample
//! directory of eight professionals. This is fixture machinery for demos and
//! tests; the stats engine does not depend on it.
//!
//! The generator is seeded from the profile id, so the same id and as-of date
//! always produce the same log.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{ActivityCategory, ActivityRecord, EffortLevel, ProfileRecord, ReviewRecord};

/// Days before the as-of date covered by generated logs.
pub const HISTORY_DAYS: i64 = 365;

/// How often a demo profile logs activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    High,
    Medium,
    Low,
}

impl ActivityLevel {
    /// Probability that a given day has any activity.
    pub fn daily_chance(&self) -> f64 {
        match self {
            ActivityLevel::High => 0.7,
            ActivityLevel::Medium => 0.55,
            ActivityLevel::Low => 0.3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::High => "high",
            ActivityLevel::Medium => "medium",
            ActivityLevel::Low => "low",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(ActivityLevel::High),
            "medium" => Ok(ActivityLevel::Medium),
            "low" => Ok(ActivityLevel::Low),
            other => Err(format!("unknown activity level '{}'", other)),
        }
    }
}

/// Sin-based sequence seeded from the profile id.
///
/// Not a quality generator. It only has to be stable across runs.
struct SeededSequence {
    seed: f64,
}

impl SeededSequence {
    fn for_profile(profile_id: &str) -> Self {
        let seed: u32 = profile_id.encode_utf16().map(u32::from).sum();
        Self {
            seed: f64::from(seed),
        }
    }

    /// Next value in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        let x = self.seed.sin() * 10000.0;
        self.seed += 1.0;
        x - x.floor()
    }

    /// Next index into a slice of `len` items.
    fn next_index(&mut self, len: usize) -> usize {
        ((self.next_f64() * len as f64).floor() as usize).min(len.saturating_sub(1))
    }
}

fn descriptions(category: ActivityCategory) -> &'static [&'static str] {
    match category {
        ActivityCategory::PatientCare => &[
            "Routine check-up and cleaning",
            "Complex root canal procedure",
            "Wisdom tooth extraction",
            "Dental implant surgery",
            "Pediatric dental examination",
            "Fitted new set of ceramic braces",
            "Cosmetic bonding on anterior teeth",
        ],
        ActivityCategory::ContinuingEducation => &[
            "Attended webinar on modern endodontics",
            "Completed course on cosmetic dentistry",
            "Studied new orthodontic techniques",
            "Read research paper on periodontal disease",
            "Workshop on digital implant planning",
        ],
        ActivityCategory::Research => &[
            "Analyzed data for clinical trial on new bonding agent",
            "Wrote abstract for dental conference",
            "Collaborated on a new biomaterial study",
            "Peer-reviewed a journal submission",
        ],
        ActivityCategory::CommunityOutreach => &[
            "Volunteered at local school for dental hygiene day",
            "Presented at a community health fair",
            "Provided free screenings at a senior center",
            "Conducted oral cancer screening camp",
        ],
        ActivityCategory::AdministrativeWork => &[
            "Updated patient records system",
            "Managed clinic inventory and ordering",
            "Conducted staff training session",
            "Finalized quarterly financial reports",
        ],
    }
}

/// Generate a year of activity ending at `as_of`, newest first.
///
/// Each active day gets one or two records with ids of the form
/// `{date}-{n}-{profile_id}`.
pub fn generate_activities(
    profile_id: &str,
    level: ActivityLevel,
    as_of: NaiveDate,
) -> Vec<ActivityRecord> {
    let mut rng = SeededSequence::for_profile(profile_id);
    let categories = ActivityCategory::all();
    let mut activities = Vec::new();

    for days_ago in (0..=HISTORY_DAYS).rev() {
        let date = as_of - Duration::days(days_ago);

        if rng.next_f64() >= level.daily_chance() {
            continue;
        }

        let per_day = rng.next_index(2) + 1;
        for n in 0..per_day {
            let category = categories[rng.next_index(categories.len())];
            let options = descriptions(category);
            let description = options[rng.next_index(options.len())];
            let effort = (rng.next_f64() * 4.0).ceil() as u8;

            activities.push(
                ActivityRecord::new(
                    format!("{}-{}-{}", date, n, profile_id),
                    date,
                    category,
                    EffortLevel::saturating(effort),
                )
                .with_description(description),
            );
        }
    }

    activities.sort_by(|a, b| b.date.cmp(&a.date));
    tracing::debug!(
        profile_id,
        level = %level,
        records = activities.len(),
        "generated demo activity"
    );
    activities
}

/// A sample professional.
#[derive(Debug, Clone, Copy)]
pub struct DemoProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub level: ActivityLevel,
}

/// The sample directory.
pub const DEMO_PROFILES: &[DemoProfile] = &[
    DemoProfile {
        id: "evelyn-reed",
        name: "Dr. Evelyn Reed",
        title: "Orthodontist & Dental Surgeon",
        level: ActivityLevel::Medium,
    },
    DemoProfile {
        id: "arjun-sharma",
        name: "Dr. Arjun Sharma",
        title: "Prosthodontist & Implant Specialist",
        level: ActivityLevel::High,
    },
    DemoProfile {
        id: "priya-verma",
        name: "Dr. Priya Verma",
        title: "Pediatric Dentist & Community Health Advocate",
        level: ActivityLevel::High,
    },
    DemoProfile {
        id: "kenji-tanaka",
        name: "Dr. Kenji Tanaka",
        title: "Endodontist & Researcher",
        level: ActivityLevel::Medium,
    },
    DemoProfile {
        id: "maria-garcia",
        name: "Dr. Maria Garcia",
        title: "General & Cosmetic Dentist",
        level: ActivityLevel::High,
    },
    DemoProfile {
        id: "samuel-chen",
        name: "Dr. Samuel Chen",
        title: "Periodontist",
        level: ActivityLevel::Low,
    },
    DemoProfile {
        id: "lena-weber",
        name: "Dr. Lena Weber",
        title: "Periodontist & Regenerative Specialist",
        level: ActivityLevel::Low,
    },
    DemoProfile {
        id: "carlos-rossi",
        name: "Dr. Carlos Rossi",
        title: "General Dentist & Community Health Leader",
        level: ActivityLevel::High,
    },
];

/// Activity level of a sample profile; unknown ids are medium.
pub fn activity_level_for(profile_id: &str) -> ActivityLevel {
    DEMO_PROFILES
        .iter()
        .find(|p| p.id == profile_id)
        .map(|p| p.level)
        .unwrap_or(ActivityLevel::Medium)
}

type SampleReview = (&'static str, f64, &'static str, (i32, u32, u32));

fn sample_reviews(profile_id: &str) -> &'static [SampleReview] {
    match profile_id {
        "evelyn-reed" => &[
            ("The Miller Family", 5.0, "Dr. Reed is fantastic with kids! She made my son's first experience with braces a positive one.", (2023, 10, 15)),
            ("James P.", 5.0, "Invisalign treatment was smooth and the results are incredible. Highly recommend.", (2023, 8, 22)),
            ("Chloe T.", 4.0, "The treatment took a bit longer than expected, but the results are great. The staff is very friendly.", (2023, 6, 11)),
        ],
        "arjun-sharma" => &[
            ("Aarav Singh", 5.0, "Dr. Sharma restored my smile with implants. His attention to detail is second to none. A true artist.", (2023, 11, 1)),
            ("Sunita K.", 5.0, "The Digital Smile Design process was fascinating, and I couldn't be happier with my new veneers.", (2023, 9, 10)),
            ("Vikram Patel", 4.0, "Excellent work on my crowns. The clinic is very modern. A bit on the expensive side, but worth it.", (2023, 7, 20)),
        ],
        "priya-verma" => &[
            ("Rohan's Mother", 5.0, "Dr. Verma is a magician with children. My anxious son now looks forward to his dental visits!", (2023, 11, 5)),
            ("Community School Principal", 5.0, "The dental health camp Dr. Verma organized was a huge success. She is a great asset to our community.", (2023, 7, 18)),
            ("Anjali Rao", 4.0, "Very patient and kind with my daughter. The waiting time can sometimes be long.", (2023, 9, 2)),
        ],
        "kenji-tanaka" => &[
            ("Yuki S.", 5.0, "Saved a tooth other dentists said was lost. Dr. Tanaka's microscopic surgery is amazing.", (2023, 9, 28)),
            ("Akira M.", 4.0, "Very professional and highly skilled. The procedure was complex but he handled it well.", (2023, 10, 12)),
        ],
        "maria-garcia" => &[
            ("Sophia L.", 5.0, "I'm so confident with my smile now, thanks to Dr. Garcia. The whitening and bonding work was perfect.", (2023, 10, 20)),
            ("Carlos R.", 4.0, "Good results on my veneers. The clinic is beautiful and modern. Follow-up scheduling was a bit difficult.", (2023, 8, 15)),
            ("Isabella M.", 3.0, "The final result was okay, but the process felt rushed and I didn't feel my concerns were fully heard at first.", (2023, 5, 30)),
        ],
        "samuel-chen" => &[
            ("David H.", 5.0, "Dr. Chen is an expert periodontist. The implant surgery was painless and the results are perfect.", (2023, 6, 12)),
            ("Linda W.", 4.0, "Very knowledgeable professor. He explained my gum condition clearly.", (2023, 9, 5)),
        ],
        "lena-weber" => &[
            ("Klaus M.", 5.0, "The regenerative procedure for my gums was a success. Dr. Weber used the latest techniques and explained everything.", (2023, 8, 4)),
            ("Anna S.", 5.0, "A true professional. She is very thorough and her approach is very scientific and reassuring.", (2023, 10, 18)),
        ],
        "carlos-rossi" => &[
            ("Isabela F.", 5.0, "Dr. Rossi provides excellent, compassionate care. His work in the community is inspiring.", (2023, 10, 2)),
            ("Miguel A.", 4.0, "Great dentist for regular check-ups. The mobile clinic is an amazing idea, though sometimes the equipment is limited.", (2023, 7, 11)),
        ],
        _ => &[],
    }
}

/// Reviews of a sample profile; empty for unknown ids.
pub fn reviews_for(profile_id: &str) -> Vec<ReviewRecord> {
    sample_reviews(profile_id)
        .iter()
        .map(|(patient, rating, comment, (y, m, d))| {
            let review = ReviewRecord::new(*rating).with_comment(*patient, *comment);
            match NaiveDate::from_ymd_opt(*y, *m, *d) {
                Some(date) => review.with_date(date),
                None => review,
            }
        })
        .collect()
}

/// Build one sample profile with generated activity.
pub fn profile(demo: &DemoProfile, as_of: NaiveDate) -> ProfileRecord {
    let mut profile = ProfileRecord::new(demo.id, demo.name);
    profile.activities = generate_activities(demo.id, demo.level, as_of);
    profile.reviews = reviews_for(demo.id);
    profile
}

/// The full sample directory as of a date, in directory order.
pub fn directory(as_of: NaiveDate) -> Vec<ProfileRecord> {
    DEMO_PROFILES.iter().map(|demo| profile(demo, as_of)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::compute_stats;
    use std::collections::HashSet;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate_activities("evelyn-reed", ActivityLevel::Medium, today());
        let b = generate_activities("evelyn-reed", ActivityLevel::Medium, today());
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn test_different_ids_differ() {
        let a = generate_activities("evelyn-reed", ActivityLevel::High, today());
        let b = generate_activities("arjun-sharma", ActivityLevel::High, today());
        assert_ne!(a, b);
    }

    #[test]
    fn test_records_are_well_formed() {
        let activities = generate_activities("kenji-tanaka", ActivityLevel::High, today());
        let earliest = today() - Duration::days(HISTORY_DAYS);

        let mut ids = HashSet::new();
        for activity in &activities {
            assert!(activity.date >= earliest && activity.date <= today());
            assert!((1..=4).contains(&activity.effort_level.get()));
            assert!(descriptions(activity.category).contains(&activity.description.as_str()));
            assert!(activity.id.starts_with(&activity.date.to_string()));
            assert!(activity.id.ends_with("-kenji-tanaka"));
            assert!(ids.insert(activity.id.clone()), "duplicate id {}", activity.id);
        }
    }

    #[test]
    fn test_sorted_newest_first() {
        let activities = generate_activities("maria-garcia", ActivityLevel::High, today());
        assert!(activities.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[test]
    fn test_level_changes_volume() {
        let high = generate_activities("lena-weber", ActivityLevel::High, today());
        let low = generate_activities("lena-weber", ActivityLevel::Low, today());
        assert!(high.len() > low.len());
    }

    #[test]
    fn test_sequence_stays_in_unit_interval() {
        let mut rng = SeededSequence::for_profile("samuel-chen");
        for _ in 0..2000 {
            let x = rng.next_f64();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_directory() {
        let profiles = directory(today());
        assert_eq!(profiles.len(), 8);
        assert_eq!(profiles[0].id, "evelyn-reed");
        assert_eq!(profiles[0].reviews.len(), 3);

        let report = compute_stats(&profiles[0].activities, &profiles[0].reviews, today());
        assert_eq!(report.stats.average_rating, 4.7);
        assert_eq!(report.stats.total_contributions, profiles[0].activities.len());
    }

    #[test]
    fn test_sample_ratings() {
        let ratings = |id: &str| -> Vec<f64> { reviews_for(id).iter().map(|r| r.rating).collect() };
        assert_eq!(ratings("maria-garcia"), vec![5.0, 4.0, 3.0]);
        assert_eq!(ratings("kenji-tanaka"), vec![5.0, 4.0]);
        assert!(ratings("nobody").is_empty());
    }

    #[test]
    fn test_activity_level_lookup() {
        assert_eq!(activity_level_for("samuel-chen"), ActivityLevel::Low);
        assert_eq!(activity_level_for("carlos-rossi"), ActivityLevel::High);
        assert_eq!(activity_level_for("unknown"), ActivityLevel::Medium);
        assert_eq!("HIGH".parse::<ActivityLevel>().unwrap(), ActivityLevel::High);
        assert!("extreme".parse::<ActivityLevel>().is_err());
    }
}
