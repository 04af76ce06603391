//! Average review rating.

use crate::core::ReviewRecord;

/// Round to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Mean rating rounded to one decimal, or 0.0 when there are no reviews.
///
/// 0.0 means "no rating"; pair it with the review count before rendering.
pub fn average_rating(reviews: &[ReviewRecord]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }

    let total: f64 = reviews.iter().map(|r| r.rating).sum();
    round_to_tenth(total / reviews.len() as f64)
}
