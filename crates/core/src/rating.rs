//! Review rating bounds and aggregate math.

use crate::error::CoreError;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Reject ratings outside `1..=5`.
pub fn validate_rating(rating: i32) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )))
    }
}

/// Arithmetic mean of the ratings, or `0.0` when there are none.
pub fn average_rating<I>(ratings: I) -> f64
where
    I: IntoIterator<Item = i32>,
{
    let (sum, count) = ratings
        .into_iter()
        .fold((0i64, 0u32), |(sum, count), r| (sum + i64::from(r), count + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / f64::from(count)
    }
}

/// Number of filled stars for an average: rounded to nearest, within `0..=5`.
pub fn star_count(average: f64) -> u8 {
    if !average.is_finite() {
        return 0;
    }
    average.round().clamp(0.0, f64::from(MAX_RATING)) as u8
}
