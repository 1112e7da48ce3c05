//! Trust-factor scoring.
//!
//! The trust factor is a 64-bit integer with no floor or ceiling of its own.
//! It moves only through the bonuses and manual step defined here. Values
//! an admin sets directly are limited to [`MAX_ASSIGNED_TRUST_FACTOR`] in
//! magnitude, leaving the increments room that cannot overflow.

use crate::error::CoreError;
use crate::rating::MAX_RATING;

/// Trust factor assigned to a new hero when none is supplied.
pub const DEFAULT_TRUST_FACTOR: i64 = 50;

/// Awarded to the assigned hero when a mission is completed.
pub const MISSION_COMPLETION_TRUST_BONUS: i64 = 5;

/// Awarded to a hero for each 5-star review.
pub const FIVE_STAR_REVIEW_TRUST_BONUS: i64 = 2;

/// Size of one manual admin adjustment.
pub const MANUAL_ADJUSTMENT_STEP: i64 = 1;

/// Largest magnitude an admin may assign directly.
pub const MAX_ASSIGNED_TRUST_FACTOR: i64 = i32::MAX as i64;

/// Missions needed per hero level.
pub const MISSIONS_PER_LEVEL: i32 = 10;

/// Trust bonus earned by a review with the given rating.
pub fn review_trust_bonus(rating: i32) -> i64 {
    if rating == MAX_RATING {
        FIVE_STAR_REVIEW_TRUST_BONUS
    } else {
        0
    }
}

/// Accept only a single `+1` or `-1` step.
pub fn validate_manual_adjustment(delta: i64) -> Result<i64, CoreError> {
    if delta.abs() == MANUAL_ADJUSTMENT_STEP {
        Ok(delta)
    } else {
        Err(CoreError::Validation(format!(
            "Trust adjustments must be +{MANUAL_ADJUSTMENT_STEP} or -{MANUAL_ADJUSTMENT_STEP}, got {delta}"
        )))
    }
}

/// Accept a directly assigned trust factor within
/// `-MAX_ASSIGNED_TRUST_FACTOR..=MAX_ASSIGNED_TRUST_FACTOR`.
pub fn validate_assigned_trust(value: i64) -> Result<i64, CoreError> {
    if value.abs() <= MAX_ASSIGNED_TRUST_FACTOR {
        Ok(value)
    } else {
        Err(CoreError::Validation(format!(
            "trustFactor must be between -{MAX_ASSIGNED_TRUST_FACTOR} and {MAX_ASSIGNED_TRUST_FACTOR}"
        )))
    }
}

/// Level shown on a hero profile, starting at 1.
pub fn hero_level(missions_completed: i32) -> i32 {
    missions_completed.max(0) / MISSIONS_PER_LEVEL + 1
}
