//! Rating bounds and the derived average.
//!
//! A movie's `average_rating` is `None` while it has no ratings. A single rating
//! of `0` yields `Some(0.0)`; the two states are never merged.
//!
//! Rounding is half away from zero at two decimals (`f64::round` on the mean
//! scaled by 100). Ratings are never negative, so this is the same as rounding
//! half up: a mean of `4.125` becomes `4.13`.

use serde::Serialize;
use std::fmt;

pub const RATING_MIN: f64 = 0.0;
pub const RATING_MAX: f64 = 5.0;

/// A rating that has been checked against the closed interval `[0, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct RatingValue(f64);

impl RatingValue {
    /// Validates a raw value. Out-of-range values are rejected, never clamped.
    ///
    /// # Errors
    ///
    /// Returns the offending value when it lies outside `[0, 5]` or is NaN.
    pub fn new(raw: f64) -> Result<Self, f64> {
        if (RATING_MIN..=RATING_MAX).contains(&raw) {
            Ok(Self(raw))
        } else {
            Err(raw)
        }
    }

    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for RatingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[must_use]
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mean of all ratings rounded to two decimals, or `None` when there are none.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_rating(ratings: &[f64]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }

    let sum: f64 = ratings.iter().sum();
    Some(round_to_cents(sum / ratings.len() as f64))
}
