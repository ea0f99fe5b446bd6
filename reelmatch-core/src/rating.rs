//! User ratings on the half-star scale.

use thiserror::Error;

use crate::CatalogId;

/// Identifier of an application user.
pub type UserId = u64;

/// A validated rating on the `0.0..=5.0` scale in half-star steps.
///
/// # Examples
/// ```
/// use reelmatch_core::RatingScore;
///
/// # fn main() -> Result<(), reelmatch_core::RatingError> {
/// let score = RatingScore::new(4.5)?;
/// assert_eq!(score.value(), 4.5);
/// assert!(RatingScore::new(4.3).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct RatingScore(f64);

/// Errors returned by [`RatingScore::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RatingError {
    /// The value was non-finite, outside `0.0..=5.0`, or not a half step.
    #[error("rating {value} must be between 0.0 and 5.0 in 0.5 increments")]
    InvalidScore {
        /// Rejected raw value.
        value: f64,
    },
}

impl RatingScore {
    /// Lowest accepted rating.
    pub const MIN: f64 = 0.0;
    /// Highest accepted rating.
    pub const MAX: f64 = 5.0;

    /// Validate and wrap a raw score.
    ///
    /// # Errors
    /// Returns [`RatingError::InvalidScore`] when `value` is not finite, lies
    /// outside `0.0..=5.0`, or is not a multiple of `0.5`.
    #[expect(
        clippy::float_arithmetic,
        reason = "half-step validation doubles the score"
    )]
    pub fn new(value: f64) -> Result<Self, RatingError> {
        let in_range = value.is_finite() && (Self::MIN..=Self::MAX).contains(&value);
        if in_range && (value * 2.0).fract() == 0.0 {
            Ok(Self(value))
        } else {
            Err(RatingError::InvalidScore { value })
        }
    }

    /// The raw score.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for RatingScore {
    type Error = RatingError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RatingScore> for f64 {
    fn from(score: RatingScore) -> Self {
        score.0
    }
}

/// One user's rating of one movie.
///
/// A (user, movie) pair has at most one rating; re-rating replaces it.
/// `timestamp` is seconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rating {
    /// Rating author.
    pub user_id: UserId,
    /// Rated movie.
    pub movie_id: CatalogId,
    /// Validated score.
    pub score: RatingScore,
    /// When the rating was last written.
    #[cfg_attr(feature = "serde", serde(default))]
    pub timestamp: u64,
}

impl Rating {
    /// Construct a rating.
    pub fn new(
        user_id: UserId,
        movie_id: impl Into<CatalogId>,
        score: RatingScore,
        timestamp: u64,
    ) -> Self {
        Self {
            user_id,
            movie_id: movie_id.into(),
            score,
            timestamp,
        }
    }
}
