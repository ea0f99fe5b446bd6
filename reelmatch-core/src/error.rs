//! Conditions surfaced by recommendation requests.

use thiserror::Error;

use crate::{CatalogId, UserId};

/// Errors returned by recommendation operations.
///
/// Both kinds are terminal for the single request that raised them and leave
/// no state behind. An empty catalog is not an error: operations answer with
/// an empty list instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    /// The user has too few ratings for personalised recommendations.
    ///
    /// Callers are expected to fall back to popularity-based results.
    #[error(
        "user {user_id} has {ratings} ratings; personalised recommendations need at least {required}"
    )]
    InsufficientData {
        /// User the request was made for.
        user_id: UserId,
        /// Ratings the user currently has.
        ratings: usize,
        /// Minimum ratings required.
        required: usize,
    },
    /// The requested movie is not in the catalog.
    #[error("movie {movie_id} is not in the catalog")]
    NotFound {
        /// Identifier that failed to resolve.
        movie_id: CatalogId,
    },
}

impl RecommendError {
    /// Report whether the caller should fall back to non-personalised results.
    ///
    /// # Examples
    /// ```
    /// use reelmatch_core::RecommendError;
    ///
    /// let err = RecommendError::InsufficientData { user_id: 7, ratings: 2, required: 5 };
    /// assert!(err.is_recoverable());
    /// ```
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}
