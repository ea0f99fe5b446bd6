//! Errors raised when validating scoring parameters.

use thiserror::Error;

/// Invalid parameters for a scoring function.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// The recency floor was outside `(0.0, 1.0]`.
    #[error("recency floor must lie in (0.0, 1.0], got {floor}")]
    InvalidFloor {
        /// Rejected floor.
        floor: f64,
    },
    /// The recency horizon was zero years.
    #[error("recency horizon must be at least one year")]
    ZeroHorizon,
    /// The Bayesian confidence constant was negative or non-finite.
    #[error("Bayesian confidence must be finite and non-negative, got {confidence}")]
    InvalidConfidence {
        /// Rejected constant.
        confidence: f64,
    },
    /// The global mean rating was non-finite.
    #[error("global mean rating must be finite, got {mean}")]
    InvalidMean {
        /// Rejected mean.
        mean: f64,
    },
    /// A category bonus was negative or non-finite.
    #[error("bonus for category '{category}' must be finite and non-negative, got {bonus}")]
    InvalidBonus {
        /// Category the bonus was configured for.
        category: String,
        /// Rejected bonus.
        bonus: f64,
    },
}
