//! Configuration errors for the hybrid recommender.

use reelmatch_scorer::ScoringError;
use thiserror::Error;

/// Invalid [`RecommenderConfig`](crate::RecommenderConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A weight was negative or non-finite.
    #[error("weight '{name}' must be finite and non-negative, got {value}")]
    InvalidWeight {
        /// Dotted path of the offending weight.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Both halves of the hybrid split were zero.
    #[error("hybrid split must give collaborative or content filtering a positive weight")]
    ZeroHybridSplit,
    /// The neighbour count K was zero.
    #[error("neighbour count must be at least 1")]
    ZeroNeighbours,
    /// The co-rated threshold cannot support a correlation.
    #[error("minimum overlap must be at least 2 co-rated movies, got {min_overlap}")]
    MinOverlapTooSmall {
        /// Rejected threshold.
        min_overlap: usize,
    },
    /// The liked threshold lay outside the rating scale.
    #[error("liked threshold must lie within 0.0..=5.0, got {threshold}")]
    InvalidLikedThreshold {
        /// Rejected threshold.
        threshold: f64,
    },
    /// A scoring function rejected its parameters.
    #[error("invalid scoring parameters")]
    Scoring(#[from] ScoringError),
}
