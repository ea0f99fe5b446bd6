//! Facade crate for the Reelmatch movie recommender.
//!
//! This crate re-exports the core domain types, the scoring primitives and
//! the content index, and exposes the hybrid recommender behind the
//! `recommender` feature flag.

#![forbid(unsafe_code)]

pub use reelmatch_core::{
    CatalogId, CatalogSnapshot, InMemoryRatings, InMemoryWatchlists, Movie, MovieCatalog, Rating,
    RatingError, RatingScore, RatingsStore, RecommendError, RecommendationResult, TrendingFeed,
    TrendingWindow, UserId, WatchlistStore,
};

pub use reelmatch_index::{ContentIndex, SharedContentIndex, UserSimilarity};
pub use reelmatch_scorer::{BayesianRating, CategoryPreference, RecencyDecay, ScoringError};

#[cfg(feature = "test-support")]
pub use reelmatch_core::test_support;

#[cfg(feature = "recommender")]
pub use reelmatch_recommender::{
    ConfigError, HybridRecommender, Recommendations, RecommenderConfig, Strategy,
};
