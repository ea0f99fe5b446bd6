//! Hybrid movie recommender for Reelmatch.
//!
//! [`HybridRecommender`] ranks catalog movies four ways:
//! - [`personalized_recommendations`](HybridRecommender::personalized_recommendations)
//!   blends collaborative and content filtering for users with enough ratings;
//! - [`similar_movies`](HybridRecommender::similar_movies) ranks movies by
//!   content similarity to a given movie;
//! - [`trending`](HybridRecommender::trending) ranks the catalog's trending
//!   feed by popularity velocity, recency and rating;
//! - [`popular`](HybridRecommender::popular) serves users without enough
//!   history, and [`recommend`](HybridRecommender::recommend) picks between
//!   the two automatically.
//!
//! All weights live in [`RecommenderConfig`].

#![forbid(unsafe_code)]

mod config;
mod error;
mod recommender;
mod signals;

pub use config::{
    CompositeWeights, HybridSplit, PopularWeights, RecommenderConfig, SimilarConfig,
    TrendingWeights,
};
pub use error::ConfigError;
pub use recommender::{HybridRecommender, Recommendations, Strategy};
