//! Core domain types for the Reelmatch recommendation engine.
//!
//! The crate models the read-only inputs the engine consumes (movies from the
//! external catalog, user ratings, watchlists), the collaborator traits that
//! expose them, and the transient [`RecommendationResult`] the engine returns.
//! Nothing here performs I/O: collaborators materialise their data in memory
//! before the engine runs.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod memory;
pub mod movie;
pub mod rating;
pub mod recommendation;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use error::RecommendError;
pub use memory::{CatalogSnapshot, InMemoryRatings, InMemoryWatchlists, TrendingFeed};
pub use movie::{CatalogId, Movie};
pub use rating::{Rating, RatingError, RatingScore, UserId};
pub use recommendation::{
    RecommendationResult, ScoredCandidate, TrendingWindow, UnknownWindow, rank_candidates,
};
pub use store::{MovieCatalog, RatingsStore, WatchlistStore};
