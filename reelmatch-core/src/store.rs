//! Read-only accessors the engine consumes from its collaborators.
//!
//! The engine performs no I/O of its own. Ratings, watchlists and catalog
//! metadata are materialised in memory by the caller and exposed through
//! these synchronous traits. Implementations must be `Send + Sync` so
//! concurrent requests can share them without locking.

use crate::{CatalogId, Movie, Rating, TrendingWindow, UserId};

/// Read access to persisted ratings.
///
/// # Examples
///
/// ```rust
/// use reelmatch_core::{InMemoryRatings, Rating, RatingScore, RatingsStore};
///
/// # fn main() -> Result<(), reelmatch_core::RatingError> {
/// let mut ratings = InMemoryRatings::default();
/// ratings.upsert(Rating::new(1, "603", RatingScore::new(4.5)?, 0));
/// assert_eq!(ratings.ratings_by_user(1).count(), 1);
/// assert_eq!(ratings.ratings_for_movie(&"603".into()).count(), 1);
/// # Ok(())
/// # }
/// ```
pub trait RatingsStore: Send + Sync {
    /// All ratings written by `user_id`.
    fn ratings_by_user(&self, user_id: UserId) -> Box<dyn Iterator<Item = Rating> + Send + '_>;

    /// All ratings of `movie_id`.
    fn ratings_for_movie(
        &self,
        movie_id: &CatalogId,
    ) -> Box<dyn Iterator<Item = Rating> + Send + '_>;
}

/// Read access to user watchlists.
pub trait WatchlistStore: Send + Sync {
    /// Movies `user_id` has saved to watch later.
    fn watchlist(&self, user_id: UserId) -> Box<dyn Iterator<Item = CatalogId> + Send + '_>;
}

/// Read access to the current catalog snapshot.
pub trait MovieCatalog: Send + Sync {
    /// Metadata for a single movie.
    fn movie(&self, id: &CatalogId) -> Option<&Movie>;

    /// Every movie in the snapshot, ordered by catalog id.
    fn movies(&self) -> Box<dyn Iterator<Item = &Movie> + Send + '_>;

    /// The external service's trending feed for `window`, best first.
    fn trending_feed(&self, window: TrendingWindow) -> &[CatalogId];

    /// Number of movies in the snapshot.
    fn len(&self) -> usize;

    /// Report whether the snapshot holds no movies.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
