//! In-memory collaborators backed by ordered maps.
//!
//! Callers load ratings and catalog exports into these structures once and
//! hand shared references to the engine. Ordered maps keep iteration
//! deterministic, which the ranking guarantees depend on.

use std::collections::{BTreeMap, BTreeSet};

use log::warn;

use crate::{
    CatalogId, Movie, MovieCatalog, Rating, RatingsStore, TrendingWindow, UserId, WatchlistStore,
};

/// Ordered trending identifiers per window, as published by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TrendingFeed {
    /// Daily trending list, best first.
    pub day: Vec<CatalogId>,
    /// Weekly trending list, best first.
    pub week: Vec<CatalogId>,
}

impl TrendingFeed {
    /// The list for `window`.
    #[must_use]
    pub fn get(&self, window: TrendingWindow) -> &[CatalogId] {
        match window {
            TrendingWindow::Day => &self.day,
            TrendingWindow::Week => &self.week,
        }
    }
}

/// An immutable catalog snapshot keyed by catalog id.
///
/// # Examples
/// ```
/// use reelmatch_core::{CatalogSnapshot, Movie, MovieCatalog};
///
/// let catalog = CatalogSnapshot::new([Movie::new("2", "B"), Movie::new("1", "A")]);
/// let ids: Vec<_> = catalog.movies().map(|m| m.id.as_str()).collect();
/// assert_eq!(ids, vec!["1", "2"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    movies: BTreeMap<CatalogId, Movie>,
    trending: TrendingFeed,
}

impl CatalogSnapshot {
    /// Build a snapshot from movies. A later duplicate id replaces an earlier one.
    pub fn new<I>(movies: I) -> Self
    where
        I: IntoIterator<Item = Movie>,
    {
        let mut map = BTreeMap::new();
        for movie in movies {
            if let Some(previous) = map.insert(movie.id.clone(), movie) {
                warn!("catalog snapshot contains duplicate movie {}", previous.id);
            }
        }
        Self {
            movies: map,
            trending: TrendingFeed::default(),
        }
    }

    /// Attach the trending feed while returning `self` for chaining.
    #[must_use]
    pub fn with_trending(mut self, trending: TrendingFeed) -> Self {
        self.trending = trending;
        self
    }
}

impl MovieCatalog for CatalogSnapshot {
    fn movie(&self, id: &CatalogId) -> Option<&Movie> {
        self.movies.get(id)
    }

    fn movies(&self) -> Box<dyn Iterator<Item = &Movie> + Send + '_> {
        Box::new(self.movies.values())
    }

    fn trending_feed(&self, window: TrendingWindow) -> &[CatalogId] {
        self.trending.get(window)
    }

    fn len(&self) -> usize {
        self.movies.len()
    }
}

/// Ratings indexed both by user and by movie.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRatings {
    by_user: BTreeMap<UserId, BTreeMap<CatalogId, Rating>>,
    by_movie: BTreeMap<CatalogId, BTreeMap<UserId, Rating>>,
}

impl InMemoryRatings {
    /// Build a store from a rating export. Later duplicates win.
    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = Rating>,
    {
        let mut store = Self::default();
        for rating in ratings {
            store.upsert(rating);
        }
        store
    }

    /// Insert a rating or replace the user's existing rating of that movie.
    ///
    /// Returns the replaced rating, if any.
    pub fn upsert(&mut self, rating: Rating) -> Option<Rating> {
        self.by_movie
            .entry(rating.movie_id.clone())
            .or_default()
            .insert(rating.user_id, rating.clone());
        self.by_user
            .entry(rating.user_id)
            .or_default()
            .insert(rating.movie_id.clone(), rating)
    }

    /// Remove a rating, returning it if present.
    pub fn remove(&mut self, user_id: UserId, movie_id: &CatalogId) -> Option<Rating> {
        if let Some(ratings) = self.by_movie.get_mut(movie_id) {
            ratings.remove(&user_id);
            if ratings.is_empty() {
                self.by_movie.remove(movie_id);
            }
        }
        let ratings = self.by_user.get_mut(&user_id)?;
        let removed = ratings.remove(movie_id);
        if ratings.is_empty() {
            self.by_user.remove(&user_id);
        }
        removed
    }

    /// Total number of stored ratings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_user.values().map(BTreeMap::len).sum()
    }

    /// Report whether no ratings are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_user.is_empty()
    }
}

impl RatingsStore for InMemoryRatings {
    fn ratings_by_user(&self, user_id: UserId) -> Box<dyn Iterator<Item = Rating> + Send + '_> {
        match self.by_user.get(&user_id) {
            Some(ratings) => Box::new(ratings.values().cloned()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn ratings_for_movie(
        &self,
        movie_id: &CatalogId,
    ) -> Box<dyn Iterator<Item = Rating> + Send + '_> {
        match self.by_movie.get(movie_id) {
            Some(ratings) => Box::new(ratings.values().cloned()),
            None => Box::new(std::iter::empty()),
        }
    }
}

/// Watchlists keyed by user.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWatchlists {
    lists: BTreeMap<UserId, BTreeSet<CatalogId>>,
}

impl InMemoryWatchlists {
    /// Build from `(user, movies)` pairs.
    pub fn from_lists<I, M>(lists: I) -> Self
    where
        I: IntoIterator<Item = (UserId, M)>,
        M: IntoIterator<Item = CatalogId>,
    {
        let mut watchlists = Self::default();
        for (user_id, movies) in lists {
            for movie_id in movies {
                watchlists.add(user_id, movie_id);
            }
        }
        watchlists
    }

    /// Add a movie to a user's watchlist. Returns `false` if already present.
    pub fn add(&mut self, user_id: UserId, movie_id: CatalogId) -> bool {
        self.lists.entry(user_id).or_default().insert(movie_id)
    }

    /// Remove a movie from a user's watchlist. Returns `true` if it was present.
    pub fn remove(&mut self, user_id: UserId, movie_id: &CatalogId) -> bool {
        self.lists
            .get_mut(&user_id)
            .is_some_and(|list| list.remove(movie_id))
    }
}

impl WatchlistStore for InMemoryWatchlists {
    fn watchlist(&self, user_id: UserId) -> Box<dyn Iterator<Item = CatalogId> + Send + '_> {
        match self.lists.get(&user_id) {
            Some(list) => Box::new(list.iter().cloned()),
            None => Box::new(std::iter::empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RatingScore;
    use rstest::{fixture, rstest};

    fn rating(user_id: UserId, movie: &str, score: f64) -> Rating {
        Rating::new(user_id, movie, RatingScore::new(score).expect("valid score"), 0)
    }

    #[fixture]
    fn ratings() -> InMemoryRatings {
        InMemoryRatings::from_ratings([
            rating(1, "a", 4.0),
            rating(1, "b", 2.5),
            rating(2, "a", 5.0),
        ])
    }

    #[rstest]
    fn indexes_by_user_and_movie(ratings: InMemoryRatings) {
        assert_eq!(ratings.len(), 3);
        assert_eq!(ratings.ratings_by_user(1).count(), 2);
        assert_eq!(ratings.ratings_for_movie(&"a".into()).count(), 2);
        assert_eq!(ratings.ratings_by_user(99).count(), 0);
    }

    #[rstest]
    fn rerating_updates_in_place(mut ratings: InMemoryRatings) {
        let previous = ratings.upsert(rating(1, "a", 1.5));
        assert_eq!(previous.map(|r| r.score.value()), Some(4.0));
        assert_eq!(ratings.len(), 3);
        let for_movie: Vec<_> = ratings
            .ratings_for_movie(&"a".into())
            .filter(|r| r.user_id == 1)
            .map(|r| r.score.value())
            .collect();
        assert_eq!(for_movie, vec![1.5]);
    }

    #[rstest]
    fn removal_clears_both_indices(mut ratings: InMemoryRatings) {
        let removed = ratings.remove(2, &"a".into());
        assert!(removed.is_some());
        assert_eq!(ratings.ratings_by_user(2).count(), 0);
        assert_eq!(ratings.ratings_for_movie(&"a".into()).count(), 1);
        assert!(ratings.remove(2, &"a".into()).is_none());
    }

    #[rstest]
    fn watchlists_deduplicate() {
        let mut lists = InMemoryWatchlists::default();
        assert!(lists.add(1, "a".into()));
        assert!(!lists.add(1, "a".into()));
        assert_eq!(lists.watchlist(1).count(), 1);
        assert!(lists.remove(1, &"a".into()));
        assert_eq!(lists.watchlist(1).count(), 0);
    }

    #[rstest]
    fn trending_feed_selects_window() {
        let feed = TrendingFeed {
            day: vec!["d".into()],
            week: vec!["w1".into(), "w2".into()],
        };
        let catalog = CatalogSnapshot::new([]).with_trending(feed);
        assert_eq!(catalog.trending_feed(TrendingWindow::Day).len(), 1);
        assert_eq!(catalog.trending_feed(TrendingWindow::Week).len(), 2);
        assert!(catalog.is_empty());
    }
}
