//! [`HybridRecommender`] and its ranking operations.
//!
//! The recommender borrows its collaborators for the duration of a request
//! and never mutates them. Each operation is a pure function of the borrowed
//! data and the configuration.

mod personalised;
mod popular;
mod similar;
mod trending;


use std::collections::BTreeSet;

use log::debug;
use reelmatch_core::{CatalogId, MovieCatalog, RatingsStore, UserId, WatchlistStore};
use reelmatch_index::ContentIndex;

use crate::signals::CatalogSignals;
use crate::{ConfigError, RecommenderConfig};

pub use popular::{Recommendations, Strategy};

/// Hybrid recommendation engine over borrowed collaborators.
///
/// # Examples
/// ```
/// use reelmatch_core::test_support::{sample_catalog, sample_ratings};
/// use reelmatch_core::{InMemoryWatchlists, TrendingWindow};
/// use reelmatch_index::ContentIndex;
/// use reelmatch_recommender::HybridRecommender;
///
/// let catalog = sample_catalog();
/// let ratings = sample_ratings();
/// let watchlists = InMemoryWatchlists::default();
/// let index = ContentIndex::build(&catalog);
/// let engine = HybridRecommender::new(&catalog, &ratings, &watchlists, &index);
///
/// let trending = engine.trending(TrendingWindow::Week);
/// assert_eq!(trending[0].rank, 1);
/// let personal = engine.personalized_recommendations(1, 3).expect("user 1 has enough ratings");
/// assert!(personal.len() <= 3);
/// ```
pub struct HybridRecommender<'a, C, R, W>
where
    C: MovieCatalog + ?Sized,
    R: RatingsStore + ?Sized,
    W: WatchlistStore + ?Sized,
{
    catalog: &'a C,
    ratings: &'a R,
    watchlists: &'a W,
    index: &'a ContentIndex,
    config: RecommenderConfig,
    signals: CatalogSignals,
}

impl<'a, C, R, W> HybridRecommender<'a, C, R, W>
where
    C: MovieCatalog + ?Sized,
    R: RatingsStore + ?Sized,
    W: WatchlistStore + ?Sized,
{
    /// Construct a recommender with the default configuration.
    pub fn new(catalog: &'a C, ratings: &'a R, watchlists: &'a W, index: &'a ContentIndex) -> Self {
        Self::build(
            catalog,
            ratings,
            watchlists,
            index,
            RecommenderConfig::default(),
        )
    }

    /// Construct a recommender with an explicit configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when `config` fails validation.
    pub fn with_config(
        catalog: &'a C,
        ratings: &'a R,
        watchlists: &'a W,
        index: &'a ContentIndex,
        config: RecommenderConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(catalog, ratings, watchlists, index, config))
    }

    fn build(
        catalog: &'a C,
        ratings: &'a R,
        watchlists: &'a W,
        index: &'a ContentIndex,
        config: RecommenderConfig,
    ) -> Self {
        let signals = CatalogSignals::new(catalog, &config);
        debug!(
            "recommender ready: {} movies, {} indexed, reference year {}",
            catalog.len(),
            index.len(),
            signals.reference_year()
        );
        Self {
            catalog,
            ratings,
            watchlists,
            index,
            config,
            signals,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Movies the user has rated or saved to their watchlist.
    fn seen_by(&self, user_id: UserId) -> BTreeSet<CatalogId> {
        self.ratings
            .ratings_by_user(user_id)
            .map(|rating| rating.movie_id)
            .chain(self.watchlists.watchlist(user_id))
            .collect()
    }
}
