//! Non-personalised trending rankings.

#![expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "trending scores blend feed position, popularity and rating"
)]

use std::collections::BTreeSet;

use log::debug;
use reelmatch_core::{
    Movie, MovieCatalog, RatingsStore, RecommendationResult, ScoredCandidate, TrendingWindow,
    WatchlistStore, rank_candidates,
};

use super::HybridRecommender;
use crate::signals::{max_popularity, relative};

/// Share of popularity velocity taken by the feed position when the catalog
/// publishes a trending feed; popularity takes the rest.
const FEED_POSITION_SHARE: f64 = 0.5;

impl<C, R, W> HybridRecommender<'_, C, R, W>
where
    C: MovieCatalog + ?Sized,
    R: RatingsStore + ?Sized,
    W: WatchlistStore + ?Sized,
{
    /// Every trending candidate for `window`, best first.
    ///
    /// See [`HybridRecommender::trending_top`].
    pub fn trending(&self, window: TrendingWindow) -> Vec<RecommendationResult> {
        self.trending_top(window, usize::MAX)
    }

    /// Top `n` trending movies for `window`.
    ///
    /// Candidates are the catalog's trending feed for the window, or the
    /// whole catalog when the feed is empty. Popularity velocity blends the
    /// feed position with popularity relative to the other candidates, and is
    /// then combined with recency and rating. An empty catalog yields an empty
    /// list.
    pub fn trending_top(&self, window: TrendingWindow, n: usize) -> Vec<RecommendationResult> {
        if n == 0 || self.catalog.is_empty() {
            return Vec::new();
        }
        let feed = self.feed_candidates(window);
        let candidates: Vec<(&Movie, Option<f64>)> = if feed.is_empty() {
            debug!("no {window} trending feed; ranking the whole catalog by popularity");
            self.catalog.movies().map(|movie| (movie, None)).collect()
        } else {
            let length = feed.len() as f64;
            feed.into_iter()
                .enumerate()
                .map(|(position, movie)| (movie, Some(1.0 - position as f64 / length)))
                .collect()
        };

        let ceiling = max_popularity(candidates.iter().map(|(movie, _)| *movie));
        let weights = self.config.trending;
        let scored = candidates
            .into_iter()
            .map(|(movie, position)| {
                let popularity = relative(movie.popularity, ceiling);
                let velocity = position.map_or(popularity, |feed_score| {
                    FEED_POSITION_SHARE * feed_score + (1.0 - FEED_POSITION_SHARE) * popularity
                });
                let score = weights.velocity * velocity
                    + weights.recency * self.signals.recency(movie)
                    + weights.rating * self.signals.rating(movie);
                ScoredCandidate::new(movie, score)
            })
            .collect();
        rank_candidates(scored, n)
    }

    /// Feed entries resolved against the catalog, first occurrence kept.
    fn feed_candidates(&self, window: TrendingWindow) -> Vec<&Movie> {
        let mut seen = BTreeSet::new();
        self.catalog
            .trending_feed(window)
            .iter()
            .filter(|movie_id| seen.insert(*movie_id))
            .filter_map(|movie_id| self.catalog.movie(movie_id))
            .collect()
    }

    /// Top `n` movies by community rating activity.
    ///
    /// Scores each rated catalog movie by its mean user rating times
    /// `ln(1 + ratings)`, favouring movies that are both well liked and
    /// often rated. Movies nobody rated are left out.
    pub fn community_trending(&self, n: usize) -> Vec<RecommendationResult> {
        if n == 0 {
            return Vec::new();
        }
        let scored = self
            .catalog
            .movies()
            .filter_map(|movie| {
                let (count, total) = self
                    .ratings
                    .ratings_for_movie(&movie.id)
                    .fold((0_usize, 0.0), |(count, total), rating| {
                        (count + 1, total + rating.score.value())
                    });
                (count > 0).then(|| {
                    let mean = total / count as f64;
                    ScoredCandidate::new(movie, mean * (count as f64).ln_1p())
                })
            })
            .collect();
        rank_candidates(scored, n)
    }
}
