//! Personalised recommendations.
//!
//! Collaborative filtering predicts a rating for each unseen movie from the
//! user's most similar neighbours; content filtering scores it by its mean
//! content similarity to the movies the user liked. The two blend into a
//! hybrid similarity, which then joins genre overlap, recency and rating in
//! the composite score.

#![expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "composite scoring blends floating-point signals"
)]

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use reelmatch_core::{
    CatalogId, Movie, MovieCatalog, RatingScore, RatingsStore, RecommendError,
    RecommendationResult, ScoredCandidate, UserId, WatchlistStore, rank_candidates,
};
use reelmatch_index::{RatingProfile, UserSimilarity, profile_similarity, rating_profile};
use reelmatch_scorer::{genre_overlap, sanitise};

use super::HybridRecommender;

/// A positively correlated user and their ratings.
#[derive(Debug)]
pub(super) struct Neighbour {
    pub(super) user_id: UserId,
    pub(super) similarity: UserSimilarity,
    pub(super) profile: RatingProfile,
}

/// What the user liked, as seen by content filtering.
struct Taste<'m> {
    liked: Vec<&'m CatalogId>,
    genres: BTreeSet<String>,
}

impl<C, R, W> HybridRecommender<'_, C, R, W>
where
    C: MovieCatalog + ?Sized,
    R: RatingsStore + ?Sized,
    W: WatchlistStore + ?Sized,
{
    /// Top `n` unseen movies for `user_id`, best first.
    ///
    /// Movies the user rated or saved to their watchlist are never returned.
    ///
    /// # Errors
    /// Returns [`RecommendError::InsufficientData`] when the user has fewer
    /// than `min_ratings` ratings.
    pub fn personalized_recommendations(
        &self,
        user_id: UserId,
        n: usize,
    ) -> Result<Vec<RecommendationResult>, RecommendError> {
        let profile = rating_profile(self.ratings, user_id);
        if profile.len() < self.config.min_ratings {
            return Err(RecommendError::InsufficientData {
                user_id,
                ratings: profile.len(),
                required: self.config.min_ratings,
            });
        }
        if n == 0 || self.catalog.is_empty() {
            return Ok(Vec::new());
        }

        let seen = self.seen_by(user_id);
        let neighbours = self.neighbours(user_id, &profile);
        let predictions = if neighbours.len() >= self.config.min_neighbours {
            debug!(
                "user {user_id}: {} neighbours for collaborative filtering",
                neighbours.len()
            );
            Some(predict_ratings(&neighbours, &seen))
        } else {
            debug!(
                "user {user_id}: {} neighbours, below {}; using content filtering only",
                neighbours.len(),
                self.config.min_neighbours
            );
            None
        };
        let taste = self.taste(&profile);

        let candidates = self
            .catalog
            .movies()
            .filter(|movie| !seen.contains(&movie.id))
            .map(|movie| {
                let predicted = predictions
                    .as_ref()
                    .and_then(|scores| scores.get(&movie.id).copied());
                let content = self.content_score(&taste, movie);
                let hybrid = self.hybrid_similarity(predicted, content);
                ScoredCandidate::new(movie, self.composite(movie, hybrid, &taste.genres))
            })
            .collect();
        Ok(rank_candidates(candidates, n))
    }

    /// Up to K positively correlated users, most similar first.
    ///
    /// Ties order by larger overlap, then ascending user id. Users with an
    /// undefined similarity are skipped.
    pub(super) fn neighbours(&self, user_id: UserId, profile: &RatingProfile) -> Vec<Neighbour> {
        let others: BTreeSet<UserId> = profile
            .keys()
            .flat_map(|movie_id| self.ratings.ratings_for_movie(movie_id))
            .map(|rating| rating.user_id)
            .filter(|other| *other != user_id)
            .collect();

        let mut neighbours: Vec<Neighbour> = others
            .into_iter()
            .filter_map(|other| {
                let other_profile = rating_profile(self.ratings, other);
                let similarity =
                    profile_similarity(profile, &other_profile, self.config.min_overlap)?;
                (similarity.coefficient > 0.0).then_some(Neighbour {
                    user_id: other,
                    similarity,
                    profile: other_profile,
                })
            })
            .collect();
        neighbours.sort_by(|a, b| {
            b.similarity
                .coefficient
                .total_cmp(&a.similarity.coefficient)
                .then_with(|| b.similarity.overlap.cmp(&a.similarity.overlap))
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        neighbours.truncate(self.config.neighbours);
        neighbours
    }

    /// Liked movies (rated at or above the liked threshold, or the user's
    /// top-rated movies when none clear it) and their pooled genres.
    fn taste<'m>(&self, profile: &'m RatingProfile) -> Taste<'m> {
        let mut liked: Vec<&CatalogId> = profile
            .iter()
            .filter(|(_, score)| **score >= self.config.liked_threshold)
            .map(|(movie_id, _)| movie_id)
            .collect();
        if liked.is_empty() {
            let best = profile.values().copied().fold(RatingScore::MIN, f64::max);
            liked = profile
                .iter()
                .filter(|(_, score)| **score >= best)
                .map(|(movie_id, _)| movie_id)
                .collect();
        }
        let genres = liked
            .iter()
            .filter_map(|movie_id| self.catalog.movie(movie_id))
            .flat_map(|movie| movie.genres.iter().cloned())
            .collect();
        Taste { liked, genres }
    }

    /// Mean content similarity between `movie` and the liked movies.
    fn content_score(&self, taste: &Taste<'_>, movie: &Movie) -> f64 {
        if taste.liked.is_empty() {
            return 0.0;
        }
        let total: f64 = taste
            .liked
            .iter()
            .map(|liked| self.index.similarity(liked, &movie.id))
            .sum();
        total / taste.liked.len() as f64
    }

    /// Blend a normalised collaborative prediction with the content score.
    ///
    /// Without a prediction the content score stands alone.
    fn hybrid_similarity(&self, predicted: Option<f64>, content: f64) -> f64 {
        let Some(rating) = predicted else {
            return content;
        };
        let split = self.config.hybrid;
        let total = split.collaborative + split.content;
        let collaborative = sanitise(rating / RatingScore::MAX);
        sanitise((split.collaborative * collaborative + split.content * content) / total)
    }

    fn composite(&self, movie: &Movie, hybrid: f64, liked_genres: &BTreeSet<String>) -> f64 {
        let weights = self.config.weights;
        weights.similarity * hybrid
            + weights.genre * genre_overlap(&movie.genres, liked_genres)
            + weights.recency * self.signals.recency(movie)
            + weights.rating * self.signals.rating(movie)
            + self.signals.preference_bonus(movie)
    }
}

/// Similarity-weighted mean of the neighbours' ratings per unseen movie.
pub(super) fn predict_ratings(
    neighbours: &[Neighbour],
    seen: &BTreeSet<CatalogId>,
) -> BTreeMap<CatalogId, f64> {
    let mut sums: BTreeMap<&CatalogId, (f64, f64)> = BTreeMap::new();
    for neighbour in neighbours {
        let weight = neighbour.similarity.coefficient;
        for (movie_id, rating) in &neighbour.profile {
            if seen.contains(movie_id) {
                continue;
            }
            let entry = sums.entry(movie_id).or_insert((0.0, 0.0));
            entry.0 += weight * rating;
            entry.1 += weight.abs();
        }
    }
    sums.into_iter()
        .filter(|(_, (_, norm))| *norm > 0.0)
        .map(|(movie_id, (sum, norm))| (movie_id.clone(), sum / norm))
        .collect()
}
