//! Popularity fallback for users without enough rating history.

use std::fmt;

use log::info;
use reelmatch_core::{
    MovieCatalog, RatingsStore, RecommendError, RecommendationResult, ScoredCandidate, UserId,
    WatchlistStore, rank_candidates,
};
use serde::{Deserialize, Serialize};

use super::HybridRecommender;

/// Which ranking produced a [`Recommendations`] list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Hybrid collaborative and content filtering.
    Personalised,
    /// Popularity fallback.
    Popular,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Personalised => "personalised",
            Self::Popular => "popular",
        })
    }
}

/// Ranked results tagged with the strategy that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    /// Ranking that produced `results`.
    pub strategy: Strategy,
    /// Ranked movies, best first.
    pub results: Vec<RecommendationResult>,
}

impl<C, R, W> HybridRecommender<'_, C, R, W>
where
    C: MovieCatalog + ?Sized,
    R: RatingsStore + ?Sized,
    W: WatchlistStore + ?Sized,
{
    /// Top `n` popular movies the user has not rated or saved.
    ///
    /// Blends the Bayesian rating, popularity relative to the catalog peak and
    /// recency, then adds the category preference bonus. Never fails.
    #[expect(
        clippy::float_arithmetic,
        reason = "the fallback score blends weighted signals"
    )]
    pub fn popular(&self, user_id: UserId, n: usize) -> Vec<RecommendationResult> {
        if n == 0 {
            return Vec::new();
        }
        let seen = self.seen_by(user_id);
        let weights = self.config.popular;
        let scored = self
            .catalog
            .movies()
            .filter(|movie| !seen.contains(&movie.id))
            .map(|movie| {
                let score = weights.rating * self.signals.rating(movie)
                    + weights.popularity * self.signals.popularity(movie)
                    + weights.recency * self.signals.recency(movie)
                    + self.signals.preference_bonus(movie);
                ScoredCandidate::new(movie, score)
            })
            .collect();
        rank_candidates(scored, n)
    }

    /// Personalised recommendations, falling back to [`Self::popular`] when
    /// the user has too few ratings.
    ///
    /// # Errors
    /// Propagates any [`RecommendError`] other than
    /// [`RecommendError::InsufficientData`].
    pub fn recommend(&self, user_id: UserId, n: usize) -> Result<Recommendations, RecommendError> {
        match self.personalized_recommendations(user_id, n) {
            Ok(results) => Ok(Recommendations {
                strategy: Strategy::Personalised,
                results,
            }),
            Err(err) if err.is_recoverable() => {
                info!("{err}; serving popular movies instead");
                Ok(Recommendations {
                    strategy: Strategy::Popular,
                    results: self.popular(user_id, n),
                })
            }
            Err(err) => Err(err),
        }
    }
}
