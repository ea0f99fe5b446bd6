//! Movies similar to a given movie.

use reelmatch_core::{
    CatalogId, Movie, MovieCatalog, RatingsStore, RecommendError, RecommendationResult,
    ScoredCandidate, WatchlistStore, rank_candidates,
};
use reelmatch_scorer::{genre_overlap, shared_cast};

use super::HybridRecommender;

impl<C, R, W> HybridRecommender<'_, C, R, W>
where
    C: MovieCatalog + ?Sized,
    R: RatingsStore + ?Sized,
    W: WatchlistStore + ?Sized,
{
    /// Top `n` movies most similar to `movie_id`, best first.
    ///
    /// Needs no ratings. The base score weighs content similarity, genre
    /// overlap, recency and rating; a shared director, shared cast members and
    /// a shared original language add fixed bonuses. Candidates whose genre
    /// overlap falls below `similar.min_genre_overlap` are dropped.
    ///
    /// # Errors
    /// Returns [`RecommendError::NotFound`] when `movie_id` is not in the
    /// catalog.
    pub fn similar_movies(
        &self,
        movie_id: &CatalogId,
        n: usize,
    ) -> Result<Vec<RecommendationResult>, RecommendError> {
        let Some(target) = self.catalog.movie(movie_id) else {
            return Err(RecommendError::NotFound {
                movie_id: movie_id.clone(),
            });
        };
        if n == 0 {
            return Ok(Vec::new());
        }
        let min_overlap = self.config.similar.min_genre_overlap;
        let candidates = self
            .catalog
            .movies()
            .filter(|movie| movie.id != target.id)
            .filter_map(|movie| {
                let overlap = genre_overlap(&target.genres, &movie.genres);
                if overlap < min_overlap {
                    return None;
                }
                let score = self.similarity_score(target, movie, overlap);
                Some(ScoredCandidate::new(movie, score))
            })
            .collect();
        Ok(rank_candidates(candidates, n))
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "similar-movie scores blend weighted signals and bonuses"
    )]
    fn similarity_score(&self, target: &Movie, movie: &Movie, overlap: f64) -> f64 {
        let similar = &self.config.similar;
        let weights = similar.weights;
        let base = weights.similarity * self.index.similarity(&target.id, &movie.id)
            + weights.genre * overlap
            + weights.recency * self.signals.recency(movie)
            + weights.rating * self.signals.rating(movie);

        let same_director = target
            .director
            .as_ref()
            .is_some_and(|director| movie.director.as_ref() == Some(director));
        let director_bonus = if same_director {
            similar.director_bonus
        } else {
            0.0
        };
        let cast_bonus = (shared_cast(&target.cast, &movie.cast) as f64 * similar.cast_bonus)
            .min(similar.cast_bonus_cap);
        let same_language =
            !target.language.is_empty() && target.language.eq_ignore_ascii_case(&movie.language);
        let language_bonus = if same_language {
            similar.language_bonus
        } else {
            0.0
        };
        base + director_bonus + cast_bonus + language_bonus
    }
}
