//! Per-catalog scoring context shared by every ranking operation.

use reelmatch_core::{Movie, MovieCatalog};
use reelmatch_scorer::{BayesianRating, CategoryPreference, RecencyDecay, sanitise};

use crate::RecommenderConfig;

/// Signals derived once per catalog snapshot: the weighted-rating
/// parameters, the recency reference year and the popularity ceiling.
#[derive(Debug, Clone)]
pub(crate) struct CatalogSignals {
    bayes: BayesianRating,
    decay: RecencyDecay,
    reference_year: i32,
    max_popularity: f64,
    preference: CategoryPreference,
}

impl CatalogSignals {
    pub(crate) fn new<C>(catalog: &C, config: &RecommenderConfig) -> Self
    where
        C: MovieCatalog + ?Sized,
    {
        let bayes = BayesianRating::from_movies(catalog.movies(), config.bayesian_confidence);
        let reference_year = config
            .reference_year
            .or_else(|| catalog.movies().filter_map(Movie::release_year).max())
            .unwrap_or_default();
        Self {
            bayes,
            decay: config.recency,
            reference_year,
            max_popularity: max_popularity(catalog.movies()),
            preference: config.preference.clone(),
        }
    }

    /// Recency multiplier in `floor..=1.0`.
    pub(crate) fn recency(&self, movie: &Movie) -> f64 {
        self.decay
            .for_release(movie.release_year(), self.reference_year)
    }

    /// Bayesian rating rescaled into `0.0..=1.0`.
    pub(crate) fn rating(&self, movie: &Movie) -> f64 {
        self.bayes.normalised(movie.vote_average, movie.vote_count)
    }

    /// Popularity relative to the catalog's most popular movie.
    pub(crate) fn popularity(&self, movie: &Movie) -> f64 {
        relative(movie.popularity, self.max_popularity)
    }

    /// Additive preference bonus for the movie's original language.
    pub(crate) fn preference_bonus(&self, movie: &Movie) -> f64 {
        self.preference.bonus(&movie.language)
    }

    pub(crate) const fn reference_year(&self) -> i32 {
        self.reference_year
    }
}

/// Largest finite, positive popularity among `movies`, or `0.0`.
pub(crate) fn max_popularity<'a, I>(movies: I) -> f64
where
    I: IntoIterator<Item = &'a Movie>,
{
    movies
        .into_iter()
        .map(|movie| movie.popularity)
        .filter(|popularity| popularity.is_finite())
        .fold(0.0, f64::max)
}

/// `value / ceiling` clamped into `0.0..=1.0`; `0.0` when the ceiling is not
/// positive.
#[expect(clippy::float_arithmetic, reason = "normalisation divides by the ceiling")]
pub(crate) const fn relative(value: f64, ceiling: f64) -> f64 {
    if ceiling <= 0.0 {
        return 0.0;
    }
    sanitise(value / ceiling)
}
