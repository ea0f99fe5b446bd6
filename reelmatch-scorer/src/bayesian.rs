//! Bayesian-adjusted (weighted) rating.
//!
//! `adjusted = v / (v + m) * R + m / (v + m) * C` where `R` is the movie's raw
//! vote average, `v` its vote count, `C` the catalog mean and `m` the
//! confidence constant. The result always lies between `R` and `C`.

#![expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "weighted ratings are floating-point averages over vote counts"
)]

use log::debug;
use reelmatch_core::Movie;

use crate::ScoringError;

/// Upper bound of the catalog's vote scale.
const VOTE_SCALE: f64 = 10.0;

/// Parameters of the weighted-rating formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BayesianRating {
    global_mean: f64,
    confidence: f64,
}

impl BayesianRating {
    /// Validate and construct from an explicit mean `C` and confidence `m`.
    ///
    /// # Errors
    /// Returns [`ScoringError::InvalidMean`] for a non-finite mean and
    /// [`ScoringError::InvalidConfidence`] for a negative or non-finite
    /// confidence.
    pub fn new(global_mean: f64, confidence: f64) -> Result<Self, ScoringError> {
        if !global_mean.is_finite() {
            return Err(ScoringError::InvalidMean { mean: global_mean });
        }
        if !(confidence.is_finite() && confidence >= 0.0) {
            return Err(ScoringError::InvalidConfidence { confidence });
        }
        Ok(Self {
            global_mean,
            confidence,
        })
    }

    /// Derive parameters from a catalog snapshot.
    ///
    /// `C` is the mean vote average over movies with at least one vote. `m`
    /// is `confidence` when supplied, otherwise the median vote count across
    /// the catalog. An empty catalog yields `C = 0` and `m = 0`.
    ///
    /// # Examples
    /// ```
    /// use reelmatch_core::Movie;
    /// use reelmatch_scorer::BayesianRating;
    ///
    /// let movies = [
    ///     Movie::new("a", "A").with_votes(8.0, 100),
    ///     Movie::new("b", "B").with_votes(6.0, 300),
    ///     Movie::new("c", "C").with_votes(7.0, 200),
    /// ];
    /// let bayes = BayesianRating::from_movies(&movies, None);
    /// assert_eq!(bayes.global_mean(), 7.0);
    /// assert_eq!(bayes.confidence(), 200.0);
    /// ```
    #[must_use]
    pub fn from_movies<'a, I>(movies: I, confidence: Option<f64>) -> Self
    where
        I: IntoIterator<Item = &'a Movie>,
    {
        let mut counts = Vec::new();
        let mut vote_sum = 0.0_f64;
        let mut voted = 0_usize;
        for movie in movies {
            counts.push(movie.vote_count);
            if movie.vote_count > 0 && movie.vote_average.is_finite() {
                vote_sum += movie.vote_average;
                voted += 1;
            }
        }
        let global_mean = if voted == 0 {
            0.0
        } else {
            vote_sum / voted as f64
        };
        let confidence = confidence
            .filter(|m| m.is_finite() && *m >= 0.0)
            .unwrap_or_else(|| median(&mut counts));
        debug!("weighted rating uses C = {global_mean:.3}, m = {confidence:.1}");
        Self {
            global_mean,
            confidence,
        }
    }

    /// Catalog mean `C`.
    #[must_use]
    pub const fn global_mean(&self) -> f64 {
        self.global_mean
    }

    /// Confidence constant `m`.
    #[must_use]
    pub const fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Weighted rating on the catalog's ten-point scale.
    ///
    /// With no votes and a zero confidence the formula is undefined and the
    /// catalog mean is returned.
    #[must_use]
    pub fn adjusted(&self, vote_average: f64, vote_count: u32) -> f64 {
        let votes = f64::from(vote_count);
        let total = votes + self.confidence;
        if total <= 0.0 || !vote_average.is_finite() {
            return self.global_mean;
        }
        let low = vote_average.min(self.global_mean);
        let high = vote_average.max(self.global_mean);
        let value = self.global_mean + (votes / total) * (vote_average - self.global_mean);
        value.clamp(low, high)
    }

    /// [`BayesianRating::adjusted`] rescaled into `0.0..=1.0`.
    #[must_use]
    pub fn normalised(&self, vote_average: f64, vote_count: u32) -> f64 {
        crate::sanitise(self.adjusted(vote_average, vote_count) / VOTE_SCALE)
    }
}

#[expect(
    clippy::integer_division,
    reason = "the median index halves the sample size"
)]
fn median(counts: &mut [u32]) -> f64 {
    counts.sort_unstable();
    let middle = counts.len() / 2;
    let upper = counts.get(middle).copied().map(f64::from);
    if !counts.len().is_multiple_of(2) {
        return upper.unwrap_or(0.0);
    }
    let lower = middle
        .checked_sub(1)
        .and_then(|index| counts.get(index))
        .copied()
        .map(f64::from);
    match (lower, upper) {
        (Some(a), Some(b)) => f64::midpoint(a, b),
        _ => 0.0,
    }
}
