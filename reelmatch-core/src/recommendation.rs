//! Ranked recommendation output.
//!
//! Results are transient: computed per request and never persisted. Ranking
//! is a strict total order over the composite score with a deterministic
//! tie-break, so identical inputs always yield identical lists.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::{CatalogId, Movie};

/// One ranked recommendation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecommendationResult {
    /// Recommended movie.
    pub movie_id: CatalogId,
    /// Composite score the ranking is based on.
    pub score: f64,
    /// One-based position in the list.
    pub rank: usize,
}

/// Time window of the catalog's trending feed.
///
/// # Examples
/// ```
/// use reelmatch_core::TrendingWindow;
///
/// assert_eq!("week".parse::<TrendingWindow>(), Ok(TrendingWindow::Week));
/// assert_eq!(TrendingWindow::Day.to_string(), "day");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TrendingWindow {
    /// Trending over the last day.
    Day,
    /// Trending over the last week.
    #[default]
    Week,
}

impl TrendingWindow {
    /// Return the window as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

impl fmt::Display for TrendingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognised [`TrendingWindow`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown trending window '{0}' (expected 'day' or 'week')")]
pub struct UnknownWindow(pub String);

impl FromStr for TrendingWindow {
    type Err = UnknownWindow;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            _ => Err(UnknownWindow(s.to_owned())),
        }
    }
}

/// A movie paired with its composite score, prior to ranking.
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    /// Candidate metadata; supplies the tie-break keys.
    pub movie: &'a Movie,
    /// Composite score.
    pub score: f64,
}

impl<'a> ScoredCandidate<'a> {
    /// Pair a movie with its score. Non-finite scores are recorded as `0.0`.
    #[must_use]
    pub const fn new(movie: &'a Movie, score: f64) -> Self {
        let sanitised = if score.is_finite() { score } else { 0.0 };
        Self {
            movie,
            score: sanitised,
        }
    }

    /// Ranking order: score descending, then vote count descending, then
    /// catalog id ascending.
    fn rank_order(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.movie.vote_count.cmp(&self.movie.vote_count))
            .then_with(|| self.movie.id.cmp(&other.movie.id))
    }
}

/// Rank candidates and keep the best `limit`.
///
/// # Examples
/// ```
/// use reelmatch_core::{Movie, ScoredCandidate, rank_candidates};
///
/// let a = Movie::new("a", "A").with_votes(7.0, 10);
/// let b = Movie::new("b", "B").with_votes(7.0, 500);
/// let ranked = rank_candidates(
///     vec![ScoredCandidate::new(&a, 0.5), ScoredCandidate::new(&b, 0.5)],
///     10,
/// );
/// assert_eq!(ranked[0].movie_id.as_str(), "b");
/// assert_eq!(ranked[1].rank, 2);
/// ```
#[must_use]
pub fn rank_candidates(
    mut candidates: Vec<ScoredCandidate<'_>>,
    limit: usize,
) -> Vec<RecommendationResult> {
    candidates.sort_by(ScoredCandidate::rank_order);
    candidates
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(position, candidate)| RecommendationResult {
            movie_id: candidate.movie.id.clone(),
            score: candidate.score,
            rank: position + 1,
        })
        .collect()
}
