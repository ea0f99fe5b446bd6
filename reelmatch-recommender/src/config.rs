//! Recommender configuration.
//!
//! Every weight has a documented default and can be overridden from a JSON
//! document; fields left out keep their defaults.

use reelmatch_index::DEFAULT_MIN_OVERLAP;
use reelmatch_scorer::{CategoryPreference, RecencyDecay};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Share of the hybrid similarity given to each filtering method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HybridSplit {
    /// Weight of the collaborative prediction.
    pub collaborative: f64,
    /// Weight of the content-based score.
    pub content: f64,
}

impl Default for HybridSplit {
    fn default() -> Self {
        Self {
            collaborative: 0.7,
            content: 0.3,
        }
    }
}

/// Weights of the composite score used by personalised recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompositeWeights {
    /// Hybrid (or content) similarity.
    pub similarity: f64,
    /// Genre overlap with the user's liked movies.
    pub genre: f64,
    /// Recency multiplier.
    pub recency: f64,
    /// Normalised Bayesian rating.
    pub rating: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            similarity: 0.35,
            genre: 0.20,
            recency: 0.15,
            rating: 0.10,
        }
    }
}

/// Scoring of similar movies.
///
/// The base score reuses [`CompositeWeights`]; the bonuses are additive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimilarConfig {
    /// Base weights over content similarity, genre overlap, recency and rating.
    pub weights: CompositeWeights,
    /// Bonus when both movies share a director.
    pub director_bonus: f64,
    /// Bonus per shared cast member.
    pub cast_bonus: f64,
    /// Cap on the total cast bonus.
    pub cast_bonus_cap: f64,
    /// Bonus when both movies share an original language.
    pub language_bonus: f64,
    /// Candidates with a lower genre overlap are dropped.
    pub min_genre_overlap: f64,
}

impl Default for SimilarConfig {
    fn default() -> Self {
        Self {
            weights: CompositeWeights::default(),
            director_bonus: 0.15,
            cast_bonus: 0.05,
            cast_bonus_cap: 0.15,
            language_bonus: 0.05,
            min_genre_overlap: 0.0,
        }
    }
}

/// Weights of the trending composite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrendingWeights {
    /// Popularity velocity from the catalog's trending feed.
    pub velocity: f64,
    /// Recency multiplier.
    pub recency: f64,
    /// Normalised Bayesian rating.
    pub rating: f64,
}

impl Default for TrendingWeights {
    fn default() -> Self {
        Self {
            velocity: 0.5,
            recency: 0.25,
            rating: 0.25,
        }
    }
}

/// Weights of the popularity fallback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PopularWeights {
    /// Normalised Bayesian rating.
    pub rating: f64,
    /// Popularity relative to the most popular movie.
    pub popularity: f64,
    /// Recency multiplier.
    pub recency: f64,
}

impl Default for PopularWeights {
    fn default() -> Self {
        Self {
            rating: 0.6,
            popularity: 0.25,
            recency: 0.15,
        }
    }
}

/// Configuration of a [`HybridRecommender`](crate::HybridRecommender).
///
/// # Examples
/// ```
/// use reelmatch_recommender::RecommenderConfig;
///
/// let config: RecommenderConfig =
///     serde_json::from_str(r#"{"min_ratings": 3, "hybrid": {"collaborative": 0.5}}"#)
///         .expect("valid config");
/// assert_eq!(config.min_ratings, 3);
/// assert_eq!(config.hybrid.content, 0.3);
/// assert_eq!(config.neighbours, 20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecommenderConfig {
    /// Ratings a user needs before personalised recommendations run.
    pub min_ratings: usize,
    /// Number of most similar users consulted (K).
    pub neighbours: usize,
    /// Co-rated movies required for a defined user similarity.
    pub min_overlap: usize,
    /// Positively correlated neighbours required before collaborative
    /// predictions are used; below this the hybrid score is content-only.
    pub min_neighbours: usize,
    /// Ratings at or above this mark a movie as liked.
    pub liked_threshold: f64,
    /// Collaborative/content split of the hybrid similarity.
    pub hybrid: HybridSplit,
    /// Composite weights for personalised recommendations.
    pub weights: CompositeWeights,
    /// Similar-movie scoring.
    pub similar: SimilarConfig,
    /// Trending composite weights.
    pub trending: TrendingWeights,
    /// Popularity fallback weights.
    pub popular: PopularWeights,
    /// Recency decay parameters.
    pub recency: RecencyDecay,
    /// Year treated as "now" by the recency decay. Defaults to the newest
    /// release year in the catalog.
    pub reference_year: Option<i32>,
    /// Bayesian confidence constant. Defaults to the catalog's median vote
    /// count.
    pub bayesian_confidence: Option<f64>,
    /// Additive bonus per preferred original language.
    pub preference: CategoryPreference,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            min_ratings: 5,
            neighbours: 20,
            min_overlap: DEFAULT_MIN_OVERLAP,
            min_neighbours: 1,
            liked_threshold: 4.0,
            hybrid: HybridSplit::default(),
            weights: CompositeWeights::default(),
            similar: SimilarConfig::default(),
            trending: TrendingWeights::default(),
            popular: PopularWeights::default(),
            recency: RecencyDecay::default(),
            reference_year: None,
            bayesian_confidence: None,
            preference: CategoryPreference::regional(
                "hi",
                0.10,
                ["ta", "te", "ml", "kn", "bn", "mr"],
                0.05,
            ),
        }
    }
}

fn check_weight(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidWeight { name, value })
    }
}

impl RecommenderConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] naming the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.neighbours == 0 {
            return Err(ConfigError::ZeroNeighbours);
        }
        if self.min_overlap < 2 {
            return Err(ConfigError::MinOverlapTooSmall {
                min_overlap: self.min_overlap,
            });
        }
        if !(0.0..=5.0).contains(&self.liked_threshold) {
            return Err(ConfigError::InvalidLikedThreshold {
                threshold: self.liked_threshold,
            });
        }
        self.validate_weights()?;
        if self.hybrid.collaborative <= 0.0 && self.hybrid.content <= 0.0 {
            return Err(ConfigError::ZeroHybridSplit);
        }
        if let Some(confidence) = self.bayesian_confidence {
            check_weight("bayesian_confidence", confidence)?;
        }
        self.recency.validate()?;
        self.preference.validate()?;
        Ok(())
    }

    fn validate_weights(&self) -> Result<(), ConfigError> {
        let similar = &self.similar;
        [
            ("hybrid.collaborative", self.hybrid.collaborative),
            ("hybrid.content", self.hybrid.content),
            ("weights.similarity", self.weights.similarity),
            ("weights.genre", self.weights.genre),
            ("weights.recency", self.weights.recency),
            ("weights.rating", self.weights.rating),
            ("similar.weights.similarity", similar.weights.similarity),
            ("similar.weights.genre", similar.weights.genre),
            ("similar.weights.recency", similar.weights.recency),
            ("similar.weights.rating", similar.weights.rating),
            ("similar.director_bonus", similar.director_bonus),
            ("similar.cast_bonus", similar.cast_bonus),
            ("similar.cast_bonus_cap", similar.cast_bonus_cap),
            ("similar.language_bonus", similar.language_bonus),
            ("similar.min_genre_overlap", similar.min_genre_overlap),
            ("trending.velocity", self.trending.velocity),
            ("trending.recency", self.trending.recency),
            ("trending.rating", self.trending.rating),
            ("popular.rating", self.popular.rating),
            ("popular.popularity", self.popular.popularity),
            ("popular.recency", self.popular.recency),
        ]
        .into_iter()
        .try_for_each(|(name, value)| check_weight(name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelmatch_scorer::ScoringError;
    use rstest::rstest;

    #[rstest]
    fn defaults_are_valid() {
        let config = RecommenderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.preference.bonus("hi"), 0.10);
        assert_eq!(config.preference.bonus("ml"), 0.05);
    }

    #[rstest]
    fn rejects_zero_neighbours() {
        let config = RecommenderConfig {
            neighbours: 0,
            ..RecommenderConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroNeighbours));
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn rejects_tiny_overlap(#[case] min_overlap: usize) {
        let config = RecommenderConfig {
            min_overlap,
            ..RecommenderConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::MinOverlapTooSmall { min_overlap })
        );
    }

    #[rstest]
    fn rejects_zero_hybrid_split() {
        let config = RecommenderConfig {
            hybrid: HybridSplit {
                collaborative: 0.0,
                content: 0.0,
            },
            ..RecommenderConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroHybridSplit));
    }

    #[rstest]
    fn names_negative_weight() {
        let mut config = RecommenderConfig::default();
        config.trending.rating = -0.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeight { name: "trending.rating", .. })
        ));
    }

    #[rstest]
    fn surfaces_scoring_errors() {
        let mut config = RecommenderConfig::default();
        config.recency.horizon_years = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::Scoring(ScoringError::ZeroHorizon))
        );
    }

    #[rstest]
    fn rejects_unknown_fields() {
        let result = serde_json::from_str::<RecommenderConfig>(r#"{"neighbors": 5}"#);
        assert!(result.is_err());
    }

    #[rstest]
    fn decodes_nested_sections() {
        let config: RecommenderConfig = serde_json::from_str(
            r#"{
                "recency": {"curve": "exponential"},
                "reference_year": 2025,
                "preference": {"fr": 0.2},
                "similar": {"min_genre_overlap": 0.25}
            }"#,
        )
        .expect("valid config");
        assert_eq!(config.reference_year, Some(2025));
        assert_eq!(config.preference.bonus("hi"), 0.0);
        assert_eq!(config.preference.bonus("fr"), 0.2);
        assert_eq!(config.similar.min_genre_overlap, 0.25);
        assert_eq!(config.similar.director_bonus, 0.15);
    }
}
