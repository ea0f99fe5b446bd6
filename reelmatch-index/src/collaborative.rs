//! Pearson correlation between users' rating histories.
//!
//! A correlation is only meaningful over enough shared movies and when both
//! users vary their ratings. Pairs failing either test have no similarity at
//! all: [`collaborative_similarity`] returns `None` rather than `0.0`, since a
//! zero would claim the users are uncorrelated.

use std::collections::BTreeMap;

use reelmatch_core::{CatalogId, RatingsStore, UserId};

/// Default minimum number of co-rated movies.
pub const DEFAULT_MIN_OVERLAP: usize = 3;

/// A user's ratings keyed by movie.
pub type RatingProfile = BTreeMap<CatalogId, f64>;

/// Correlation between two users.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserSimilarity {
    /// Pearson coefficient in `-1.0..=1.0`.
    pub coefficient: f64,
    /// Number of movies both users rated.
    pub overlap: usize,
}

/// Collect `user_id`'s ratings into a profile.
pub fn rating_profile<R>(ratings: &R, user_id: UserId) -> RatingProfile
where
    R: RatingsStore + ?Sized,
{
    ratings
        .ratings_by_user(user_id)
        .map(|rating| (rating.movie_id, rating.score.value()))
        .collect()
}

/// Pearson correlation over the movies present in both profiles.
///
/// Returns `None` when fewer than `min_overlap` movies are shared or when
/// either user's shared ratings have zero variance. Shared movies are visited
/// in catalog-id order, so swapping the arguments yields the same value.
///
/// # Examples
/// ```
/// use reelmatch_index::{RatingProfile, profile_similarity};
///
/// let a: RatingProfile = [("1".into(), 5.0), ("2".into(), 3.0), ("3".into(), 1.0)].into();
/// let b: RatingProfile = [("1".into(), 4.0), ("2".into(), 3.0), ("3".into(), 2.0)].into();
/// let similarity = profile_similarity(&a, &b, 3).expect("enough overlap");
/// assert!((similarity.coefficient - 1.0).abs() < 1e-12);
/// assert!(profile_similarity(&a, &b, 4).is_none());
/// ```
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "Pearson correlation averages and multiplies deviations"
)]
#[must_use]
pub fn profile_similarity(
    a: &RatingProfile,
    b: &RatingProfile,
    min_overlap: usize,
) -> Option<UserSimilarity> {
    let shared: Vec<(f64, f64)> = a
        .iter()
        .filter_map(|(movie, left)| b.get(movie).map(|right| (*left, *right)))
        .collect();
    let overlap = shared.len();
    if overlap == 0 || overlap < min_overlap {
        return None;
    }
    let count = overlap as f64;
    let mean_a = shared.iter().map(|(left, _)| left).sum::<f64>() / count;
    let mean_b = shared.iter().map(|(_, right)| right).sum::<f64>() / count;
    let (covariance, variance_a, variance_b) = shared.iter().fold(
        (0.0, 0.0, 0.0),
        |(cov, var_a, var_b), (left, right)| {
            let da = left - mean_a;
            let db = right - mean_b;
            (cov + da * db, var_a + da * da, var_b + db * db)
        },
    );
    if variance_a <= 0.0 || variance_b <= 0.0 {
        return None;
    }
    let coefficient = covariance / (variance_a * variance_b).sqrt();
    coefficient.is_finite().then(|| UserSimilarity {
        coefficient: coefficient.clamp(-1.0, 1.0),
        overlap,
    })
}

/// Pearson similarity between two users read from `ratings`.
///
/// See [`profile_similarity`] for when the result is undefined.
pub fn collaborative_similarity<R>(
    user_a: UserId,
    user_b: UserId,
    ratings: &R,
    min_overlap: usize,
) -> Option<UserSimilarity>
where
    R: RatingsStore + ?Sized,
{
    profile_similarity(
        &rating_profile(ratings, user_a),
        &rating_profile(ratings, user_b),
        min_overlap,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelmatch_core::test_support::{ratings_store, sample_ratings};
    use rstest::rstest;

    #[rstest]
    fn like_minded_users_correlate_positively() {
        let ratings = sample_ratings();
        let similarity =
            collaborative_similarity(1, 2, &ratings, DEFAULT_MIN_OVERLAP).expect("defined");
        assert_eq!(similarity.overlap, 4);
        assert!(similarity.coefficient > 0.9);
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tests compare floating point values")]
    fn opposite_tastes_correlate_negatively() {
        let ratings = ratings_store(&[
            (1, "a", 5.0),
            (1, "b", 3.0),
            (1, "c", 1.0),
            (2, "a", 1.0),
            (2, "b", 3.0),
            (2, "c", 5.0),
        ]);
        let similarity = collaborative_similarity(1, 2, &ratings, 3).expect("defined");
        assert!((similarity.coefficient + 1.0).abs() < 1e-12);
    }

    #[rstest]
    fn below_threshold_is_undefined_not_zero() {
        let ratings = ratings_store(&[(1, "a", 5.0), (1, "b", 1.0), (2, "a", 4.0), (2, "b", 2.0)]);
        assert_eq!(collaborative_similarity(1, 2, &ratings, 3), None);
        assert!(collaborative_similarity(1, 2, &ratings, 2).is_some());
    }

    #[rstest]
    fn zero_variance_is_undefined() {
        let ratings = ratings_store(&[
            (1, "a", 3.0),
            (1, "b", 3.0),
            (1, "c", 3.0),
            (2, "a", 1.0),
            (2, "b", 4.0),
            (2, "c", 5.0),
        ]);
        assert_eq!(collaborative_similarity(1, 2, &ratings, 3), None);
        assert_eq!(collaborative_similarity(2, 1, &ratings, 3), None);
    }

    #[rstest]
    fn unknown_users_are_undefined() {
        assert_eq!(collaborative_similarity(1, 99, &sample_ratings(), 0), None);
    }

    #[rstest]
    #[case(1, 3)]
    #[case(2, 3)]
    #[case(1, 4)]
    fn similarity_is_symmetric(#[case] a: UserId, #[case] b: UserId) {
        let ratings = sample_ratings();
        assert_eq!(
            collaborative_similarity(a, b, &ratings, 2),
            collaborative_similarity(b, a, &ratings, 2)
        );
    }
}
