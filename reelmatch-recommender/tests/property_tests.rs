#![expect(
    clippy::expect_used,
    clippy::float_arithmetic,
    reason = "property tests build half-star scores and use expect for readable failures"
)]

//! Property-based tests for the recommender's ranking operations.
//!
//! # Invariants tested
//!
//! - **No repeats:** personalised and popular rankings never include movies
//!   the user rated or saved.
//! - **Bounded:** every ranking returns at most `n` results.
//! - **Ordered:** ranks run `1..=len` and scores never increase.

use std::collections::BTreeSet;

use proptest::prelude::*;
use reelmatch_core::test_support::sample_catalog;
use reelmatch_core::{
    CatalogId, CatalogSnapshot, InMemoryRatings, InMemoryWatchlists, MovieCatalog, Rating,
    RatingScore, RatingsStore, RecommendationResult, TrendingWindow, UserId,
};
use reelmatch_index::ContentIndex;
use reelmatch_recommender::HybridRecommender;

const MOVIES: u8 = 12;

fn movie_id(index: u8) -> CatalogId {
    CatalogId::from(format!("m{:02}", index + 1))
}

fn half_star() -> impl Strategy<Value = RatingScore> {
    (0_u8..=10).prop_map(|steps| {
        RatingScore::new(f64::from(steps) / 2.0).expect("half-star steps are valid")
    })
}

fn ratings_strategy() -> impl Strategy<Value = InMemoryRatings> {
    prop::collection::vec((1_u64..=4, 0..MOVIES, half_star()), 0..40).prop_map(|rows| {
        InMemoryRatings::from_ratings(
            rows.into_iter()
                .map(|(user, movie, score)| Rating::new(user, movie_id(movie), score, 0)),
        )
    })
}

fn watchlist_strategy() -> impl Strategy<Value = Vec<CatalogId>> {
    prop::collection::vec((0..MOVIES).prop_map(movie_id), 0..4)
}

fn assert_well_formed(results: &[RecommendationResult], n: usize) {
    assert!(results.len() <= n);
    for (position, result) in results.iter().enumerate() {
        assert_eq!(result.rank, position + 1);
        assert!(result.score.is_finite());
    }
    assert!(results.windows(2).all(|pair| match pair {
        [first, second] => first.score >= second.score,
        _ => true,
    }));
}

fn seen_by(
    ratings: &InMemoryRatings,
    watchlist: &[CatalogId],
    user_id: UserId,
) -> BTreeSet<CatalogId> {
    ratings
        .ratings_by_user(user_id)
        .map(|rating| rating.movie_id)
        .chain(watchlist.iter().cloned())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: rankings for a user never repeat what they have seen.
    #[test]
    fn rankings_skip_seen_movies(
        ratings in ratings_strategy(),
        watchlist in watchlist_strategy(),
        user_id in 1_u64..=4,
        n in 0_usize..15,
    ) {
        let catalog = sample_catalog();
        let index = ContentIndex::build(&catalog);
        let watchlists = InMemoryWatchlists::from_lists([(user_id, watchlist.clone())]);
        let engine = HybridRecommender::new(&catalog, &ratings, &watchlists, &index);
        let seen = seen_by(&ratings, &watchlist, user_id);

        if let Ok(results) = engine.personalized_recommendations(user_id, n) {
            assert_well_formed(&results, n);
            prop_assert!(results.iter().all(|result| !seen.contains(&result.movie_id)));
        }
        let popular = engine.popular(user_id, n);
        assert_well_formed(&popular, n);
        prop_assert!(popular.iter().all(|result| !seen.contains(&result.movie_id)));
    }

    /// Property: non-personalised rankings are bounded and ordered.
    #[test]
    fn global_rankings_are_bounded(
        ratings in ratings_strategy(),
        target_index in 0..MOVIES,
        n in 0_usize..15,
    ) {
        let catalog = sample_catalog();
        let index = ContentIndex::build(&catalog);
        let watchlists = InMemoryWatchlists::default();
        let engine = HybridRecommender::new(&catalog, &ratings, &watchlists, &index);

        let target = movie_id(target_index);
        let similar = engine
            .similar_movies(&target, n)
            .expect("every generated id is in the sample catalog");
        assert_well_formed(&similar, n);
        prop_assert!(similar.iter().all(|result| result.movie_id != target));

        assert_well_formed(&engine.trending_top(TrendingWindow::Week, n), n);
        assert_well_formed(&engine.community_trending(n), n);
    }

    /// Property: trending over a catalog without feeds still ranks every
    /// movie at most once.
    #[test]
    fn trending_without_feed_is_a_permutation(n in 0_usize..15) {
        let catalog = CatalogSnapshot::new(sample_catalog().movies().cloned());
        let index = ContentIndex::build(&catalog);
        let ratings = InMemoryRatings::default();
        let watchlists = InMemoryWatchlists::default();
        let engine = HybridRecommender::new(&catalog, &ratings, &watchlists, &index);

        let results = engine.trending_top(TrendingWindow::Day, n);
        assert_well_formed(&results, n);
        let unique: BTreeSet<_> = results.iter().map(|result| &result.movie_id).collect();
        prop_assert_eq!(unique.len(), results.len());
        prop_assert_eq!(results.len(), n.min(usize::from(MOVIES)));
    }
}
