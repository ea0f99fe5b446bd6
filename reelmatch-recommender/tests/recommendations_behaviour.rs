//! Behavioural coverage for personalised, fallback and trending rankings.

use std::cell::RefCell;

use reelmatch_core::test_support::{sample_catalog, sample_ratings};
use reelmatch_core::{
    CatalogId, CatalogSnapshot, InMemoryRatings, InMemoryWatchlists, Movie, RatingsStore,
    RecommendError, RecommendationResult, TrendingWindow,
};
use reelmatch_index::ContentIndex;
use reelmatch_recommender::{HybridRecommender, Recommendations, Strategy};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

type Engine<'a> = HybridRecommender<'a, CatalogSnapshot, InMemoryRatings, InMemoryWatchlists>;

/// Aggregate fixtures shared across the BDD scenarios.
pub struct TestContext {
    catalog: RefCell<CatalogSnapshot>,
    ratings: RefCell<InMemoryRatings>,
    watchlists: RefCell<InMemoryWatchlists>,
    personal: RefCell<Option<Result<Vec<RecommendationResult>, RecommendError>>>,
    fallback: RefCell<Option<Recommendations>>,
    ranking: RefCell<Vec<RecommendationResult>>,
}

#[fixture]
/// Build a fresh `TestContext` for each scenario run.
pub fn context() -> TestContext {
    TestContext {
        catalog: RefCell::new(CatalogSnapshot::default()),
        ratings: RefCell::new(InMemoryRatings::default()),
        watchlists: RefCell::new(InMemoryWatchlists::default()),
        personal: RefCell::new(None),
        fallback: RefCell::new(None),
        ranking: RefCell::new(Vec::new()),
    }
}

/// Run `f` against a recommender over the context's collaborators.
fn with_engine<T>(context: &TestContext, f: impl FnOnce(&Engine<'_>) -> T) -> T {
    let catalog = context.catalog.borrow();
    let ratings = context.ratings.borrow();
    let watchlists = context.watchlists.borrow();
    let index = ContentIndex::build(&*catalog);
    let engine = HybridRecommender::new(&*catalog, &*ratings, &*watchlists, &index);
    f(&engine)
}

fn personal_results(context: &TestContext) -> Vec<RecommendationResult> {
    match context.personal.borrow().as_ref() {
        Some(Ok(results)) => results.clone(),
        Some(Err(err)) => panic!("personalised request failed: {err}"),
        None => panic!("no personalised request was made"),
    }
}

fn position(results: &[RecommendationResult], movie_id: &str) -> usize {
    results
        .iter()
        .position(|result| result.movie_id.as_str() == movie_id)
        .unwrap_or_else(|| panic!("{movie_id} missing from ranking"))
}

#[given("the sample catalog")]
fn the_sample_catalog(context: &TestContext) {
    *context.catalog.borrow_mut() = sample_catalog();
}

#[given("the sample ratings")]
fn the_sample_ratings(context: &TestContext) {
    *context.ratings.borrow_mut() = sample_ratings();
}

#[given("user 1 saved Stars Over Delhi and Red Planet Rising")]
fn user_one_saved(context: &TestContext) {
    let mut watchlists = context.watchlists.borrow_mut();
    watchlists.add(1, CatalogId::from("m11"));
    watchlists.add(1, CatalogId::from("m06"));
}

#[given("an empty catalog")]
fn an_empty_catalog(context: &TestContext) {
    *context.catalog.borrow_mut() = CatalogSnapshot::default();
}

#[given("a catalog with a recent well-voted movie and an older sparsely voted one")]
fn recent_and_older(context: &TestContext) {
    *context.catalog.borrow_mut() = CatalogSnapshot::new([
        Movie::new("recent", "Recent")
            .with_genres(["Drama"])
            .with_release_date("2024-05-01")
            .with_votes(8.0, 5000)
            .with_popularity(10.0),
        Movie::new("older", "Older")
            .with_genres(["Drama"])
            .with_release_date("2010-05-01")
            .with_votes(8.0, 50)
            .with_popularity(10.0),
        Movie::new("filler", "Filler")
            .with_genres(["Comedy"])
            .with_release_date("2015-05-01")
            .with_votes(5.0, 1000)
            .with_popularity(10.0),
    ]);
}

#[when("user 4 asks for 5 personalised recommendations")]
fn user_four_asks(context: &TestContext) {
    let outcome = with_engine(context, |engine| engine.personalized_recommendations(4, 5));
    *context.personal.borrow_mut() = Some(outcome);
}

#[when("user 1 asks for 3 personalised recommendations")]
fn user_one_asks_three(context: &TestContext) {
    let outcome = with_engine(context, |engine| engine.personalized_recommendations(1, 3));
    *context.personal.borrow_mut() = Some(outcome);
}

#[when("user 1 asks for 10 personalised recommendations")]
fn user_one_asks_ten(context: &TestContext) {
    let outcome = with_engine(context, |engine| engine.personalized_recommendations(1, 10));
    *context.personal.borrow_mut() = Some(outcome);
}

#[when("user 4 asks for recommendations")]
fn user_four_recommend(context: &TestContext) {
    let outcome = with_engine(context, |engine| engine.recommend(4, 3))
        .unwrap_or_else(|err| panic!("fallback never fails: {err}"));
    *context.fallback.borrow_mut() = Some(outcome);
}

#[when("the weekly trending list is requested")]
fn weekly_trending(context: &TestContext) {
    let ranking = with_engine(context, |engine| engine.trending(TrendingWindow::Week));
    *context.ranking.borrow_mut() = ranking;
}

#[when("popular movies are requested for a new user")]
fn popular_for_new_user(context: &TestContext) {
    let ranking = with_engine(context, |engine| engine.popular(42, 10));
    *context.ranking.borrow_mut() = ranking;
}

#[then("the request fails because 4 of 5 required ratings exist")]
fn fails_insufficient(context: &TestContext) {
    let personal = context.personal.borrow();
    assert_eq!(
        personal.as_ref().and_then(|outcome| outcome.as_ref().err()),
        Some(&RecommendError::InsufficientData {
            user_id: 4,
            ratings: 4,
            required: 5,
        })
    );
}

#[then("at most 3 movies are returned")]
fn at_most_three(context: &TestContext) {
    let results = personal_results(context);
    assert!(!results.is_empty());
    assert!(results.len() <= 3);
}

#[then("none of them were rated by user 1")]
fn none_rated(context: &TestContext) {
    let rated: Vec<CatalogId> = context
        .ratings
        .borrow()
        .ratings_by_user(1)
        .map(|rating| rating.movie_id)
        .collect();
    for result in personal_results(context) {
        assert!(
            !rated.contains(&result.movie_id),
            "{} was already rated",
            result.movie_id
        );
    }
}

#[then("neither saved movie is recommended")]
fn saved_excluded(context: &TestContext) {
    let results = personal_results(context);
    assert!(
        results
            .iter()
            .all(|result| !matches!(result.movie_id.as_str(), "m06" | "m11"))
    );
}

#[then("the popular strategy answers with 3 movies")]
fn popular_strategy(context: &TestContext) {
    let fallback = context.fallback.borrow();
    let Some(recommendations) = fallback.as_ref() else {
        panic!("no recommendation request was made");
    };
    assert_eq!(recommendations.strategy, Strategy::Popular);
    assert_eq!(recommendations.results.len(), 3);
}

#[then("no movies are returned")]
fn nothing_returned(context: &TestContext) {
    assert!(context.ranking.borrow().is_empty());
}

#[then("the recent movie ranks above the older one")]
fn recent_above_older(context: &TestContext) {
    let ranking = context.ranking.borrow();
    assert!(position(&ranking, "recent") < position(&ranking, "older"));
}

#[scenario(path = "tests/features/recommendations.feature", index = 0)]
fn insufficient_ratings(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommendations.feature", index = 1)]
fn bounded_unseen_list(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommendations.feature", index = 2)]
fn watchlist_excluded(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommendations.feature", index = 3)]
fn popular_fallback(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommendations.feature", index = 4)]
fn empty_catalog_trending(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommendations.feature", index = 5)]
fn recent_movie_trends(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommendations.feature", index = 6)]
fn recent_movie_is_popular(context: TestContext) {
    let _ = context;
}
