//! Benchmark support utilities for the recommender.
//!
//! Generates deterministic synthetic catalogs and rating histories so runs
//! are comparable across commits.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use reelmatch_core::{CatalogSnapshot, InMemoryRatings, Movie, Rating, RatingScore, TrendingFeed};

/// Seed for deterministic random number generation in benchmarks.
pub const BENCHMARK_SEED: u64 = 42;

/// Ratings written by each synthetic user.
pub const RATINGS_PER_USER: usize = 20;

const GENRES: [&str; 8] = [
    "Action",
    "Comedy",
    "Drama",
    "Horror",
    "Romance",
    "Science Fiction",
    "Thriller",
    "Animation",
];

const WORDS: [&str; 12] = [
    "heist", "love", "ghost", "city", "war", "road", "island", "family", "space", "secret",
    "storm", "river",
];

const LANGUAGES: [&str; 4] = ["en", "hi", "ta", "fr"];

/// Length of each trending feed.
const FEED_LENGTH: usize = 20;

fn pick<'a>(rng: &mut ChaCha8Rng, options: &[&'a str]) -> &'a str {
    options
        .get(rng.gen_range(0..options.len()))
        .copied()
        .unwrap_or_default()
}

/// Generate `count` movies with random genres, keywords, people and votes.
///
/// The weekly trending feed lists the first [`FEED_LENGTH`] movies in a
/// shuffled order; the daily feed is empty so the whole-catalog path is
/// exercised too.
#[must_use]
pub fn generate_catalog(count: usize, seed: u64) -> CatalogSnapshot {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let movies: Vec<Movie> = (0..count)
        .map(|i| {
            let genres = [pick(&mut rng, &GENRES), pick(&mut rng, &GENRES)];
            let overview: Vec<&str> = (0..6).map(|_| pick(&mut rng, &WORDS)).collect();
            let year = rng.gen_range(1980..=2024);
            let director = format!("Director {}", rng.gen_range(0..count.div_ceil(4).max(1)));
            let cast: Vec<String> = (0..3)
                .map(|_| format!("Actor {}", rng.gen_range(0..count.max(1))))
                .collect();
            Movie::new(format!("b{i:05}"), format!("Movie {i}"))
                .with_overview(overview.join(" "))
                .with_genres(genres)
                .with_keywords([pick(&mut rng, &WORDS)])
                .with_cast(cast)
                .with_director(director)
                .with_language(pick(&mut rng, &LANGUAGES))
                .with_release_date(format!("{year}-06-15"))
                .with_votes(rng.gen_range(3.0..9.0), rng.gen_range(0..20_000))
                .with_popularity(rng.gen_range(0.0..500.0))
        })
        .collect();

    let mut week: Vec<_> = movies
        .iter()
        .take(FEED_LENGTH)
        .map(|movie| movie.id.clone())
        .collect();
    week.reverse();
    CatalogSnapshot::new(movies).with_trending(TrendingFeed {
        day: Vec::new(),
        week,
    })
}

/// Generate [`RATINGS_PER_USER`] half-star ratings for each of `users`
/// users over movies drawn from a catalog of `movies` entries.
#[must_use]
pub fn generate_ratings(users: u64, movies: usize, seed: u64) -> InMemoryRatings {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut rows = Vec::new();
    for user_id in 1..=users {
        for _ in 0..RATINGS_PER_USER {
            let movie = rng.gen_range(0..movies.max(1));
            let steps: u8 = rng.gen_range(1..=10);
            #[expect(clippy::float_arithmetic, reason = "half-star steps")]
            let raw = f64::from(steps) / 2.0;
            if let Ok(score) = RatingScore::new(raw) {
                rows.push(Rating::new(user_id, format!("b{movie:05}"), score, 0));
            }
        }
    }
    InMemoryRatings::from_ratings(rows)
}
