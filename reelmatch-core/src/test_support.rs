//! Test-only fixtures shared by unit, behaviour, and property tests across
//! the workspace.

use crate::{
    CatalogSnapshot, InMemoryRatings, Movie, Rating, RatingScore, TrendingFeed, UserId,
};

/// Build a rating, panicking on an invalid score.
///
/// # Panics
/// Panics when `score` is not a valid half-star rating.
#[must_use]
pub fn rating(user_id: UserId, movie_id: &str, score: f64) -> Rating {
    let validated = RatingScore::new(score)
        .unwrap_or_else(|err| panic!("fixture rating {score} is invalid: {err}"));
    Rating::new(user_id, movie_id, validated, 0)
}

/// Build a ratings store from `(user, movie, score)` triples.
///
/// # Panics
/// Panics when any score is not a valid half-star rating.
#[must_use]
pub fn ratings_store(entries: &[(UserId, &str, f64)]) -> InMemoryRatings {
    InMemoryRatings::from_ratings(
        entries
            .iter()
            .map(|&(user_id, movie_id, score)| rating(user_id, movie_id, score)),
    )
}

/// A small catalog spanning several genres, languages and decades.
///
/// Movies `m01`..`m12`; `m09`..`m11` are Hindi/Tamil titles. The weekly
/// trending feed lists `m12`, `m01` and `m09`; the daily feed lists `m12`.
#[must_use]
pub fn sample_catalog() -> CatalogSnapshot {
    let movies = vec![
        Movie::new("m01", "Orbital Drift")
            .with_overview("An astronaut stranded in orbit fights to return home.")
            .with_genres(["Science Fiction", "Drama"])
            .with_keywords(["space", "survival"])
            .with_cast(["Ava Stone", "Rafael Ortiz"])
            .with_director("Lena Marsh")
            .with_language("en")
            .with_release_date("2023-06-02")
            .with_votes(7.8, 4200)
            .with_popularity(88.0),
        Movie::new("m02", "Signal Lost")
            .with_overview("A deep space crew loses contact with mission control.")
            .with_genres(["Science Fiction", "Thriller"])
            .with_keywords(["space", "isolation"])
            .with_cast(["Ava Stone", "Kenji Mori"])
            .with_director("Lena Marsh")
            .with_language("en")
            .with_release_date("2019-09-13")
            .with_votes(7.1, 2100)
            .with_popularity(40.0),
        Movie::new("m03", "The Long Winter")
            .with_overview("A family endures a brutal winter on the frontier.")
            .with_genres(["Drama", "History"])
            .with_keywords(["frontier", "family"])
            .with_cast(["Hannah Bell"])
            .with_director("Owen Price")
            .with_language("en")
            .with_release_date("2008-11-21")
            .with_votes(7.4, 900)
            .with_popularity(12.0),
        Movie::new("m04", "Laugh Track")
            .with_overview("A struggling comedian gets one last shot at fame.")
            .with_genres(["Comedy"])
            .with_keywords(["stand-up", "fame"])
            .with_cast(["Milo Grant"])
            .with_director("Tess Avery")
            .with_language("en")
            .with_release_date("2021-03-05")
            .with_votes(6.2, 1500)
            .with_popularity(25.0),
        Movie::new("m05", "Neon Alley")
            .with_overview("A detective hunts a killer through a rain-soaked city.")
            .with_genres(["Crime", "Thriller"])
            .with_keywords(["detective", "noir"])
            .with_cast(["Kenji Mori", "Hannah Bell"])
            .with_director("Owen Price")
            .with_language("en")
            .with_release_date("2017-10-27")
            .with_votes(7.0, 3100)
            .with_popularity(33.0),
        Movie::new("m06", "Red Planet Rising")
            .with_overview("Colonists on Mars uncover an ancient signal.")
            .with_genres(["Science Fiction", "Adventure"])
            .with_keywords(["space", "mars"])
            .with_cast(["Rafael Ortiz"])
            .with_director("Lena Marsh")
            .with_language("en")
            .with_release_date("2024-02-16")
            .with_votes(7.5, 2600)
            .with_popularity(95.0),
        Movie::new("m07", "Paper Hearts")
            .with_overview("Two pen pals finally meet after twenty years.")
            .with_genres(["Romance", "Drama"])
            .with_keywords(["letters", "reunion"])
            .with_cast(["Ava Stone"])
            .with_director("Tess Avery")
            .with_language("fr")
            .with_release_date("2015-02-13")
            .with_votes(6.9, 700)
            .with_popularity(15.0),
        Movie::new("m08", "Tiny Titans")
            .with_overview("")
            .with_genres(["Animation", "Family"])
            .with_language("en")
            .with_release_date("2022-07-01")
            .with_votes(6.5, 40)
            .with_popularity(18.0),
        Movie::new("m09", "Monsoon Letters")
            .with_overview("A postman in Mumbai delivers letters that change lives.")
            .with_genres(["Drama", "Romance"])
            .with_keywords(["letters", "monsoon"])
            .with_cast(["Arjun Mehta", "Priya Rao"])
            .with_director("Kavya Iyer")
            .with_language("hi")
            .with_release_date("2023-08-11")
            .with_votes(7.6, 1800)
            .with_popularity(60.0),
        Movie::new("m10", "Chennai Express Lane")
            .with_overview("A taxi driver is drawn into a heist across Chennai.")
            .with_genres(["Action", "Crime"])
            .with_keywords(["heist", "taxi"])
            .with_cast(["Vikram Raj"])
            .with_director("Kavya Iyer")
            .with_language("ta")
            .with_release_date("2020-01-10")
            .with_votes(7.2, 1100)
            .with_popularity(30.0),
        Movie::new("m11", "Stars Over Delhi")
            .with_overview("An amateur astronomer in Delhi chases a comet.")
            .with_genres(["Science Fiction", "Drama"])
            .with_keywords(["space", "comet"])
            .with_cast(["Priya Rao"])
            .with_director("Kavya Iyer")
            .with_language("hi")
            .with_release_date("2022-12-02")
            .with_votes(7.3, 650)
            .with_popularity(35.0),
        Movie::new("m12", "Hollow Crown")
            .with_overview("A deposed queen plots her return to the throne.")
            .with_genres(["History", "Drama", "War"])
            .with_keywords(["monarchy", "betrayal"])
            .with_cast(["Hannah Bell", "Milo Grant"])
            .with_director("Owen Price")
            .with_language("en")
            .with_release_date("2024-10-04")
            .with_votes(8.1, 5200)
            .with_popularity(120.0),
    ];
    CatalogSnapshot::new(movies).with_trending(TrendingFeed {
        day: vec!["m12".into()],
        week: vec!["m12".into(), "m01".into(), "m09".into()],
    })
}

/// Ratings over [`sample_catalog`] for four users.
///
/// - User 1 rates five movies and loves science fiction.
/// - Users 2 and 3 share most of user 1's taste and rate extra titles.
/// - User 4 has only four ratings.
#[must_use]
pub fn sample_ratings() -> InMemoryRatings {
    ratings_store(&[
        (1, "m01", 5.0),
        (1, "m02", 4.5),
        (1, "m03", 2.0),
        (1, "m04", 1.5),
        (1, "m05", 3.0),
        (2, "m01", 4.5),
        (2, "m02", 4.0),
        (2, "m03", 2.5),
        (2, "m04", 1.0),
        (2, "m06", 5.0),
        (2, "m11", 4.5),
        (3, "m01", 5.0),
        (3, "m02", 5.0),
        (3, "m03", 1.5),
        (3, "m05", 3.5),
        (3, "m06", 4.5),
        (3, "m07", 2.0),
        (4, "m01", 4.0),
        (4, "m07", 3.5),
        (4, "m09", 4.5),
        (4, "m12", 5.0),
    ])
}
