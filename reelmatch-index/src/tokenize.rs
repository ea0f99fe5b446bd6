//! Weighted feature terms for a movie.
//!
//! Each feature family lives in its own namespace (`genre:`, `keyword:`,
//! `cast:`, `director:`, `word:`) so a genre called "Family" never collides
//! with the overview word "family".

use std::collections::BTreeMap;

use reelmatch_core::Movie;

/// Repetition weight of each genre.
pub const GENRE_WEIGHT: f64 = 3.0;
/// Repetition weight of each keyword.
pub const KEYWORD_WEIGHT: f64 = 2.0;
/// Repetition weight of each billed cast member.
pub const CAST_WEIGHT: f64 = 1.0;
/// Repetition weight of the director.
pub const DIRECTOR_WEIGHT: f64 = 2.0;
/// Repetition weight of each overview word occurrence.
pub const OVERVIEW_WEIGHT: f64 = 1.0;
/// Only the first `TOP_CAST` billed names contribute.
pub const TOP_CAST: usize = 8;

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "it", "as", "be", "this", "that", "from", "was", "are", "were", "been", "has", "have",
    "had", "not", "no", "his", "her", "their", "its", "he", "she", "they", "who", "when",
    "after", "into", "one", "two", "up", "out", "over", "while", "what", "where",
];

/// Lower-cased alphanumeric words of `text`, minus stop words and single
/// characters.
///
/// # Examples
/// ```
/// use reelmatch_index::overview_words;
///
/// let words: Vec<_> = overview_words("The crew of a deep-space ship.").collect();
/// assert_eq!(words, vec!["crew", "deep", "space", "ship"]);
/// ```
pub fn overview_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().nth(1).is_some())
        .map(str::to_lowercase)
        .filter(|word| !STOP_WORDS.contains(&word.as_str()))
}

fn name_token(prefix: &str, name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(format!("{prefix}:{}", trimmed.to_lowercase()))
}

/// Weighted term frequencies for `movie`.
///
/// Cast, director and genre names are whole tokens; the overview contributes
/// one token per word occurrence.
#[expect(
    clippy::float_arithmetic,
    reason = "term frequencies accumulate weights"
)]
#[must_use]
pub fn weighted_terms(movie: &Movie) -> BTreeMap<String, f64> {
    let mut terms: BTreeMap<String, f64> = BTreeMap::new();
    let mut add = |token: Option<String>, weight: f64| {
        if let Some(term) = token {
            *terms.entry(term).or_insert(0.0) += weight;
        }
    };
    for genre in &movie.genres {
        add(name_token("genre", genre), GENRE_WEIGHT);
    }
    for keyword in &movie.keywords {
        add(name_token("keyword", keyword), KEYWORD_WEIGHT);
    }
    for member in movie.cast.iter().take(TOP_CAST) {
        add(name_token("cast", member), CAST_WEIGHT);
    }
    if let Some(director) = &movie.director {
        add(name_token("director", director), DIRECTOR_WEIGHT);
    }
    for word in overview_words(&movie.overview) {
        add(Some(format!("word:{word}")), OVERVIEW_WEIGHT);
    }
    terms
}
