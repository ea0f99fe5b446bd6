//! Movie metadata as delivered by the external catalog service.
//!
//! A [`Movie`] is an immutable snapshot: the catalog refreshes it wholesale
//! and the engine only ever reads it.

use std::collections::BTreeSet;
use std::fmt;

/// Identifier assigned to a movie by the external catalog.
///
/// Identifiers order lexicographically; ranking relies on this as its final
/// tie-break. Numeric identifiers are stored in their decimal form.
///
/// # Examples
/// ```
/// use reelmatch_core::CatalogId;
///
/// let id = CatalogId::from(27205_u64);
/// assert_eq!(id.as_str(), "27205");
/// assert!(CatalogId::from("10") < CatalogId::from("9"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "RawCatalogId", into = "String")
)]
pub struct CatalogId(String);

impl CatalogId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CatalogId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for CatalogId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for CatalogId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<CatalogId> for String {
    fn from(value: CatalogId) -> Self {
        value.0
    }
}

/// Catalog exports carry identifiers either as JSON numbers or strings.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawCatalogId {
    Number(u64),
    Text(String),
}

#[cfg(feature = "serde")]
impl From<RawCatalogId> for CatalogId {
    fn from(raw: RawCatalogId) -> Self {
        match raw {
            RawCatalogId::Number(value) => Self::from(value),
            RawCatalogId::Text(value) => Self(value),
        }
    }
}

/// Per-movie attributes consumed by the recommender.
///
/// `vote_average` uses the catalog's `0.0..=10.0` scale. `release_date`
/// keeps the catalog's `YYYY-MM-DD` text; only the year is interpreted.
///
/// # Examples
/// ```
/// use reelmatch_core::Movie;
///
/// let movie = Movie::new("603", "The Matrix")
///     .with_genres(["Action", "Science Fiction"])
///     .with_release_date("1999-03-30")
///     .with_votes(8.2, 24_000);
/// assert_eq!(movie.release_year(), Some(1999));
/// assert!(movie.genres.contains("Action"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Movie {
    /// Catalog identifier.
    pub id: CatalogId,
    /// Display title.
    pub title: String,
    /// Free-text synopsis; may be empty.
    pub overview: String,
    /// Genre names.
    pub genres: BTreeSet<String>,
    /// Catalog keywords.
    pub keywords: Vec<String>,
    /// Billed cast, most prominent first.
    pub cast: Vec<String>,
    /// Director, when known.
    pub director: Option<String>,
    /// Original language as an ISO 639-1 code.
    pub language: String,
    /// Release date in `YYYY-MM-DD` form.
    pub release_date: Option<String>,
    /// Mean vote on the catalog's ten-point scale.
    pub vote_average: f64,
    /// Number of votes behind `vote_average`.
    pub vote_count: u32,
    /// Catalog popularity signal.
    pub popularity: f64,
}

impl Movie {
    /// Construct a movie with an identifier and title and empty metadata.
    pub fn new(id: impl Into<CatalogId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Year component of `release_date`, if it parses.
    ///
    /// # Examples
    /// ```
    /// use reelmatch_core::Movie;
    ///
    /// assert_eq!(Movie::new("1", "A").with_release_date("2024-05-01").release_year(), Some(2024));
    /// assert_eq!(Movie::new("2", "B").with_release_date("TBA").release_year(), None);
    /// assert_eq!(Movie::new("3", "C").release_year(), None);
    /// ```
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.as_deref()?.get(..4)?.parse().ok()
    }

    /// Replace the synopsis.
    #[must_use]
    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = overview.into();
        self
    }

    /// Replace the genre set.
    #[must_use]
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the keyword list.
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the cast list.
    #[must_use]
    pub fn with_cast<I, S>(mut self, cast: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cast = cast.into_iter().map(Into::into).collect();
        self
    }

    /// Set the director.
    #[must_use]
    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = Some(director.into());
        self
    }

    /// Set the original language code.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the release date (`YYYY-MM-DD`).
    #[must_use]
    pub fn with_release_date(mut self, date: impl Into<String>) -> Self {
        self.release_date = Some(date.into());
        self
    }

    /// Set the vote average and count.
    #[must_use]
    pub fn with_votes(mut self, vote_average: f64, vote_count: u32) -> Self {
        self.vote_average = vote_average;
        self.vote_count = vote_count;
        self
    }

    /// Set the popularity signal.
    #[must_use]
    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = popularity;
        self
    }
}
