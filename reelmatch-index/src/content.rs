//! TF-IDF content vectors and cosine similarity.

use std::collections::BTreeMap;

use log::info;
use reelmatch_core::{CatalogId, Movie, MovieCatalog};

use crate::tokenize::weighted_terms;

/// Sparse TF-IDF feature vector of one movie.
///
/// Entries are `(dimension, weight)` pairs sorted by dimension. Every vector
/// from one [`ContentIndex`] build shares the same `dimensions`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentVector {
    entries: Vec<(u32, f64)>,
    dimensions: usize,
    magnitude: f64,
}

impl ContentVector {
    #[expect(
        clippy::float_arithmetic,
        reason = "the Euclidean norm sums squared weights"
    )]
    fn from_entries(entries: Vec<(u32, f64)>, dimensions: usize) -> Self {
        let magnitude = entries
            .iter()
            .map(|(_, weight)| weight * weight)
            .sum::<f64>()
            .sqrt();
        Self {
            entries,
            dimensions,
            magnitude,
        }
    }

    /// Non-zero `(dimension, weight)` pairs in dimension order.
    #[must_use]
    pub fn entries(&self) -> &[(u32, f64)] {
        &self.entries
    }

    /// Dimensionality of the vector space this vector belongs to.
    #[must_use]
    pub const fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Euclidean norm.
    #[must_use]
    pub const fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Report whether the vector carries no features.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty() || self.magnitude <= 0.0
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "dot products multiply and sum weights"
    )]
    fn dot(&self, other: &Self) -> f64 {
        let mut left = self.entries.iter().peekable();
        let mut right = other.entries.iter().peekable();
        let mut sum = 0.0;
        while let (Some(&&(a_dim, a_weight)), Some(&&(b_dim, b_weight))) =
            (left.peek(), right.peek())
        {
            match a_dim.cmp(&b_dim) {
                std::cmp::Ordering::Less => {
                    left.next();
                }
                std::cmp::Ordering::Greater => {
                    right.next();
                }
                std::cmp::Ordering::Equal => {
                    sum += a_weight * b_weight;
                    left.next();
                    right.next();
                }
            }
        }
        sum
    }
}

/// Cosine similarity of two content vectors in `0.0..=1.0`.
///
/// Identical vectors score exactly `1.0`. A vector without features scores
/// `0.0` against anything, itself included.
///
/// # Examples
/// ```
/// use reelmatch_core::Movie;
/// use reelmatch_index::{ContentIndex, content_similarity};
///
/// let index = ContentIndex::from_movies(&[
///     Movie::new("a", "A").with_genres(["Drama"]),
///     Movie::new("b", "B").with_genres(["Comedy"]),
/// ]);
/// let (Some(a), Some(b)) = (index.vector(&"a".into()), index.vector(&"b".into())) else {
///     panic!("both movies are indexed");
/// };
/// assert_eq!(content_similarity(a, a), 1.0);
/// assert_eq!(content_similarity(a, b), 0.0);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "cosine similarity divides the dot product by both norms"
)]
#[must_use]
pub fn content_similarity(a: &ContentVector, b: &ContentVector) -> f64 {
    if a.is_zero() || b.is_zero() {
        return 0.0;
    }
    if a.entries == b.entries {
        return 1.0;
    }
    let cosine = a.dot(b) / (a.magnitude * b.magnitude);
    if cosine.is_finite() {
        cosine.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Smoothed inverse document frequency, `ln((1 + n) / (1 + df)) + 1`.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "IDF is a logarithm of document-count ratios"
)]
fn smoothed_idf(documents: usize, frequency: usize) -> f64 {
    ((1.0 + documents as f64) / (1.0 + frequency as f64)).ln() + 1.0
}

/// Build a TF-IDF vector for every movie.
///
/// Movies are processed in catalog-id order and dimensions are assigned in
/// term order, so the same movie set always yields the same vectors. A movie
/// with an empty overview still receives a vector from its other features.
pub fn build_content_vectors<'a, I>(movies: I) -> BTreeMap<CatalogId, ContentVector>
where
    I: IntoIterator<Item = &'a Movie>,
{
    ContentIndex::from_movies(movies).vectors
}

/// Content vectors for one catalog snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentIndex {
    vocabulary: BTreeMap<String, u32>,
    vectors: BTreeMap<CatalogId, ContentVector>,
}

impl ContentIndex {
    /// Build an index over the whole catalog.
    pub fn build<C>(catalog: &C) -> Self
    where
        C: MovieCatalog + ?Sized,
    {
        let index = Self::from_movies(catalog.movies());
        info!(
            "built content index: {} movies, {} dimensions",
            index.len(),
            index.dimensions()
        );
        index
    }

    /// Build an index over `movies`. Later duplicates of an id replace
    /// earlier ones.
    #[expect(
        clippy::float_arithmetic,
        reason = "TF-IDF weights multiply term frequency by IDF"
    )]
    pub fn from_movies<'a, I>(movies: I) -> Self
    where
        I: IntoIterator<Item = &'a Movie>,
    {
        let documents: BTreeMap<CatalogId, BTreeMap<String, f64>> = movies
            .into_iter()
            .map(|movie| (movie.id.clone(), weighted_terms(movie)))
            .collect();

        let mut frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for terms in documents.values() {
            for term in terms.keys() {
                *frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        let vocabulary: BTreeMap<String, u32> = frequency
            .keys()
            .zip(0_u32..)
            .map(|(term, dimension)| ((*term).to_owned(), dimension))
            .collect();
        let dimensions = vocabulary.len();

        let vectors = documents
            .iter()
            .map(|(id, terms)| {
                let entries = terms
                    .iter()
                    .filter_map(|(term, tf)| {
                        let dimension = *vocabulary.get(term)?;
                        let df = frequency.get(term.as_str()).copied().unwrap_or(0);
                        Some((dimension, tf * smoothed_idf(documents.len(), df)))
                    })
                    .collect::<Vec<_>>();
                (id.clone(), ContentVector::from_entries(entries, dimensions))
            })
            .collect();

        Self {
            vocabulary,
            vectors,
        }
    }

    /// The vector for `id`, if indexed.
    #[must_use]
    pub fn vector(&self, id: &CatalogId) -> Option<&ContentVector> {
        self.vectors.get(id)
    }

    /// Content similarity of two indexed movies; `0.0` when either is absent.
    #[must_use]
    pub fn similarity(&self, a: &CatalogId, b: &CatalogId) -> f64 {
        match (self.vectors.get(a), self.vectors.get(b)) {
            (Some(left), Some(right)) => content_similarity(left, right),
            _ => 0.0,
        }
    }

    /// Indexed movie identifiers in ascending order.
    pub fn movie_ids(&self) -> impl Iterator<Item = &CatalogId> {
        self.vectors.keys()
    }

    /// Size of the shared vocabulary.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of indexed movies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Report whether no movies are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelmatch_core::test_support::sample_catalog;
    use rstest::{fixture, rstest};

    #[fixture]
    fn index() -> ContentIndex {
        ContentIndex::build(&sample_catalog())
    }

    #[rstest]
    fn every_vector_shares_dimensions(index: ContentIndex) {
        assert_eq!(index.len(), 12);
        assert!(index.movie_ids().all(|id| {
            index
                .vector(id)
                .is_some_and(|vector| vector.dimensions() == index.dimensions())
        }));
    }

    #[rstest]
    fn empty_overview_still_vectorised(index: ContentIndex) {
        let vector = index.vector(&"m08".into()).expect("m08 indexed");
        assert!(!vector.is_zero());
    }

    #[rstest]
    fn shared_director_and_genre_outweigh_unrelated(index: ContentIndex) {
        let close = index.similarity(&"m01".into(), &"m02".into());
        let far = index.similarity(&"m01".into(), &"m04".into());
        assert!(close > far, "expected {close} > {far}");
    }

    #[rstest]
    fn missing_movies_score_zero(index: ContentIndex) {
        assert_eq!(index.similarity(&"m01".into(), &"nope".into()), 0.0);
    }

    #[rstest]
    fn zero_vectors_score_zero() {
        let index = ContentIndex::from_movies(&[Movie::new("a", "A"), Movie::new("b", "B")]);
        assert_eq!(index.similarity(&"a".into(), &"a".into()), 0.0);
        assert_eq!(index.dimensions(), 0);
    }

    #[rstest]
    fn universal_terms_still_contribute() {
        assert_eq!(smoothed_idf(4, 4), 1.0);
        assert!(smoothed_idf(4, 1) > 1.0);
    }

    #[rstest]
    fn free_function_matches_index() {
        let catalog = sample_catalog();
        let vectors = build_content_vectors(catalog.movies());
        let index = ContentIndex::build(&catalog);
        assert_eq!(vectors.get(&"m05".into()), index.vector(&"m05".into()));
    }
}
