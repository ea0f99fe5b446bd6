//! Metadata overlap between movies.

use std::collections::BTreeSet;

/// Jaccard index of two genre sets.
///
/// Two empty sets share nothing and score `0.0`.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use reelmatch_scorer::genre_overlap;
///
/// let a: BTreeSet<String> = ["Drama", "War"].map(String::from).into();
/// let b: BTreeSet<String> = ["Drama", "History"].map(String::from).into();
/// assert!((genre_overlap(&a, &b) - 1.0 / 3.0).abs() < 1e-12);
/// ```
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "Jaccard index divides set cardinalities"
)]
#[must_use]
pub fn genre_overlap(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let shared = a.intersection(b).count();
    let union = a.len() + b.len() - shared;
    if union == 0 {
        return 0.0;
    }
    shared as f64 / union as f64
}

/// Number of distinct cast members appearing in both lists.
#[must_use]
pub fn shared_cast(a: &[String], b: &[String]) -> usize {
    let left: BTreeSet<&str> = a.iter().map(String::as_str).collect();
    let right: BTreeSet<&str> = b.iter().map(String::as_str).collect();
    left.intersection(&right).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|item| (*item).to_owned()).collect()
    }

    #[rstest]
    #[case(&[], &[], 0.0)]
    #[case(&["Drama"], &[], 0.0)]
    #[case(&["Drama"], &["Drama"], 1.0)]
    #[case(&["Drama", "Crime"], &["Comedy"], 0.0)]
    #[case(&["Drama", "Crime"], &["Drama", "Comedy"], 1.0 / 3.0)]
    #[expect(clippy::float_arithmetic, reason = "tests compare floating point values")]
    fn jaccard_index(#[case] a: &[&str], #[case] b: &[&str], #[case] expected: f64) {
        let score = genre_overlap(&set(a), &set(b));
        assert!((score - expected).abs() < 1e-12);
        assert_eq!(score, genre_overlap(&set(b), &set(a)));
    }

    #[rstest]
    fn shared_cast_counts_distinct_names() {
        let a = vec!["Ava".to_owned(), "Ava".to_owned(), "Kenji".to_owned()];
        let b = vec!["Ava".to_owned(), "Milo".to_owned()];
        assert_eq!(shared_cast(&a, &b), 1);
        assert_eq!(shared_cast(&a, &[]), 0);
    }
}
