//! Pure scoring functions for Reelmatch ranking signals.
//!
//! Each function maps catalog metadata to a bounded signal the hybrid
//! recommender blends into its composite score:
//! - [`RecencyDecay`] turns release age into a multiplier that falls from
//!   `1.0` for the newest releases to a floor for old ones.
//! - [`BayesianRating`] shrinks a movie's vote average toward the catalog mean
//!   in proportion to how few votes back it.
//! - [`CategoryPreference`] adds a fixed bonus for preferred categories such as
//!   regional languages.
//! - [`genre_overlap`] and [`shared_cast`] measure metadata overlap.
//!
//! All functions are stateless and infallible once their parameters have been
//! validated.
//!
//! # Examples
//!
//! ```
//! use reelmatch_scorer::{BayesianRating, DecayCurve, RecencyDecay};
//!
//! let decay = RecencyDecay::default();
//! assert_eq!(decay.multiplier(0), 1.0);
//! assert_eq!(decay.multiplier(12), 0.2);
//!
//! let bayes = BayesianRating::new(6.0, 100.0).expect("valid parameters");
//! let shrunk = bayes.adjusted(9.0, 10);
//! assert!(shrunk > 6.0 && shrunk < 9.0);
//! # let _ = DecayCurve::Linear;
//! ```

#![forbid(unsafe_code)]

mod bayesian;
mod error;
mod overlap;
mod preference;
mod recency;

pub use bayesian::BayesianRating;
pub use error::ScoringError;
pub use overlap::{genre_overlap, shared_cast};
pub use preference::CategoryPreference;
pub use recency::{DecayCurve, RecencyDecay};

/// Clamp a signal into `0.0..=1.0`, mapping non-finite values to `0.0`.
///
/// # Examples
/// ```
/// use reelmatch_scorer::sanitise;
///
/// assert_eq!(sanitise(1.7), 1.0);
/// assert_eq!(sanitise(f64::NAN), 0.0);
/// ```
#[must_use]
pub const fn sanitise(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}
