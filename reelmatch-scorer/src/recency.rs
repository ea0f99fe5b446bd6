//! Release-age decay.
//!
//! The multiplier is exactly `1.0` at age zero and exactly the floor once a
//! release is `horizon_years` old or older. Between the endpoints the chosen
//! [`DecayCurve`] falls monotonically.

use serde::{Deserialize, Serialize};

use crate::ScoringError;

/// Shape of the decay between the two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecayCurve {
    /// Straight line from `1.0` to the floor.
    #[default]
    Linear,
    /// Geometric fall, `floor^(age / horizon)`.
    Exponential,
}

/// Recency multiplier parameters.
///
/// # Examples
/// ```
/// use reelmatch_scorer::{DecayCurve, RecencyDecay};
///
/// let decay = RecencyDecay::new(0.2, 10, DecayCurve::Exponential).expect("valid decay");
/// assert_eq!(decay.for_release(Some(2024), 2024), 1.0);
/// assert_eq!(decay.for_release(Some(2010), 2024), 0.2);
/// assert!(decay.for_release(Some(2019), 2024) < 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecencyDecay {
    /// Multiplier for releases at or beyond the horizon.
    pub floor: f64,
    /// Age in years at which the floor is reached.
    pub horizon_years: u16,
    /// Curve between the endpoints.
    pub curve: DecayCurve,
}

impl Default for RecencyDecay {
    fn default() -> Self {
        Self {
            floor: 0.2,
            horizon_years: 10,
            curve: DecayCurve::Linear,
        }
    }
}

impl RecencyDecay {
    /// Validate and construct decay parameters.
    ///
    /// # Errors
    /// Returns [`ScoringError::InvalidFloor`] when `floor` is outside
    /// `(0.0, 1.0]` and [`ScoringError::ZeroHorizon`] when `horizon_years` is
    /// zero.
    pub fn new(floor: f64, horizon_years: u16, curve: DecayCurve) -> Result<Self, ScoringError> {
        Self {
            floor,
            horizon_years,
            curve,
        }
        .validate()
    }

    /// Validate the parameters and return a copy.
    ///
    /// # Errors
    /// See [`RecencyDecay::new`].
    pub fn validate(self) -> Result<Self, ScoringError> {
        if !(self.floor.is_finite() && self.floor > 0.0 && self.floor <= 1.0) {
            return Err(ScoringError::InvalidFloor { floor: self.floor });
        }
        if self.horizon_years == 0 {
            return Err(ScoringError::ZeroHorizon);
        }
        Ok(self)
    }

    /// Multiplier for a release `age_years` old. Negative ages count as new.
    #[expect(
        clippy::float_arithmetic,
        reason = "decay interpolates between the endpoints"
    )]
    #[must_use]
    pub fn multiplier(&self, age_years: i32) -> f64 {
        if age_years <= 0 {
            return 1.0;
        }
        let horizon = i32::from(self.horizon_years);
        if age_years >= horizon {
            return self.floor;
        }
        let fraction = f64::from(age_years) / f64::from(horizon);
        let value = match self.curve {
            DecayCurve::Linear => 1.0 - (1.0 - self.floor) * fraction,
            DecayCurve::Exponential => self.floor.powf(fraction),
        };
        value.clamp(self.floor, 1.0)
    }

    /// Multiplier for a release year relative to `reference_year`.
    ///
    /// Unknown release years score the floor.
    #[must_use]
    pub fn for_release(&self, release_year: Option<i32>, reference_year: i32) -> f64 {
        release_year.map_or(self.floor, |year| {
            self.multiplier(reference_year.saturating_sub(year))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DecayCurve::Linear)]
    #[case(DecayCurve::Exponential)]
    fn endpoints_are_exact(#[case] curve: DecayCurve) {
        let decay = RecencyDecay::new(0.2, 10, curve).expect("valid decay");
        assert_eq!(decay.multiplier(0), 1.0);
        assert_eq!(decay.multiplier(-3), 1.0);
        assert_eq!(decay.multiplier(10), 0.2);
        assert_eq!(decay.multiplier(40), 0.2);
    }

    #[rstest]
    #[case(DecayCurve::Linear)]
    #[case(DecayCurve::Exponential)]
    #[expect(clippy::indexing_slicing, reason = "windows(2) always yields pairs")]
    fn decays_monotonically(#[case] curve: DecayCurve) {
        let decay = RecencyDecay::new(0.2, 10, curve).expect("valid decay");
        let values: Vec<f64> = (0..=12).map(|age| decay.multiplier(age)).collect();
        assert!(values.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tests compare floating point values")]
    fn linear_midpoint() {
        let decay = RecencyDecay::default();
        assert!((decay.multiplier(5) - 0.6).abs() < 1e-12);
    }

    #[rstest]
    fn unknown_year_scores_floor() {
        assert_eq!(RecencyDecay::default().for_release(None, 2024), 0.2);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-0.1)]
    #[case(1.5)]
    #[case(f64::NAN)]
    fn rejects_bad_floor(#[case] floor: f64) {
        assert!(matches!(
            RecencyDecay::new(floor, 10, DecayCurve::Linear),
            Err(ScoringError::InvalidFloor { .. })
        ));
    }

    #[rstest]
    fn rejects_zero_horizon() {
        assert_eq!(
            RecencyDecay::new(0.2, 0, DecayCurve::Linear),
            Err(ScoringError::ZeroHorizon)
        );
    }

    #[rstest]
    fn decodes_curve_names() {
        let decay: RecencyDecay =
            serde_json::from_str(r#"{"curve": "exponential"}"#).expect("decode decay");
        assert_eq!(decay.curve, DecayCurve::Exponential);
        assert_eq!(decay.horizon_years, 10);
    }
}
