//! Weighted category preference.
//!
//! Maps a category (a language code for regional bias, though any label
//! works) to an additive bonus. The bonus is added to a composite score after
//! the weighted signals, so a preferred category lifts a movie without ever
//! suppressing its other signals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ScoringError;

/// Additive bonus per preferred category.
///
/// Category keys are matched case-insensitively.
///
/// # Examples
/// ```
/// use reelmatch_scorer::CategoryPreference;
///
/// let preference = CategoryPreference::regional("hi", 0.10, ["ta", "te"], 0.05);
/// assert_eq!(preference.bonus("HI"), 0.10);
/// assert_eq!(preference.bonus("ta"), 0.05);
/// assert_eq!(preference.bonus("en"), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct CategoryPreference {
    bonuses: BTreeMap<String, f64>,
}

impl From<BTreeMap<String, f64>> for CategoryPreference {
    fn from(bonuses: BTreeMap<String, f64>) -> Self {
        let mut preference = Self::new();
        for (category, bonus) in bonuses {
            preference.set_bonus(&category, bonus);
        }
        preference
    }
}

impl From<CategoryPreference> for BTreeMap<String, f64> {
    fn from(preference: CategoryPreference) -> Self {
        preference.bonuses
    }
}

impl CategoryPreference {
    /// A preference with no categories; every bonus is `0.0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bonuses: BTreeMap::new(),
        }
    }

    /// A primary category with one bonus and secondary categories sharing a
    /// smaller one.
    #[must_use]
    pub fn regional<I, S>(
        primary: &str,
        primary_bonus: f64,
        secondary: I,
        secondary_bonus: f64,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut preference = Self::new();
        for category in secondary {
            preference.set_bonus(category.as_ref(), secondary_bonus);
        }
        preference.set_bonus(primary, primary_bonus);
        preference
    }

    /// Add or replace a category while returning `self` for chaining.
    #[must_use]
    pub fn with_category(mut self, category: &str, bonus: f64) -> Self {
        self.set_bonus(category, bonus);
        self
    }

    /// Add or replace a category's bonus.
    pub fn set_bonus(&mut self, category: &str, bonus: f64) {
        self.bonuses.insert(category.to_lowercase(), bonus);
    }

    /// Bonus for `category`, or `0.0` when it is not preferred.
    #[must_use]
    pub fn bonus(&self, category: &str) -> f64 {
        if self.bonuses.is_empty() {
            return 0.0;
        }
        self.bonuses
            .get(&category.to_lowercase())
            .copied()
            .unwrap_or(0.0)
    }

    /// Report whether no category carries a bonus.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    /// Check that every bonus is finite and non-negative.
    ///
    /// # Errors
    /// Returns [`ScoringError::InvalidBonus`] naming the first offending
    /// category.
    pub fn validate(&self) -> Result<(), ScoringError> {
        match self
            .bonuses
            .iter()
            .find(|(_, bonus)| !(bonus.is_finite() && **bonus >= 0.0))
        {
            Some((category, bonus)) => Err(ScoringError::InvalidBonus {
                category: category.clone(),
                bonus: *bonus,
            }),
            None => Ok(()),
        }
    }
}
