//! Personality profile domain model.
//!
//! A profile pairs a tourist's Big Five trait vector with the ratings they
//! gave to POI categories. Profiles are supplied by a collaborator and never
//! mutated by the pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, TourError};

/// Number of personality dimensions (O, C, E, A, N).
pub const TRAIT_DIMENSIONS: usize = 5;

/// Rating at or above which a category counts as "liked".
pub const DEFAULT_LIKED_THRESHOLD: f64 = 3.0;

/// Big Five trait scores, each normalized to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TraitVector {
    /// Openness
    #[serde(rename = "O")]
    pub openness: f64,
    /// Conscientiousness
    #[serde(rename = "C")]
    pub conscientiousness: f64,
    /// Extraversion
    #[serde(rename = "E")]
    pub extraversion: f64,
    /// Agreeableness
    #[serde(rename = "A")]
    pub agreeableness: f64,
    /// Neuroticism
    #[serde(rename = "N")]
    pub neuroticism: f64,
}

impl TraitVector {
    pub fn new(o: f64, c: f64, e: f64, a: f64, n: f64) -> Self {
        Self {
            openness: o,
            conscientiousness: c,
            extraversion: e,
            agreeableness: a,
            neuroticism: n,
        }
    }

    pub fn from_array(values: [f64; TRAIT_DIMENSIONS]) -> Self {
        let [o, c, e, a, n] = values;
        Self::new(o, c, e, a, n)
    }

    pub fn to_array(self) -> [f64; TRAIT_DIMENSIONS] {
        [
            self.openness,
            self.conscientiousness,
            self.extraversion,
            self.agreeableness,
            self.neuroticism,
        ]
    }

    /// Euclidean distance between two trait vectors.
    pub fn distance(&self, other: &TraitVector) -> f64 {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    /// Similarity in `[0, 1]` for unit-range traits: `1 - distance / sqrt(5)`.
    ///
    /// `sqrt(5)` is the largest possible distance between two points of the
    /// five-dimensional unit cube, so callers must pre-normalize scores.
    pub fn similarity(&self, other: &TraitVector) -> f64 {
        1.0 - self.distance(other) / (TRAIT_DIMENSIONS as f64).sqrt()
    }

    /// Component-wise mean. Returns `None` for an empty input.
    pub fn mean<'a, I>(vectors: I) -> Option<TraitVector>
    where
        I: IntoIterator<Item = &'a TraitVector>,
    {
        let mut sums = [0.0; TRAIT_DIMENSIONS];
        let mut count = 0usize;
        for vector in vectors {
            for (sum, value) in sums.iter_mut().zip(vector.to_array()) {
                *sum += value;
            }
            count += 1;
        }
        if count == 0 {
            return None;
        }
        Some(TraitVector::from_array(sums.map(|sum| sum / count as f64)))
    }

    /// Largest per-dimension absolute difference.
    pub fn max_component_delta(&self, other: &TraitVector) -> f64 {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

/// A POI category code such as `F1` or `Museums`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryCode(String);

impl CategoryCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for CategoryCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// Category ratings of one tourist.
///
/// Iteration order is the sorted order of category codes, which keeps every
/// downstream computation reproducible.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preferences(BTreeMap<CategoryCode, f64>);

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<CategoryCode>, rating: f64) -> Option<f64> {
        self.0.insert(code.into(), rating)
    }

    pub fn get(&self, code: &CategoryCode) -> Option<f64> {
        self.0.get(code).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CategoryCode, f64)> {
        self.0.iter().map(|(code, rating)| (code, *rating))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Categories rated at or above `threshold`.
    pub fn liked(&self, threshold: f64) -> impl Iterator<Item = (&CategoryCode, f64)> {
        self.iter().filter(move |(_, rating)| *rating >= threshold)
    }
}

impl<C: Into<CategoryCode>> FromIterator<(C, f64)> for Preferences {
    fn from_iter<T: IntoIterator<Item = (C, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(code, rating)| (code.into(), rating)).collect())
    }
}

/// An immutable tourist profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityProfile {
    pub id: u64,
    pub traits: TraitVector,
    #[serde(default)]
    pub preferences: Preferences,
}

impl PersonalityProfile {
    pub fn new(id: u64, traits: TraitVector, preferences: Preferences) -> Self {
        Self {
            id,
            traits,
            preferences,
        }
    }

    /// The profile's transaction: every category rated at or above `threshold`.
    pub fn liked_categories(&self, threshold: f64) -> Vec<CategoryCode> {
        self.preferences
            .liked(threshold)
            .map(|(code, _)| code.clone())
            .collect()
    }

    /// Boundary validation performed by profile sources before the pipeline runs.
    pub fn validate(&self) -> Result<()> {
        const NAMES: [&str; TRAIT_DIMENSIONS] = ["O", "C", "E", "A", "N"];

        for (name, value) in NAMES.iter().zip(self.traits.to_array()) {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(TourError::invalid_profile(
                    self.id,
                    format!("trait {name} must be within [0, 1], got {value}"),
                ));
            }
        }

        if let Some((code, rating)) = self.preferences.iter().find(|(_, r)| !r.is_finite()) {
            return Err(TourError::invalid_profile(
                self.id,
                format!("rating for {code} is not a finite number ({rating})"),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similarity_bounds() {
        let zero = TraitVector::default();
        let one = TraitVector::new(1.0, 1.0, 1.0, 1.0, 1.0);
        assert!((zero.similarity(&zero) - 1.0).abs() < 1e-12);
        assert!(zero.similarity(&one).abs() < 1e-12);
    }

    #[test]
    fn test_mean() {
        let a = TraitVector::new(0.0, 0.2, 0.4, 0.6, 0.8);
        let b = TraitVector::new(1.0, 0.4, 0.6, 0.8, 1.0);
        let mean = TraitVector::mean([&a, &b]).unwrap();
        assert!(mean.max_component_delta(&TraitVector::new(0.5, 0.3, 0.5, 0.7, 0.9)) < 1e-12);
        assert!(TraitVector::mean(std::iter::empty()).is_none());
    }

    #[test]
    fn test_liked_categories_use_threshold_inclusively() {
        let prefs: Preferences = [("F1", 3.0), ("F2", 2.99), ("F3", 5.0)].into_iter().collect();
        let profile = PersonalityProfile::new(1, TraitVector::default(), prefs);
        assert_eq!(
            profile.liked_categories(DEFAULT_LIKED_THRESHOLD),
            vec![CategoryCode::from("F1"), CategoryCode::from("F3")]
        );
    }

    #[test]
    fn test_validate_rejects_out_of_range_trait() {
        let profile =
            PersonalityProfile::new(7, TraitVector::new(0.5, 1.2, 0.5, 0.5, 0.5), Preferences::new());
        let err = profile.validate().unwrap_err();
        assert!(err.is_invalid_profile());
        assert!(err.to_string().contains("trait C"));
    }

    #[test]
    fn test_validate_rejects_nan_rating() {
        let prefs: Preferences = [("F1", f64::NAN)].into_iter().collect();
        let profile = PersonalityProfile::new(8, TraitVector::default(), prefs);
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_profile_json_shape() {
        let json = r#"{
            "id": 3,
            "traits": {"O": 0.9, "C": 0.1, "E": 0.9, "A": 0.2, "N": 0.1},
            "preferences": {"F1": 5, "F2": 4}
        }"#;
        let profile: PersonalityProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id, 3);
        assert_eq!(profile.traits.openness, 0.9);
        assert_eq!(profile.preferences.get(&"F2".into()), Some(4.0));
    }
}
