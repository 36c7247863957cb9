//! Feature vector consumed by the trained classifier.

use serde::{Deserialize, Serialize};

/// Number of model features.
pub const FEATURE_COUNT: usize = 13;

/// Canonical feature order, matching the training dataset's columns.
///
/// The classifier was fitted against exactly this order. Reordering these
/// silently produces wrong predictions, so the schema is checked against the
/// model artifact at prediction time.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
    "slope", "ca", "thal",
];

/// Fully numeric feature vector in the canonical column order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Build a vector from values already laid out in canonical order.
    #[must_use]
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// The values in canonical order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Copy the values into a `Vec` for ML inference.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }
}
