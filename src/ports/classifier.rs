//! Classifier port: Trait for risk classification over feature vectors.
//!
//! This trait abstracts the trained model artifact from the application
//! logic. Implementations hold an immutable model plus its fitted scaler and
//! are safe to share across concurrent invocations.

use crate::domain::{FeatureVector, RiskLabel, FEATURE_NAMES};

/// Errors produced during classification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictError {
    /// The input's length or field order disagrees with the schema the
    /// scaler was fitted on.
    #[error("Feature schema mismatch: {0}")]
    SchemaMismatch(String),
}

/// Trait for binary risk classification.
///
/// Implementations provide:
/// - Standard scaling with statistics fitted during training (never re-fit
///   per request)
/// - A deterministic decision function over the scaled vector
/// - Class-to-label mapping carried by the trained artifact
pub trait RiskClassifier: Send + Sync {
    /// Classify raw values whose column order is declared by `names`.
    ///
    /// The declared schema is validated against the fitted schema before any
    /// computation, so a caller that drifted from the training column order
    /// fails loudly instead of predicting garbage.
    ///
    /// # Errors
    /// Returns `PredictError::SchemaMismatch` if `names`/`values` disagree
    /// with the fitted schema in length or order.
    fn predict_raw(&self, names: &[&str], values: &[f64]) -> Result<RiskLabel, PredictError>;

    /// Classify a feature vector in the canonical column order.
    ///
    /// # Errors
    /// Returns `PredictError::SchemaMismatch` if the fitted schema disagrees
    /// with the canonical one.
    fn predict(&self, vector: &FeatureVector) -> Result<RiskLabel, PredictError> {
        self.predict_raw(&FEATURE_NAMES, vector.as_slice())
    }
}
