//! Screening service: Orchestrates answer encoding and risk classification.
//!
//! This service coordinates:
//! - Encoding raw answers into the canonical feature vector
//! - Classification against the trained model
//! - Assembly of the screening record returned to the caller

use std::sync::Arc;

use crate::domain::{RawAnswers, Screening};
use crate::ports::RiskClassifier;
use crate::ScreenError;

/// Service for running a risk screening over one set of answers.
///
/// The classifier is immutable shared-read state; the service itself holds
/// no mutable state and a single instance can serve any number of
/// screenings.
pub struct ScreeningService<C>
where
    C: RiskClassifier,
{
    classifier: Arc<C>,
}

impl<C> ScreeningService<C>
where
    C: RiskClassifier,
{
    /// Create a new screening service.
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    /// Run the full screening pipeline on one set of answers.
    ///
    /// Performs:
    /// 1. Encode answers into the canonical feature vector
    /// 2. Classify the vector against the trained model
    /// 3. Assemble the screening record
    ///
    /// Either the whole pipeline succeeds with exactly one label, or the
    /// call fails; a rejected input is never coerced into a prediction.
    ///
    /// # Errors
    /// Returns error if encoding or classification fails.
    pub fn screen(&self, answers: &RawAnswers) -> Result<Screening, ScreenError> {
        tracing::debug!("Encoding answers into feature vector...");
        let vector = answers.encode()?;

        tracing::debug!("Classifying feature vector...");
        let label = self.classifier.predict(&vector)?;

        let screening = Screening::new(label);
        tracing::info!(
            "Screening complete: id={}, label={}",
            screening.id,
            screening.label
        );
        Ok(screening)
    }
}
