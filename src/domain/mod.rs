//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no external side effects.
//! All types are serializable and implement strict validation.

mod answers;
mod features;
mod screening;

pub use answers::{ChestPainType, EncodeError, RawAnswers, RestingEcg, Sex, Slope, YesNo};
pub use features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use screening::{RiskLabel, Screening};
