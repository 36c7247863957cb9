//! # Cardioscreen
//!
//! Feature-encoding and risk-inference core for a heart-disease screening
//! tool.
//!
//! This crate provides:
//! - Encoding of human-readable screening answers into the fixed-order
//!   numeric feature vector a trained classifier expects
//! - Plaintext inference against an exported gradient-boosted tree model
//!   with its fitted standard scaler
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (answers, feature vector, screening result)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (boosted-tree model artifact)
//! - `application`: Use cases orchestrating domain and ports

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub use domain::{FeatureVector, RawAnswers, RiskLabel, Screening};

/// Result type for cardioscreen operations
pub type Result<T> = std::result::Result<T, ScreenError>;

/// Main error type for cardioscreen
#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    #[error("Invalid answer: {0}")]
    Encode(#[from] domain::EncodeError),

    #[error("Classification failed: {0}")]
    Predict(#[from] ports::PredictError),

    #[error("Model not loaded: {0}")]
    Model(#[from] adapters::ModelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
