//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external artifacts:
//! - `gbt`: gradient-boosted tree model exported by the training pipeline

pub mod gbt;

// Re-export model error for lib.rs
pub use gbt::ModelError;
