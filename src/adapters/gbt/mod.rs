//! GBT adapter: Plaintext inference over an exported boosted-tree model.
//!
//! The training pipeline runs offline and exports a JSON artifact holding
//! the tree ensemble, the standard-scaler statistics fitted on the training
//! matrix, the feature-name schema, and the class-to-label polarity table.
//! This adapter loads that artifact once and serves read-only predictions.
//!
//! # Artifact Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "feature_names": ["age", "sex", "..."],
//!   "scaler_mean": [54.37, 0.68],
//!   "scaler_scale": [9.08, 0.47],
//!   "base_score": 0.0,
//!   "trees": [
//!     {
//!       "nodes": [
//!         {"feature": 0, "threshold": 0.5, "left": 1, "right": 2, "leaf": null},
//!         {"feature": -1, "threshold": 0.0, "left": -1, "right": -1, "leaf": -0.4},
//!         {"feature": -1, "threshold": 0.0, "left": -1, "right": -1, "leaf": 0.6}
//!       ]
//!     }
//!   ],
//!   "class_labels": ["high_risk", "low_risk"]
//! }
//! ```
//!
//! # Integrity
//!
//! When a `<artifact>.sha256` sidecar exists next to the artifact, its hex
//! digest must match the artifact bytes; a mismatch refuses the load. A
//! missing sidecar is tolerated with a warning.
//!
//! # Thread Safety
//!
//! The loaded model is immutable; `GbtClassifier` is `Send + Sync` and can
//! be shared behind an `Arc` across concurrent invocations without locking.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::RiskLabel;
use crate::ports::{PredictError, RiskClassifier};

/// File name of the exported model artifact inside the model directory.
pub const ARTIFACT_FILE: &str = "heart_gbt.json";

/// Supported artifact format version.
const ARTIFACT_VERSION: u32 = 1;

/// Errors produced while loading or validating the model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid model artifact format: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Model artifact checksum mismatch for {path}")]
    Checksum { path: String },

    #[error("Invalid model artifact: {0}")]
    Invalid(String),
}

/// One node of a decision tree.
///
/// Leaves carry `leaf: Some(value)`; internal nodes carry a feature index, a
/// split threshold, and child indices into the tree's node array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    pub feature: i32,
    pub threshold: f64,
    pub left: i32,
    pub right: i32,
    pub leaf: Option<f64>,
}

impl TreeNode {
    /// Create an internal split node.
    #[must_use]
    pub fn internal(feature: i32, threshold: f64, left: i32, right: i32) -> Self {
        Self {
            feature,
            threshold,
            left,
            right,
            leaf: None,
        }
    }

    /// Create a leaf node with the given output value.
    #[must_use]
    pub fn leaf(value: f64) -> Self {
        Self {
            feature: -1,
            threshold: 0.0,
            left: -1,
            right: -1,
            leaf: Some(value),
        }
    }
}

/// One decision tree of the ensemble.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Evaluate the tree on a scaled feature row.
    ///
    /// Traversal follows the usual boosted-tree convention: values strictly
    /// below the threshold go left, everything else goes right. Indices were
    /// validated at load time (children exist and always point forward), so
    /// traversal is bounded by the node count.
    fn score(&self, values: &[f64]) -> f64 {
        let mut idx = 0usize;
        loop {
            let node = &self.nodes[idx];
            if let Some(leaf) = node.leaf {
                return leaf;
            }
            idx = if values[node.feature as usize] < node.threshold {
                node.left as usize
            } else {
                node.right as usize
            };
        }
    }
}

/// Trained model parameters exported by the offline training pipeline.
///
/// `scaler_mean`/`scaler_scale` are the statistics of a standard scaler
/// fitted on the training feature matrix, in `feature_names` order.
/// `class_labels` maps the model's class index (0 or 1) to a risk label; the
/// training pipeline writes it from the dataset's actual target encoding so
/// the polarity is asserted by the trainer, not assumed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedGbtModel {
    pub version: u32,
    pub feature_names: Vec<String>,
    pub scaler_mean: Vec<f64>,
    pub scaler_scale: Vec<f64>,
    pub base_score: f64,
    pub trees: Vec<Tree>,
    pub class_labels: [RiskLabel; 2],
}

impl ExportedGbtModel {
    /// Validate structural invariants before the model is put in service.
    ///
    /// # Errors
    /// Returns `ModelError::Invalid` describing the first violation found.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.version != ARTIFACT_VERSION {
            return Err(ModelError::Invalid(format!(
                "unsupported artifact version: {}",
                self.version
            )));
        }

        let n = self.feature_names.len();
        if n == 0 {
            return Err(ModelError::Invalid("empty feature schema".into()));
        }
        if self.scaler_mean.len() != n || self.scaler_scale.len() != n {
            return Err(ModelError::Invalid(format!(
                "scaler fitted over {} mean / {} scale entries, schema has {} features",
                self.scaler_mean.len(),
                self.scaler_scale.len(),
                n
            )));
        }
        for (i, s) in self.scaler_scale.iter().enumerate() {
            if !s.is_finite() || *s == 0.0 {
                return Err(ModelError::Invalid(format!(
                    "scaler scale for {:?} is {s}, must be finite and non-zero",
                    self.feature_names[i]
                )));
            }
        }

        if self.class_labels[0] == self.class_labels[1] {
            return Err(ModelError::Invalid(
                "class_labels must map class 0 and class 1 to distinct labels".into(),
            ));
        }

        if self.trees.is_empty() {
            return Err(ModelError::Invalid("ensemble contains no trees".into()));
        }
        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(ModelError::Invalid(format!("tree {t} has no nodes")));
            }
            let len = tree.nodes.len() as i32;
            for (i, node) in tree.nodes.iter().enumerate() {
                if node.leaf.is_some() {
                    continue;
                }
                if node.feature < 0 || node.feature as usize >= n {
                    return Err(ModelError::Invalid(format!(
                        "tree {t} node {i}: feature index {} outside schema",
                        node.feature
                    )));
                }
                // Children must point forward so traversal always terminates.
                let i = i as i32;
                for child in [node.left, node.right] {
                    if child <= i || child >= len {
                        return Err(ModelError::Invalid(format!(
                            "tree {t} node {i}: child index {child} out of order"
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Verify the artifact bytes against a `<artifact>.sha256` sidecar.
///
/// The sidecar holds the lowercase hex digest (a `sha256sum`-style prefix is
/// accepted). A missing sidecar logs a warning and passes.
fn verify_checksum(artifact_path: &Path, bytes: &[u8]) -> Result<(), ModelError> {
    let mut sidecar = artifact_path.as_os_str().to_owned();
    sidecar.push(".sha256");
    let sidecar = Path::new(&sidecar);

    if !sidecar.exists() {
        tracing::warn!("No checksum sidecar at {:?}, skipping integrity check", sidecar);
        return Ok(());
    }

    let content = fs::read_to_string(sidecar)?;
    let expected = content
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    let actual = sha256_hex(bytes);
    if actual != expected {
        return Err(ModelError::Checksum {
            path: artifact_path.display().to_string(),
        });
    }
    Ok(())
}

/// Risk classifier backed by an exported boosted-tree artifact.
///
/// Holds the trained ensemble and its fitted scaler as immutable shared-read
/// state. Prediction never mutates the model and is deterministic for
/// identical inputs.
#[derive(Debug)]
pub struct GbtClassifier {
    model: ExportedGbtModel,
}

impl GbtClassifier {
    /// Wrap an already-deserialized model after validating it.
    ///
    /// # Errors
    /// Returns `ModelError::Invalid` if the artifact violates a structural
    /// invariant.
    pub fn from_model(model: ExportedGbtModel) -> Result<Self, ModelError> {
        model.validate()?;
        Ok(Self { model })
    }

    /// Load and validate the model artifact from a directory.
    ///
    /// # Errors
    /// Returns an error if the artifact is unreadable, fails its checksum,
    /// or violates a structural invariant.
    pub fn load(dir: &Path) -> Result<Self, ModelError> {
        let path = dir.join(ARTIFACT_FILE);
        tracing::info!("Loading model artifact from {:?}", path);

        let bytes = fs::read(&path)?;
        verify_checksum(&path, &bytes)?;

        let model: ExportedGbtModel = serde_json::from_slice(&bytes)?;
        let classifier = Self::from_model(model)?;
        tracing::info!(
            "Model loaded: {} trees over {} features",
            classifier.model.trees.len(),
            classifier.model.feature_names.len()
        );
        Ok(classifier)
    }

    /// The feature schema the scaler was fitted on.
    #[must_use]
    pub fn fitted_schema(&self) -> &[String] {
        &self.model.feature_names
    }

    fn check_schema(&self, names: &[&str], values: &[f64]) -> Result<(), PredictError> {
        let schema = &self.model.feature_names;
        if values.len() != schema.len() {
            return Err(PredictError::SchemaMismatch(format!(
                "expected {} features, got {}",
                schema.len(),
                values.len()
            )));
        }
        if names.len() != schema.len() {
            return Err(PredictError::SchemaMismatch(format!(
                "expected {} feature names, got {}",
                schema.len(),
                names.len()
            )));
        }
        for (i, (declared, fitted)) in names.iter().zip(schema).enumerate() {
            if declared != fitted {
                return Err(PredictError::SchemaMismatch(format!(
                    "feature {i} is {declared:?}, fitted schema expects {fitted:?}"
                )));
            }
        }
        Ok(())
    }
}

impl RiskClassifier for GbtClassifier {
    fn predict_raw(&self, names: &[&str], values: &[f64]) -> Result<RiskLabel, PredictError> {
        self.check_schema(names, values)?;

        // Standard scaling with the statistics fitted during training.
        let scaled: Vec<f64> = values
            .iter()
            .zip(&self.model.scaler_mean)
            .zip(&self.model.scaler_scale)
            .map(|((v, mean), scale)| (v - mean) / scale)
            .collect();

        let margin: f64 = self.model.base_score
            + self.model.trees.iter().map(|t| t.score(&scaled)).sum::<f64>();
        let probability = sigmoid(margin);
        let class = usize::from(probability >= 0.5);

        tracing::debug!(margin, probability, class, "ensemble decision");
        Ok(self.model.class_labels[class])
    }
}
