//! Screening result types.
//!
//! Represents the output of a heart-disease risk classification.

use serde::{Deserialize, Serialize};

/// Binary risk label produced by the classifier.
///
/// The mapping from the model's raw class index to a label is carried by the
/// model artifact itself (`class_labels`), asserted by the training pipeline
/// for its target encoding. Inference code never assumes a polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    /// Elevated risk of heart disease
    HighRisk,
    /// Lower risk of heart disease
    LowRisk,
}

impl RiskLabel {
    /// Get a human-readable message for display.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::HighRisk => "Warning! You have a high risk of heart disease.",
            Self::LowRisk => "You have a lower risk of heart disease.",
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HighRisk => write!(f, "HIGH RISK"),
            Self::LowRisk => write!(f, "LOW RISK"),
        }
    }
}

/// Complete screening record returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screening {
    /// Unique identifier
    pub id: String,

    /// Risk classification
    pub label: RiskLabel,

    /// Timestamp of the screening
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Screening {
    /// Create a new screening record for a classification result.
    #[must_use]
    pub fn new(label: RiskLabel) -> Self {
        Self {
            id: uuid_v4(),
            label,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Generate a simple UUID v4 (random) using CSPRNG.
///
/// Uses ChaCha20Rng seeded from OS entropy to ensure the same id quality on
/// all platforms.
fn uuid_v4() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_display_and_description() {
        assert_eq!(RiskLabel::HighRisk.to_string(), "HIGH RISK");
        assert_eq!(RiskLabel::LowRisk.to_string(), "LOW RISK");
        assert!(RiskLabel::HighRisk.description().contains("high risk"));
        assert!(RiskLabel::LowRisk.description().contains("lower risk"));
    }

    #[test]
    fn test_label_serde_names() {
        assert_eq!(
            serde_json::to_string(&RiskLabel::HighRisk).unwrap(),
            "\"high_risk\""
        );
        let parsed: RiskLabel = serde_json::from_str("\"low_risk\"").unwrap();
        assert_eq!(parsed, RiskLabel::LowRisk);
    }

    #[test]
    fn test_screening_creation() {
        let screening = Screening::new(RiskLabel::LowRisk);
        assert_eq!(screening.label, RiskLabel::LowRisk);
        assert_eq!(screening.id.len(), 36); // UUID format with dashes
    }

    #[test]
    fn test_uuid_generation() {
        let id1 = uuid_v4();
        let id2 = uuid_v4();
        assert_ne!(id1, id2);
    }
}
