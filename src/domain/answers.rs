//! Raw screening answers as collected from the intake form.
//!
//! Categorical fields are closed enums with a total label-to-code mapping.
//! An answer document can only hold labels the form can actually produce;
//! anything else fails at parse time instead of being silently coerced.

use serde::{Deserialize, Serialize};

use super::features::FeatureVector;

/// Errors produced while encoding answers into a feature vector.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodeError {
    /// A categorical label outside the field's closed domain.
    #[error("Unmapped {field} label: {label:?}")]
    UnmappedCategory { field: &'static str, label: String },

    /// A bounded numeric answer outside its declared range.
    #[error("{field} {value} out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Patient sex as reported on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "male")]
    Male,
    #[serde(rename = "female")]
    Female,
}

impl Sex {
    /// Numeric code used by the trained model (male = 1, female = 0).
    #[must_use]
    pub fn code(&self) -> f64 {
        match self {
            Self::Male => 1.0,
            Self::Female => 0.0,
        }
    }

    /// Parse a form label.
    ///
    /// # Errors
    /// Returns `EncodeError::UnmappedCategory` for labels outside the domain.
    pub fn from_label(label: &str) -> Result<Self, EncodeError> {
        match label {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(EncodeError::UnmappedCategory {
                field: "sex",
                label: other.to_string(),
            }),
        }
    }
}

/// Chest pain type (`cp` column in the source dataset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChestPainType {
    #[serde(rename = "Typical angina")]
    TypicalAngina,
    #[serde(rename = "Atypical angina")]
    AtypicalAngina,
    #[serde(rename = "Non-anginal pain")]
    NonAnginalPain,
    #[serde(rename = "Asymptomatic")]
    Asymptomatic,
}

impl ChestPainType {
    /// Numeric code used by the trained model.
    #[must_use]
    pub fn code(&self) -> f64 {
        match self {
            Self::TypicalAngina => 0.0,
            Self::AtypicalAngina => 1.0,
            Self::NonAnginalPain => 2.0,
            Self::Asymptomatic => 3.0,
        }
    }

    /// Parse a form label.
    ///
    /// # Errors
    /// Returns `EncodeError::UnmappedCategory` for labels outside the domain.
    pub fn from_label(label: &str) -> Result<Self, EncodeError> {
        match label {
            "Typical angina" => Ok(Self::TypicalAngina),
            "Atypical angina" => Ok(Self::AtypicalAngina),
            "Non-anginal pain" => Ok(Self::NonAnginalPain),
            "Asymptomatic" => Ok(Self::Asymptomatic),
            other => Err(EncodeError::UnmappedCategory {
                field: "chest_pain",
                label: other.to_string(),
            }),
        }
    }
}

/// Resting electrocardiographic result (`restecg` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestingEcg {
    #[serde(rename = "Nothing to note")]
    Normal,
    #[serde(rename = "ST-T Wave abnormality")]
    SttWaveAbnormality,
    #[serde(rename = "Possible or definite left ventricular hypertrophy")]
    LeftVentricularHypertrophy,
}

impl RestingEcg {
    /// Numeric code used by the trained model.
    #[must_use]
    pub fn code(&self) -> f64 {
        match self {
            Self::Normal => 0.0,
            Self::SttWaveAbnormality => 1.0,
            Self::LeftVentricularHypertrophy => 2.0,
        }
    }

    /// Parse a form label.
    ///
    /// # Errors
    /// Returns `EncodeError::UnmappedCategory` for labels outside the domain.
    pub fn from_label(label: &str) -> Result<Self, EncodeError> {
        match label {
            "Nothing to note" => Ok(Self::Normal),
            "ST-T Wave abnormality" => Ok(Self::SttWaveAbnormality),
            "Possible or definite left ventricular hypertrophy" => {
                Ok(Self::LeftVentricularHypertrophy)
            }
            other => Err(EncodeError::UnmappedCategory {
                field: "resting_ecg",
                label: other.to_string(),
            }),
        }
    }
}

/// Yes/No answer used for the fasting-blood-sugar and exercise-angina flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    #[serde(rename = "Yes")]
    Yes,
    #[serde(rename = "No")]
    No,
}

impl YesNo {
    /// Numeric code used by the trained model (Yes = 1, No = 0).
    #[must_use]
    pub fn code(&self) -> f64 {
        match self {
            Self::Yes => 1.0,
            Self::No => 0.0,
        }
    }

    /// Parse a form label for the named field.
    ///
    /// # Errors
    /// Returns `EncodeError::UnmappedCategory` for labels outside the domain.
    pub fn from_label(field: &'static str, label: &str) -> Result<Self, EncodeError> {
        match label {
            "Yes" => Ok(Self::Yes),
            "No" => Ok(Self::No),
            other => Err(EncodeError::UnmappedCategory {
                field,
                label: other.to_string(),
            }),
        }
    }
}

/// Heart-rate slope during peak exercise (`slope` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slope {
    #[serde(rename = "Upsloping: better heart rate with exercise (uncommon)")]
    Upsloping,
    #[serde(rename = "Flatsloping: minimal change (typical healthy heart)")]
    Flatsloping,
    #[serde(rename = "Downsloping: signs of unhealthy heart")]
    Downsloping,
}

impl Slope {
    /// Numeric code used by the trained model.
    #[must_use]
    pub fn code(&self) -> f64 {
        match self {
            Self::Upsloping => 0.0,
            Self::Flatsloping => 1.0,
            Self::Downsloping => 2.0,
        }
    }

    /// Parse a form label.
    ///
    /// # Errors
    /// Returns `EncodeError::UnmappedCategory` for labels outside the domain.
    pub fn from_label(label: &str) -> Result<Self, EncodeError> {
        match label {
            "Upsloping: better heart rate with exercise (uncommon)" => Ok(Self::Upsloping),
            "Flatsloping: minimal change (typical healthy heart)" => Ok(Self::Flatsloping),
            "Downsloping: signs of unhealthy heart" => Ok(Self::Downsloping),
            other => Err(EncodeError::UnmappedCategory {
                field: "slope",
                label: other.to_string(),
            }),
        }
    }
}

/// One complete set of screening answers, as produced by the intake form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAnswers {
    /// Age in years (1-120)
    pub age: u16,

    /// Patient sex
    pub sex: Sex,

    /// Chest pain type
    pub chest_pain: ChestPainType,

    /// Resting blood pressure in mm Hg (1-499)
    pub resting_bp: u16,

    /// Serum cholesterol in mg/dl (1-999)
    pub cholesterol: u16,

    /// Fasting blood sugar > 120 mg/dl
    pub fasting_blood_sugar: YesNo,

    /// Resting electrocardiographic result
    pub resting_ecg: RestingEcg,

    /// Maximum heart rate achieved (1-299)
    pub max_heart_rate: u16,

    /// Exercise induced angina
    pub exercise_angina: YesNo,

    /// ST depression induced by exercise relative to rest (unconstrained sign)
    pub oldpeak: f64,

    /// Heart-rate slope during peak exercise
    pub slope: Slope,

    /// Number of major vessels colored by fluoroscopy (0-4)
    pub vessel_count: u8,

    /// Thalium stress result code, taken verbatim (1-7).
    /// The source dataset documents no label mapping for this field, so the
    /// raw code is used directly.
    pub thalassemia_code: u8,
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), EncodeError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(EncodeError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

impl RawAnswers {
    /// Encode the answers into the feature vector the model was trained on.
    ///
    /// The output order is fixed by [`super::FEATURE_NAMES`] and must never
    /// change: the classifier was fitted against exactly this column order.
    ///
    /// # Errors
    /// Returns `EncodeError::OutOfRange` if a bounded numeric answer lies
    /// outside its declared range.
    pub fn encode(&self) -> Result<FeatureVector, EncodeError> {
        check_range("age", f64::from(self.age), 1.0, 120.0)?;
        check_range("resting_bp", f64::from(self.resting_bp), 1.0, 499.0)?;
        check_range("cholesterol", f64::from(self.cholesterol), 1.0, 999.0)?;
        check_range("max_heart_rate", f64::from(self.max_heart_rate), 1.0, 299.0)?;
        check_range("vessel_count", f64::from(self.vessel_count), 0.0, 4.0)?;
        check_range("thalassemia_code", f64::from(self.thalassemia_code), 1.0, 7.0)?;

        Ok(FeatureVector::new([
            f64::from(self.age),
            self.sex.code(),
            self.chest_pain.code(),
            f64::from(self.resting_bp),
            f64::from(self.cholesterol),
            self.fasting_blood_sugar.code(),
            self.resting_ecg.code(),
            f64::from(self.max_heart_rate),
            self.exercise_angina.code(),
            self.oldpeak,
            self.slope.code(),
            f64::from(self.vessel_count),
            f64::from(self.thalassemia_code),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> RawAnswers {
        RawAnswers {
            age: 63,
            sex: Sex::Male,
            chest_pain: ChestPainType::TypicalAngina,
            resting_bp: 145,
            cholesterol: 233,
            fasting_blood_sugar: YesNo::Yes,
            resting_ecg: RestingEcg::Normal,
            max_heart_rate: 150,
            exercise_angina: YesNo::No,
            oldpeak: 2.3,
            slope: Slope::Downsloping,
            vessel_count: 0,
            thalassemia_code: 1,
        }
    }

    #[test]
    fn test_chest_pain_codes() {
        let cases = [
            ("Typical angina", 0.0),
            ("Atypical angina", 1.0),
            ("Non-anginal pain", 2.0),
            ("Asymptomatic", 3.0),
        ];
        for (label, code) in cases {
            let parsed = ChestPainType::from_label(label).expect("Label should parse");
            assert_eq!(parsed.code(), code, "label {label:?}");
        }
    }

    #[test]
    fn test_resting_ecg_codes() {
        let cases = [
            ("Nothing to note", 0.0),
            ("ST-T Wave abnormality", 1.0),
            ("Possible or definite left ventricular hypertrophy", 2.0),
        ];
        for (label, code) in cases {
            let parsed = RestingEcg::from_label(label).expect("Label should parse");
            assert_eq!(parsed.code(), code, "label {label:?}");
        }
    }

    #[test]
    fn test_slope_codes() {
        let cases = [
            ("Upsloping: better heart rate with exercise (uncommon)", 0.0),
            ("Flatsloping: minimal change (typical healthy heart)", 1.0),
            ("Downsloping: signs of unhealthy heart", 2.0),
        ];
        for (label, code) in cases {
            let parsed = Slope::from_label(label).expect("Label should parse");
            assert_eq!(parsed.code(), code, "label {label:?}");
        }
    }

    #[test]
    fn test_binary_codes() {
        assert_eq!(Sex::from_label("male").unwrap().code(), 1.0);
        assert_eq!(Sex::from_label("female").unwrap().code(), 0.0);
        assert_eq!(YesNo::from_label("fbs", "Yes").unwrap().code(), 1.0);
        assert_eq!(YesNo::from_label("fbs", "No").unwrap().code(), 0.0);
    }

    #[test]
    fn test_unmapped_label_fails() {
        let err = ChestPainType::from_label("Crushing pain").unwrap_err();
        assert_eq!(
            err,
            EncodeError::UnmappedCategory {
                field: "chest_pain",
                label: "Crushing pain".to_string(),
            }
        );

        assert!(Sex::from_label("Male").is_err(), "labels are case-sensitive");
        assert!(Slope::from_label("Upsloping").is_err());
        assert!(YesNo::from_label("exercise_angina", "yes").is_err());
    }

    #[test]
    fn test_encode_reference_vector() {
        let vector = baseline().encode().expect("Baseline should encode");
        assert_eq!(
            vector.to_vec(),
            vec![63.0, 1.0, 0.0, 145.0, 233.0, 1.0, 0.0, 150.0, 0.0, 2.3, 2.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_encode_out_of_range() {
        let mut answers = baseline();
        answers.age = 0;
        assert_eq!(
            answers.encode().unwrap_err(),
            EncodeError::OutOfRange {
                field: "age",
                value: 0.0,
                min: 1.0,
                max: 120.0,
            }
        );

        let mut answers = baseline();
        answers.age = 200;
        assert!(matches!(
            answers.encode().unwrap_err(),
            EncodeError::OutOfRange { field: "age", .. }
        ));

        let mut answers = baseline();
        answers.resting_bp = 500;
        assert!(matches!(
            answers.encode().unwrap_err(),
            EncodeError::OutOfRange { field: "resting_bp", .. }
        ));

        let mut answers = baseline();
        answers.vessel_count = 5;
        assert!(matches!(
            answers.encode().unwrap_err(),
            EncodeError::OutOfRange { field: "vessel_count", .. }
        ));

        let mut answers = baseline();
        answers.thalassemia_code = 0;
        assert!(matches!(
            answers.encode().unwrap_err(),
            EncodeError::OutOfRange { field: "thalassemia_code", .. }
        ));
    }

    #[test]
    fn test_encode_injective_on_single_field_change() {
        let base = baseline().encode().unwrap();

        let mut answers = baseline();
        answers.chest_pain = ChestPainType::Asymptomatic;
        let changed = answers.encode().unwrap();

        let differing: Vec<usize> = base
            .as_slice()
            .iter()
            .zip(changed.as_slice())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(differing, vec![2], "only the chest-pain position changes");

        let mut answers = baseline();
        answers.slope = Slope::Upsloping;
        let changed = answers.encode().unwrap();
        let differing: Vec<usize> = base
            .as_slice()
            .iter()
            .zip(changed.as_slice())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(differing, vec![10], "only the slope position changes");
    }

    #[test]
    fn test_answers_deserialize_with_form_labels() {
        let json = r#"{
            "age": 63,
            "sex": "male",
            "chest_pain": "Typical angina",
            "resting_bp": 145,
            "cholesterol": 233,
            "fasting_blood_sugar": "Yes",
            "resting_ecg": "Nothing to note",
            "max_heart_rate": 150,
            "exercise_angina": "No",
            "oldpeak": 2.3,
            "slope": "Downsloping: signs of unhealthy heart",
            "vessel_count": 0,
            "thalassemia_code": 1
        }"#;
        let answers: RawAnswers = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(answers.sex, Sex::Male);
        assert_eq!(answers.slope, Slope::Downsloping);

        let bad = json.replace("Typical angina", "Stabbing pain");
        assert!(serde_json::from_str::<RawAnswers>(&bad).is_err());
    }
}
