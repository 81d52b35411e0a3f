//! Projects the fused signals into the fixed-order numeric feature vector the
//! external statistical model consumes.

use super::domain::{
    ConsistencyResult, ExtractedFields, ForensicMetrics, QrResult, QrStatus, ValidationResult,
};

// Model-side feature cutoffs. Distinct from the forensic verdict thresholds:
// these reproduce what the statistical model was trained against.
const HIGH_ELA_CUTOFF: f64 = 0.8;
const LOW_SHARPNESS_CUTOFF: f64 = 50.0;

const FIELD_COUNT: usize = 4;

/// Named features in a fixed projection order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    entries: Vec<(&'static str, f64)>,
}

impl FeatureVector {
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, value)| *value)
    }

    /// Orders values to match what a model expects by name. Features the
    /// model wants but the projection lacks default to zero; projected
    /// features the model does not ask for are dropped.
    pub fn aligned_to(&self, expected: &[String]) -> Vec<f64> {
        expected
            .iter()
            .map(|name| self.get(name).unwrap_or(0.0))
            .collect()
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

pub(crate) fn project_features(
    validation: &ValidationResult,
    consistency: &ConsistencyResult,
    forensics: &ForensicMetrics,
    extracted: &ExtractedFields,
    qr: &QrResult,
) -> FeatureVector {
    let consistency_score = consistency.score.value();
    let present = extracted.present_count();

    let entries = vec![
        ("aadhaar_valid", flag(validation.id_number_valid)),
        ("dob_valid", flag(validation.dob_valid)),
        ("name_valid", flag(validation.name_valid)),
        ("gender_valid", flag(validation.gender_valid)),
        (
            "qr_expected_but_failed",
            flag(validation.qr_expected_but_failed),
        ),
        ("qr_match", flag(consistency.matching_performed)),
        ("consistency_score", consistency_score),
        ("consistency_failed", flag(consistency_score < 0.5)),
        ("ela_score", forensics.ela_score),
        ("edge_density", forensics.edge_density),
        ("sharpness", forensics.sharpness),
        ("high_ela_flag", flag(forensics.ela_score > HIGH_ELA_CUTOFF)),
        (
            "low_sharpness_flag",
            flag(forensics.sharpness < LOW_SHARPNESS_CUTOFF),
        ),
        ("ocr_field_count", present as f64),
        (
            "missing_fields_ratio",
            (FIELD_COUNT - present) as f64 / FIELD_COUNT as f64,
        ),
        ("ocr_failure_count", (FIELD_COUNT - present) as f64),
        ("qr_decoded", flag(qr.status == QrStatus::Decoded)),
    ];

    FeatureVector { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::domain::{ConsistencyScore, Gender, QrFields};

    fn fixture() -> FeatureVector {
        let validation = ValidationResult {
            id_number_valid: true,
            dob_valid: true,
            name_valid: false,
            gender_valid: true,
            missing_fields: ["name".to_string()].into_iter().collect(),
            overall_valid: false,
            qr_expected_but_failed: false,
        };
        let consistency = ConsistencyResult {
            matching_performed: true,
            score: ConsistencyScore::Mismatch,
            reason: "Name mismatch (a vs b)".to_string(),
        };
        let forensics = ForensicMetrics {
            sharpness: 42.0,
            edge_density: 0.2,
            noise_level: 33.0,
            ela_score: 1.5,
        };
        let extracted = ExtractedFields {
            name: None,
            dob: Some("12/05/1981".to_string()),
            gender: Some(Gender::Male),
            id_number: Some("123456789012".to_string()),
        };
        let qr = QrResult {
            status: QrStatus::Decoded,
            fields: Some(QrFields::default()),
        };

        project_features(&validation, &consistency, &forensics, &extracted, &qr)
    }

    #[test]
    fn projection_order_is_stable() {
        let names: Vec<&str> = fixture().names().collect();
        assert_eq!(
            names,
            vec![
                "aadhaar_valid",
                "dob_valid",
                "name_valid",
                "gender_valid",
                "qr_expected_but_failed",
                "qr_match",
                "consistency_score",
                "consistency_failed",
                "ela_score",
                "edge_density",
                "sharpness",
                "high_ela_flag",
                "low_sharpness_flag",
                "ocr_field_count",
                "missing_fields_ratio",
                "ocr_failure_count",
                "qr_decoded",
            ]
        );
    }

    #[test]
    fn flags_and_ratios_reflect_the_inputs() {
        let features = fixture();

        assert_eq!(features.get("aadhaar_valid"), Some(1.0));
        assert_eq!(features.get("name_valid"), Some(0.0));
        assert_eq!(features.get("consistency_score"), Some(0.0));
        assert_eq!(features.get("consistency_failed"), Some(1.0));
        assert_eq!(features.get("high_ela_flag"), Some(1.0));
        assert_eq!(features.get("low_sharpness_flag"), Some(1.0));
        assert_eq!(features.get("ocr_field_count"), Some(3.0));
        assert_eq!(features.get("missing_fields_ratio"), Some(0.25));
        assert_eq!(features.get("ocr_failure_count"), Some(1.0));
        assert_eq!(features.get("qr_decoded"), Some(1.0));
    }

    #[test]
    fn alignment_fills_missing_with_zero_and_drops_extras() {
        let features = fixture();
        let expected = vec![
            "sharpness".to_string(),
            "unknown_feature".to_string(),
            "aadhaar_valid".to_string(),
        ];

        assert_eq!(features.aligned_to(&expected), vec![42.0, 0.0, 1.0]);
    }
}
