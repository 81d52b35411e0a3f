use serde::{Deserialize, Serialize};

/// Cutoffs for interpreting externally computed pixel metrics.
///
/// The defaults are empirically fixed and are not recalibrated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForensicThresholds {
    /// Sharpness (Laplacian variance) below this suggests a re-captured or
    /// blurred forgery.
    pub min_sharpness: f64,
    /// ELA score above this suggests local recompression artifacts.
    pub max_ela_score: f64,
}

impl Default for ForensicThresholds {
    fn default() -> Self {
        Self {
            min_sharpness: 60.0,
            max_ela_score: 25.0,
        }
    }
}

/// Additive weights and cutoffs for the rule-based fraud score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudWeights {
    pub invalid_id_penalty: u32,
    pub unreadable_qr_penalty: u32,
    pub data_mismatch_penalty: u32,
    pub neutral_consistency_penalty: u32,
    /// Kept low so forensics alone cannot push a card into suspicious range.
    pub tampering_penalty: u32,
    pub fake_threshold: u32,
    pub suspicious_threshold: u32,
    /// Score forced by the double-mismatch override.
    pub double_mismatch_score: u32,
}

impl Default for FraudWeights {
    fn default() -> Self {
        Self {
            invalid_id_penalty: 20,
            unreadable_qr_penalty: 20,
            data_mismatch_penalty: 100,
            neutral_consistency_penalty: 30,
            tampering_penalty: 15,
            fake_threshold: 60,
            suspicious_threshold: 25,
            double_mismatch_score: 45,
        }
    }
}

/// Top-level tuning knobs for one pipeline instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub forensic: ForensicThresholds,
    pub fraud: FraudWeights,
    /// Probability at or above which the statistical model output is read as
    /// FAKE.
    pub fraud_probability_threshold: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            forensic: ForensicThresholds::default(),
            fraud: FraudWeights::default(),
            fraud_probability_threshold: 0.5,
        }
    }
}
