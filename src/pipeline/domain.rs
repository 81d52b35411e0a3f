use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Gender as printed on the card. Anything the extractor cannot read maps to
/// absence, never to a third variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// Typed fields recovered from the recognized text lines of the card face.
///
/// Produced once per request and immutable thereafter. A `None` field means
/// "not found", which every downstream rule treats as insufficient evidence
/// rather than invalid data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub name: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<Gender>,
    pub id_number: Option<String>,
}

impl ExtractedFields {
    /// Count of the four fields that were actually recovered.
    pub fn present_count(&self) -> usize {
        [
            self.name.is_some(),
            self.dob.is_some(),
            self.gender.is_some(),
            self.id_number.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }
}

/// Raw outcome of the external QR decoder, as handed to the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QrScan {
    /// No QR region was found on the image at all.
    NotDetected,
    /// A decode was attempted but produced no payload.
    Unreadable,
    /// The decoder produced a payload string.
    Decoded(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QrStatus {
    NotDetected,
    LikelyPresentButUnreadable,
    Decoded,
}

/// Loosely-typed fields pulled out of a decoded QR payload.
///
/// The populated subset depends on which format parser matched; the raw-text
/// fallback fills only `raw_text` so a decode is never fully lost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrFields {
    pub id_number: Option<String>,
    pub name: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub raw_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrResult {
    pub status: QrStatus,
    /// Present only when `status` is `Decoded`.
    pub fields: Option<QrFields>,
}

/// Per-field format and plausibility checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub id_number_valid: bool,
    pub dob_valid: bool,
    pub name_valid: bool,
    pub gender_valid: bool,
    /// Field keys (id number excluded) that could not be extracted at all.
    pub missing_fields: BTreeSet<String>,
    pub overall_valid: bool,
    /// A QR region was present but its payload could not be read.
    pub qr_expected_but_failed: bool,
}

/// Discrete agreement signal between document-extracted and QR-extracted
/// fields. The three-valued shape is an invariant the fraud aggregator and
/// feature projector rely on, so it is an enum rather than a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyScore {
    /// At least one comparable field disagreed across sources.
    Mismatch,
    /// No QR payload to compare against; neither penalized nor trusted.
    Neutral,
    /// Every comparable field agreed.
    Match,
}

impl ConsistencyScore {
    pub const fn value(self) -> f64 {
        match self {
            ConsistencyScore::Mismatch => 0.0,
            ConsistencyScore::Neutral => 0.5,
            ConsistencyScore::Match => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyResult {
    pub matching_performed: bool,
    pub score: ConsistencyScore,
    pub reason: String,
}

/// Pixel-level metrics computed by the external forensic collaborator.
/// All-zero means the image was unreadable upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ForensicMetrics {
    pub sharpness: f64,
    pub edge_density: f64,
    pub noise_level: f64,
    pub ela_score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForensicVerdict {
    pub tampering_suspected: bool,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleDecision {
    Accepted,
    Suspicious,
    Fake,
}

/// Rule-based fraud risk with the audit trail of every signal that fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudAssessment {
    /// Always clamped to [0, 100].
    pub fraud_score: u8,
    pub decision: RuleDecision,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FraudLabel {
    Real,
    Fake,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModelStatus {
    Success,
    Failed,
}

/// Outcome of the external statistical fraud model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalFraudResult {
    pub prediction: FraudLabel,
    pub fraud_probability: f64,
    pub model_status: ModelStatus,
}

impl StatisticalFraudResult {
    /// Named fail-open default used whenever inference is unavailable. The
    /// benign prediction here is a policy choice: a broken model must never
    /// block a verification on its own.
    pub const fn fail_open() -> Self {
        Self {
            prediction: FraudLabel::Real,
            fraud_probability: 0.0,
            model_status: ModelStatus::Failed,
        }
    }
}

/// Label assigned by the external document-type classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentLabel {
    RealAadhaar,
    FakeAadhaar,
    NonAadhaar,
    /// The classifier's own low-confidence safeguard.
    Uncertain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierOutput {
    pub label: DocumentLabel,
    pub confidence: f64,
    pub per_class_scores: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Rejected,
    Fraud,
    Suspicious,
    Accepted,
}

/// Terminal output of the fusion pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalDecision {
    pub verdict: Verdict,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraud_probability: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Flattened record offered to persistence after an accepted verification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifiedRecord {
    pub id_number: String,
    pub name: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<Gender>,
    pub status: &'static str,
    pub confidence: f64,
}

/// Everything the collaborators produced for one submission, bundled as the
/// pipeline entry point input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub text_lines: Vec<String>,
    pub qr_scan: QrScan,
    pub classifier: ClassifierOutput,
    pub forensics: ForensicMetrics,
}

/// Full audit trail for one verification, every intermediate artifact
/// included so the verdict can be explained after the fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub classifier: ClassifierOutput,
    pub extracted: ExtractedFields,
    pub qr: QrResult,
    pub validation: ValidationResult,
    pub consistency: ConsistencyResult,
    pub forensics: ForensicVerdict,
    pub fraud_rule: FraudAssessment,
    pub fraud_model: StatisticalFraudResult,
    pub decision: FinalDecision,
}

impl VerificationReport {
    /// Audit-friendly JSON rendering of the full decision trail.
    pub fn audit_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
