use std::sync::{Arc, Mutex};

use crate::pipeline::collaborators::{
    FraudModel, FraudModelError, RecordSinkError, SecureQrUnavailable, VerifiedRecordSink,
};
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::domain::{
    ClassifierOutput, DocumentLabel, ForensicMetrics, QrScan, VerificationRequest, VerifiedRecord,
};
use crate::pipeline::service::VerificationService;

pub(super) fn classifier(label: DocumentLabel) -> ClassifierOutput {
    ClassifierOutput {
        label,
        confidence: 0.91,
        per_class_scores: [
            ("aadhaar".to_string(), 0.91),
            ("fake_aadhaar".to_string(), 0.06),
            ("non_aadhaar".to_string(), 0.03),
        ]
        .into_iter()
        .collect(),
    }
}

pub(super) fn card_lines() -> Vec<String> {
    [
        "Government of India",
        "RamjeetSingh",
        "DOB: 12/05/1981",
        "Male",
        "1234 5678 9012",
    ]
    .iter()
    .map(|line| line.to_string())
    .collect()
}

pub(super) fn matching_qr_payload() -> QrScan {
    QrScan::Decoded(
        r#"<PrintLetterBarcodeData uid="123456789012" name="Ramjeet Singh" gender="M" dob="12/05/1981"/>"#
            .to_string(),
    )
}

pub(super) fn clean_forensics() -> ForensicMetrics {
    ForensicMetrics {
        sharpness: 150.0,
        edge_density: 0.1,
        noise_level: 38.0,
        ela_score: 6.0,
    }
}

pub(super) fn request(label: DocumentLabel, qr_scan: QrScan) -> VerificationRequest {
    VerificationRequest {
        text_lines: card_lines(),
        qr_scan,
        classifier: classifier(label),
        forensics: clean_forensics(),
    }
}

/// Model double returning a fixed probability over the full feature set.
pub(super) struct FixedModel {
    pub(super) probability: f64,
    names: Vec<String>,
}

impl FixedModel {
    pub(super) fn new(probability: f64) -> Self {
        Self {
            probability,
            names: ["aadhaar_valid", "consistency_score", "sharpness"]
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

impl FraudModel for FixedModel {
    fn feature_names(&self) -> &[String] {
        &self.names
    }

    fn predict(&self, _features: &[f64]) -> Result<f64, FraudModelError> {
        Ok(self.probability)
    }
}

/// Model double that always fails, for exercising the fail-open path.
pub(super) struct BrokenModel {
    names: Vec<String>,
}

impl BrokenModel {
    pub(super) fn new() -> Self {
        Self { names: Vec::new() }
    }
}

impl FraudModel for BrokenModel {
    fn feature_names(&self) -> &[String] {
        &self.names
    }

    fn predict(&self, _features: &[f64]) -> Result<f64, FraudModelError> {
        Err(FraudModelError::Unavailable("model file missing".to_string()))
    }
}

/// Model double capturing the aligned features it was handed.
pub(super) struct RecordingModel {
    names: Vec<String>,
    pub(super) seen: Mutex<Vec<Vec<f64>>>,
}

impl RecordingModel {
    pub(super) fn expecting(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|name| name.to_string()).collect(),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl FraudModel for RecordingModel {
    fn feature_names(&self) -> &[String] {
        &self.names
    }

    fn predict(&self, features: &[f64]) -> Result<f64, FraudModelError> {
        self.seen
            .lock()
            .expect("model mutex poisoned")
            .push(features.to_vec());
        Ok(0.1)
    }
}

#[derive(Default)]
pub(super) struct MemorySink {
    records: Mutex<Vec<VerifiedRecord>>,
}

impl MemorySink {
    pub(super) fn records(&self) -> Vec<VerifiedRecord> {
        self.records.lock().expect("sink mutex poisoned").clone()
    }
}

impl VerifiedRecordSink for MemorySink {
    fn offer(&self, record: VerifiedRecord) -> Result<(), RecordSinkError> {
        self.records
            .lock()
            .expect("sink mutex poisoned")
            .push(record);
        Ok(())
    }
}

pub(super) struct OfflineSink;

impl VerifiedRecordSink for OfflineSink {
    fn offer(&self, _record: VerifiedRecord) -> Result<(), RecordSinkError> {
        Err(RecordSinkError::Unavailable("store offline".to_string()))
    }
}

pub(super) fn build_service<M: FraudModel>(
    model: M,
) -> (VerificationService<M, MemorySink>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::default());
    let service = VerificationService::new(
        Arc::new(model),
        sink.clone(),
        Arc::new(SecureQrUnavailable),
        PipelineConfig::default(),
    );
    (service, sink)
}
