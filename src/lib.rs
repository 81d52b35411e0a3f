//! Fusion core for Aadhaar card verification.
//!
//! Consumes the structured outputs of the perception collaborators (document
//! classifier, text recognizer, QR decoder, forensic metric computer,
//! statistical fraud model) and fuses them into one auditable verdict:
//! REJECTED, FRAUD, SUSPICIOUS, or ACCEPTED.

pub mod pipeline;

pub use pipeline::{
    ClassifierOutput, DocumentLabel, FinalDecision, ForensicMetrics, FraudModel, PipelineConfig,
    QrScan, SecureQrDecoder, SecureQrUnavailable, Verdict, VerificationReport,
    VerificationRequest, VerificationService, VerifiedRecord, VerifiedRecordSink,
};
