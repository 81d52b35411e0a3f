//! Multi-signal fusion and decision pipeline.
//!
//! Perception is external: classification, text recognition, QR decoding,
//! and forensic metric computation all happen upstream and arrive here as
//! structured inputs. The stages below normalize those signals, reconcile
//! them across sources, score the fraud risk, and arbitrate one final
//! verdict. Data flows strictly downward; every stage produces a fresh
//! immutable record.

mod arbiter;
pub mod collaborators;
pub mod config;
mod consistency;
pub mod domain;
mod extract;
mod features;
mod forensics;
mod fraud;
mod normalize;
pub mod qr;
pub mod service;
mod validate;

#[cfg(test)]
mod tests;

pub use collaborators::{
    FraudModel, FraudModelError, RecordSinkError, SecureQrDecoder, SecureQrError,
    SecureQrUnavailable, VerifiedRecordSink,
};
pub use config::{ForensicThresholds, FraudWeights, PipelineConfig};
pub use domain::{
    ClassifierOutput, ConsistencyResult, ConsistencyScore, DocumentLabel, ExtractedFields,
    FinalDecision, ForensicMetrics, ForensicVerdict, FraudAssessment, FraudLabel, Gender,
    ModelStatus, QrFields, QrResult, QrScan, QrStatus, RuleDecision, StatisticalFraudResult,
    ValidationResult, Verdict, VerificationReport, VerificationRequest, VerifiedRecord,
};
pub use features::FeatureVector;
pub use qr::QrPayloadParser;
pub use service::{VerificationError, VerificationService};
