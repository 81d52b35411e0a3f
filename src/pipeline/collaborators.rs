//! Traits for the external collaborators the fusion core consumes.
//!
//! The core never loads models or touches storage itself; hosts inject these
//! implementations so the pipeline stays free of lifecycle concerns and can
//! be exercised with in-memory doubles.

use super::domain::{QrFields, VerifiedRecord};

/// Opaque statistical fraud model. The core hands it a feature vector aligned
/// to `feature_names()` and reads back a fraud probability in [0, 1].
pub trait FraudModel: Send + Sync {
    /// Feature names the model expects, in the order it expects them.
    fn feature_names(&self) -> &[String];

    fn predict(&self, features: &[f64]) -> Result<f64, FraudModelError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FraudModelError {
    #[error("model unavailable: {0}")]
    Unavailable(String),
    #[error("inference failed: {0}")]
    Inference(String),
}

/// Decoder for the vendor "secure" encrypted QR payload format.
pub trait SecureQrDecoder: Send + Sync {
    fn decode(&self, raw: &str) -> Result<QrFields, SecureQrError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SecureQrError {
    #[error("secure QR decoding not available")]
    Unsupported,
    #[error("malformed secure QR payload: {0}")]
    Malformed(String),
}

/// Default decoder for deployments without the vendor library.
pub struct SecureQrUnavailable;

impl SecureQrDecoder for SecureQrUnavailable {
    fn decode(&self, _raw: &str) -> Result<QrFields, SecureQrError> {
        Err(SecureQrError::Unsupported)
    }
}

/// Storage hook offered every accepted identity. The core decides *whether*
/// to offer a record, never how it is stored.
pub trait VerifiedRecordSink: Send + Sync {
    fn offer(&self, record: VerifiedRecord) -> Result<(), RecordSinkError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RecordSinkError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}
