//! Turns a raw decoded QR string into typed fields.
//!
//! Real payloads arrive in several formats, so parsing is an ordered cascade
//! of strategies tried against the same string; the first one to produce
//! fields wins. A failed strategy is an ordinary `None`, never an error, and
//! the raw-text fallback at the end of the cascade guarantees a decoded
//! payload is never fully lost even when no schema matched.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::collaborators::SecureQrDecoder;
use super::domain::{QrFields, QrResult, QrScan, QrStatus};

/// One format strategy in the cascade.
pub(crate) trait QrFormatParser: Send + Sync {
    fn attempt(&self, raw: &str) -> Option<QrFields>;
}

static XML_UID: Lazy<Regex> = Lazy::new(|| Regex::new(r#"uid="(\d+)""#).expect("static regex"));
static XML_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"name="([^"]+)""#).expect("static regex"));
static XML_GENDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"gender="([MF])""#).expect("static regex"));
static XML_DOB: Lazy<Regex> = Lazy::new(|| Regex::new(r#"dob="([^"]+)""#).expect("static regex"));
static XML_YOB: Lazy<Regex> = Lazy::new(|| Regex::new(r#"yob="(\d+)""#).expect("static regex"));

/// Structured-attribute payload: `<PrintLetterBarcodeData uid="…" name="…"/>`.
struct XmlAttributeParser;

impl QrFormatParser for XmlAttributeParser {
    fn attempt(&self, raw: &str) -> Option<QrFields> {
        let mut fields = QrFields::default();

        if let Some(caps) = XML_UID.captures(raw) {
            fields.id_number = Some(caps[1].to_string());
        }
        if let Some(caps) = XML_NAME.captures(raw) {
            fields.name = Some(caps[1].to_string());
        }
        if let Some(caps) = XML_GENDER.captures(raw) {
            fields.gender = Some(match &caps[1] {
                "M" => "Male".to_string(),
                _ => "Female".to_string(),
            });
        }
        if let Some(caps) = XML_DOB.captures(raw) {
            fields.dob = Some(caps[1].to_string());
        } else if let Some(caps) = XML_YOB.captures(raw) {
            // Older cards carry only a year of birth.
            fields.dob = Some(caps[1].to_string());
        }

        (fields != QrFields::default()).then_some(fields)
    }
}

/// Pipe-delimited payload: `123456789012|Name|Dob|Gender|…`.
struct PipeDelimitedParser;

impl QrFormatParser for PipeDelimitedParser {
    fn attempt(&self, raw: &str) -> Option<QrFields> {
        let parts: Vec<&str> = raw.split('|').map(str::trim).collect();
        if parts.len() < 2 {
            return None;
        }

        let id_number = parts
            .first()
            .filter(|part| part.len() == 12 && part.chars().all(|c| c.is_ascii_digit()))
            .map(|part| part.to_string());

        let segment = |index: usize| {
            parts
                .get(index)
                .filter(|part| !part.is_empty())
                .map(|part| part.to_string())
        };

        Some(QrFields {
            id_number,
            name: segment(1),
            dob: segment(2),
            gender: segment(3),
            raw_text: None,
        })
    }
}

/// Vendor encrypted payload, delegated to the injected decoder. Decoder
/// failures are a non-match, not an error.
struct SecureQrParser {
    decoder: Arc<dyn SecureQrDecoder>,
}

impl QrFormatParser for SecureQrParser {
    fn attempt(&self, raw: &str) -> Option<QrFields> {
        match self.decoder.decode(raw) {
            Ok(fields) => Some(fields),
            Err(error) => {
                debug!(%error, "secure QR decode did not match");
                None
            }
        }
    }
}

/// Last resort: preserve the payload verbatim under `raw_text`.
struct RawTextFallback;

impl QrFormatParser for RawTextFallback {
    fn attempt(&self, raw: &str) -> Option<QrFields> {
        Some(QrFields {
            raw_text: Some(raw.to_string()),
            ..QrFields::default()
        })
    }
}

/// The full cascade in fixed priority order.
pub struct QrPayloadParser {
    parsers: Vec<Box<dyn QrFormatParser>>,
}

impl QrPayloadParser {
    pub fn new(secure_decoder: Arc<dyn SecureQrDecoder>) -> Self {
        Self {
            parsers: vec![
                Box::new(XmlAttributeParser),
                Box::new(PipeDelimitedParser),
                Box::new(SecureQrParser {
                    decoder: secure_decoder,
                }),
                Box::new(RawTextFallback),
            ],
        }
    }

    pub fn parse(&self, scan: &QrScan) -> QrResult {
        match scan {
            QrScan::NotDetected => QrResult {
                status: QrStatus::NotDetected,
                fields: None,
            },
            QrScan::Unreadable => QrResult {
                status: QrStatus::LikelyPresentButUnreadable,
                fields: None,
            },
            QrScan::Decoded(raw) => {
                let fields = self
                    .parsers
                    .iter()
                    .find_map(|parser| parser.attempt(raw));
                QrResult {
                    status: QrStatus::Decoded,
                    fields,
                }
            }
        }
    }
}
