//! Reconciles document-extracted fields against QR-extracted fields.
//!
//! A field is only compared when both sides carry a value; absence on either
//! side is not a mismatch. The result is the discrete three-valued score the
//! fraud aggregator keys on.

use tracing::warn;

use super::domain::{ConsistencyResult, ConsistencyScore, ExtractedFields, QrResult, QrStatus};
use super::normalize::normalize;

/// Marker prefixes the fraud aggregator's double-mismatch override scans for.
pub(crate) const ID_MISMATCH_MARKER: &str = "Aadhaar Number mismatch";
pub(crate) const NAME_MISMATCH_MARKER: &str = "Name mismatch";

pub(crate) const QR_UNREADABLE_REASON: &str = "QR Code could not be read";
const MATCHED_REASON: &str = "OCR and QR data matched";

pub(crate) fn build_consistency(extracted: &ExtractedFields, qr: &QrResult) -> ConsistencyResult {
    let fields = match (&qr.status, &qr.fields) {
        (QrStatus::Decoded, Some(fields)) => fields,
        // Neutral default: not penalizing, not trusting.
        _ => {
            return ConsistencyResult {
                matching_performed: false,
                score: ConsistencyScore::Neutral,
                reason: QR_UNREADABLE_REASON.to_string(),
            }
        }
    };

    let mut mismatches = Vec::new();

    if let (Some(ocr_id), Some(qr_id)) = (&extracted.id_number, &fields.id_number) {
        if normalize(ocr_id) != normalize(qr_id) {
            mismatches.push(format!("{ID_MISMATCH_MARKER} ({ocr_id} vs {qr_id})"));
        }
    }

    if let (Some(ocr_name), Some(qr_name)) = (&extracted.name, &fields.name) {
        let normalized_ocr = normalize(ocr_name);
        let normalized_qr = normalize(qr_name);
        // Containment in either direction tolerates OCR truncation.
        if !normalized_qr.contains(&normalized_ocr) && !normalized_ocr.contains(&normalized_qr) {
            mismatches.push(format!("{NAME_MISMATCH_MARKER} ({ocr_name} vs {qr_name})"));
        }
    }

    if let (Some(ocr_gender), Some(qr_gender)) = (&extracted.gender, &fields.gender) {
        let ocr_initial = ocr_gender.label().chars().next().map(|c| c.to_ascii_lowercase());
        let qr_initial = qr_gender.chars().next().map(|c| c.to_ascii_lowercase());
        if ocr_initial != qr_initial {
            // Gender OCR is unreliable; record but never penalize.
            warn!(
                ocr = ocr_gender.label(),
                qr = qr_gender.as_str(),
                "gender mismatch detected but ignored"
            );
        }
    }

    if mismatches.is_empty() {
        ConsistencyResult {
            matching_performed: true,
            score: ConsistencyScore::Match,
            reason: MATCHED_REASON.to_string(),
        }
    } else {
        ConsistencyResult {
            matching_performed: true,
            score: ConsistencyScore::Mismatch,
            reason: mismatches.join("; "),
        }
    }
}
