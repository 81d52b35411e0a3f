//! Rule-based fraud risk scoring over validation, consistency, and forensic
//! signals.
//!
//! Scoring is additive from zero with a decision that starts at ACCEPTED and
//! only hardens. One override exists: when the consistency reason records
//! both an id-number and a name mismatch, two independent mismatches are
//! treated as data-entry or OCR noise rather than deliberate fraud, so the
//! FAKE path is softened to SUSPICIOUS at a fixed score.

use super::config::FraudWeights;
use super::consistency::{ID_MISMATCH_MARKER, NAME_MISMATCH_MARKER};
use super::domain::{
    ConsistencyResult, ConsistencyScore, ForensicVerdict, FraudAssessment, RuleDecision,
    ValidationResult,
};

pub(crate) fn assess_fraud(
    validation: &ValidationResult,
    consistency: &ConsistencyResult,
    forensics: &ForensicVerdict,
    weights: &FraudWeights,
) -> FraudAssessment {
    let mut score: u32 = 0;
    let mut reasons = Vec::new();
    let mut decision = RuleDecision::Accepted;

    if !validation.id_number_valid {
        score += weights.invalid_id_penalty;
        reasons.push("Invalid Aadhaar Format".to_string());
    }

    if validation.qr_expected_but_failed {
        score += weights.unreadable_qr_penalty;
        reasons.push("QR Code Unreadable".to_string());
    }

    match consistency.score {
        ConsistencyScore::Mismatch => {
            score += weights.data_mismatch_penalty;
            reasons.push(format!("DATA MISMATCH: {}", consistency.reason));
            decision = RuleDecision::Fake;
        }
        ConsistencyScore::Neutral => {
            score += weights.neutral_consistency_penalty;
            reasons.push(consistency.reason.clone());
        }
        ConsistencyScore::Match => {}
    }

    if forensics.tampering_suspected {
        score += weights.tampering_penalty;
        reasons.push("Digital Tampering Detected".to_string());
    }

    if score >= weights.fake_threshold {
        decision = RuleDecision::Fake;
    } else if score >= weights.suspicious_threshold {
        decision = RuleDecision::Suspicious;
    }

    if consistency.reason.contains(ID_MISMATCH_MARKER)
        && consistency.reason.contains(NAME_MISMATCH_MARKER)
    {
        decision = RuleDecision::Suspicious;
        score = weights.double_mismatch_score;
        reasons.push("Flagged as Suspicious due to double mismatch".to_string());
    }

    FraudAssessment {
        fraud_score: score.min(100) as u8,
        decision,
        reasons,
    }
}
