//! Interprets externally computed pixel metrics into a tamper suspicion flag.

use super::config::ForensicThresholds;
use super::domain::{ForensicMetrics, ForensicVerdict};

pub(crate) fn assess_forensics(
    metrics: &ForensicMetrics,
    thresholds: &ForensicThresholds,
) -> ForensicVerdict {
    // The all-zero record is the upstream's "image unreadable" sentinel, not
    // a measurement; it carries no tamper evidence.
    if *metrics == ForensicMetrics::default() {
        return ForensicVerdict {
            tampering_suspected: false,
            reasons: Vec::new(),
        };
    }

    let mut reasons = Vec::new();

    if metrics.sharpness < thresholds.min_sharpness {
        reasons.push("Low sharpness".to_string());
    }
    if metrics.ela_score > thresholds.max_ela_score {
        reasons.push("High ELA".to_string());
    }

    ForensicVerdict {
        tampering_suspected: !reasons.is_empty(),
        reasons,
    }
}
