//! Pipeline entry point composing the fusion stages with the injected
//! collaborators.

use std::sync::Arc;

use tracing::{debug, warn};

use super::arbiter::make_final_decision;
use super::collaborators::{FraudModel, RecordSinkError, SecureQrDecoder, VerifiedRecordSink};
use super::config::PipelineConfig;
use super::consistency::build_consistency;
use super::domain::{
    FraudLabel, ModelStatus, StatisticalFraudResult, Verdict, VerificationReport,
    VerificationRequest, VerifiedRecord,
};
use super::extract::extract_fields;
use super::features::project_features;
use super::forensics::assess_forensics;
use super::fraud::assess_fraud;
use super::qr::QrPayloadParser;
use super::validate::rule_validation;

/// Runs one verification request through every fusion stage.
///
/// All stages are pure and synchronous; the service holds no per-request
/// state, so one instance can serve concurrent requests as long as the
/// injected collaborators tolerate that.
pub struct VerificationService<M, S> {
    qr_parser: QrPayloadParser,
    model: Arc<M>,
    sink: Arc<S>,
    config: PipelineConfig,
}

impl<M, S> VerificationService<M, S>
where
    M: FraudModel,
    S: VerifiedRecordSink,
{
    pub fn new(
        model: Arc<M>,
        sink: Arc<S>,
        secure_decoder: Arc<dyn SecureQrDecoder>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            qr_parser: QrPayloadParser::new(secure_decoder),
            model,
            sink,
            config,
        }
    }

    /// Full fusion run: always produces a report with a final decision; the
    /// only fallible part is offering an accepted record to the sink.
    pub fn verify(
        &self,
        request: VerificationRequest,
    ) -> Result<VerificationReport, VerificationError> {
        let extracted = extract_fields(&request.text_lines);
        let qr = self.qr_parser.parse(&request.qr_scan);
        debug!(?qr.status, fields_present = extracted.present_count(), "signals normalized");

        let validation = rule_validation(&extracted, qr.status);
        let consistency = build_consistency(&extracted, &qr);
        let forensics = assess_forensics(&request.forensics, &self.config.forensic);
        let fraud_rule = assess_fraud(&validation, &consistency, &forensics, &self.config.fraud);

        let features = project_features(
            &validation,
            &consistency,
            &request.forensics,
            &extracted,
            &qr,
        );
        let fraud_model = self.run_model(features.aligned_to(self.model.feature_names()));

        let decision = make_final_decision(&request.classifier, &fraud_model, Some(&fraud_rule));
        debug!(?decision.verdict, fraud_score = fraud_rule.fraud_score, "verdict reached");

        if decision.verdict == Verdict::Accepted {
            if let Some(id_number) = &extracted.id_number {
                let record = VerifiedRecord {
                    id_number: id_number.replace(' ', ""),
                    name: extracted.name.clone(),
                    dob: extracted.dob.clone(),
                    gender: extracted.gender,
                    status: "ACCEPTED",
                    confidence: (1.0 - fraud_model.fraud_probability) * 100.0,
                };
                self.sink.offer(record)?;
            }
        }

        Ok(VerificationReport {
            classifier: request.classifier,
            extracted,
            qr,
            validation,
            consistency,
            forensics,
            fraud_rule,
            fraud_model,
            decision,
        })
    }

    /// Inference failure degrades to the named fail-open default instead of
    /// aborting the decision.
    fn run_model(&self, features: Vec<f64>) -> StatisticalFraudResult {
        match self.model.predict(&features) {
            Ok(probability) => {
                let prediction = if probability >= self.config.fraud_probability_threshold {
                    FraudLabel::Fake
                } else {
                    FraudLabel::Real
                };
                StatisticalFraudResult {
                    prediction,
                    fraud_probability: probability,
                    model_status: ModelStatus::Success,
                }
            }
            Err(error) => {
                warn!(%error, "statistical model failed, degrading to fail-open default");
                StatisticalFraudResult::fail_open()
            }
        }
    }
}

/// Error raised by the verification service.
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error(transparent)]
    Sink(#[from] RecordSinkError),
}
