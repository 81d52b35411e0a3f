//! Final arbitration across the document classifier, the statistical model,
//! and the rule-based assessment.
//!
//! The decision table is priority ordered and total; the first matching rule
//! wins and everything left falls through to ACCEPTED. An UNCERTAIN
//! classifier label carries no rule of its own and lands on the default
//! branch.

use super::domain::{
    ClassifierOutput, DocumentLabel, FinalDecision, FraudAssessment, FraudLabel, RuleDecision,
    StatisticalFraudResult, Verdict,
};

pub(crate) fn make_final_decision(
    classifier: &ClassifierOutput,
    model: &StatisticalFraudResult,
    rule: Option<&FraudAssessment>,
) -> FinalDecision {
    if classifier.label == DocumentLabel::NonAadhaar {
        return FinalDecision {
            verdict: Verdict::Rejected,
            reason: "Document is not Aadhaar".to_string(),
            fraud_probability: None,
            confidence: Some(classifier.confidence),
        };
    }

    if classifier.label == DocumentLabel::FakeAadhaar && model.prediction == FraudLabel::Fake {
        return FinalDecision {
            verdict: Verdict::Fraud,
            reason: "Visual forgery + data inconsistency".to_string(),
            fraud_probability: Some(model.fraud_probability),
            confidence: None,
        };
    }

    let sources_conflict = (classifier.label == DocumentLabel::FakeAadhaar
        && model.prediction == FraudLabel::Real)
        || (classifier.label == DocumentLabel::RealAadhaar
            && model.prediction == FraudLabel::Fake);
    let rule_suspicious =
        rule.is_some_and(|assessment| assessment.decision == RuleDecision::Suspicious);

    if sources_conflict || rule_suspicious {
        return FinalDecision {
            verdict: Verdict::Suspicious,
            reason: "Conflicting fraud signals".to_string(),
            fraud_probability: Some(model.fraud_probability),
            confidence: None,
        };
    }

    FinalDecision {
        verdict: Verdict::Accepted,
        reason: "No fraud indicators detected".to_string(),
        fraud_probability: Some(model.fraud_probability),
        confidence: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::domain::ModelStatus;

    fn classifier(label: DocumentLabel) -> ClassifierOutput {
        ClassifierOutput {
            label,
            confidence: 0.93,
            per_class_scores: Default::default(),
        }
    }

    fn model(prediction: FraudLabel, probability: f64) -> StatisticalFraudResult {
        StatisticalFraudResult {
            prediction,
            fraud_probability: probability,
            model_status: ModelStatus::Success,
        }
    }

    fn rule(decision: RuleDecision) -> FraudAssessment {
        FraudAssessment {
            fraud_score: 45,
            decision,
            reasons: Vec::new(),
        }
    }

    #[test]
    fn non_aadhaar_is_rejected_regardless_of_other_signals() {
        let decision = make_final_decision(
            &classifier(DocumentLabel::NonAadhaar),
            &model(FraudLabel::Fake, 0.99),
            Some(&rule(RuleDecision::Fake)),
        );

        assert_eq!(decision.verdict, Verdict::Rejected);
        assert_eq!(decision.confidence, Some(0.93));
        assert_eq!(decision.fraud_probability, None);
    }

    #[test]
    fn fake_label_plus_fake_prediction_is_fraud() {
        let decision = make_final_decision(
            &classifier(DocumentLabel::FakeAadhaar),
            &model(FraudLabel::Fake, 0.87),
            None,
        );

        assert_eq!(decision.verdict, Verdict::Fraud);
        assert_eq!(decision.fraud_probability, Some(0.87));
    }

    #[test]
    fn conflicting_sources_are_suspicious() {
        let decision = make_final_decision(
            &classifier(DocumentLabel::FakeAadhaar),
            &model(FraudLabel::Real, 0.1),
            None,
        );
        assert_eq!(decision.verdict, Verdict::Suspicious);

        let decision = make_final_decision(
            &classifier(DocumentLabel::RealAadhaar),
            &model(FraudLabel::Fake, 0.7),
            None,
        );
        assert_eq!(decision.verdict, Verdict::Suspicious);
    }

    #[test]
    fn suspicious_rule_decision_alone_is_enough() {
        let decision = make_final_decision(
            &classifier(DocumentLabel::RealAadhaar),
            &model(FraudLabel::Real, 0.05),
            Some(&rule(RuleDecision::Suspicious)),
        );
        assert_eq!(decision.verdict, Verdict::Suspicious);
    }

    #[test]
    fn clean_case_is_accepted() {
        let decision = make_final_decision(
            &classifier(DocumentLabel::RealAadhaar),
            &model(FraudLabel::Real, 0.02),
            Some(&rule(RuleDecision::Accepted)),
        );

        assert_eq!(decision.verdict, Verdict::Accepted);
        assert_eq!(decision.reason, "No fraud indicators detected");
    }

    #[test]
    fn uncertain_label_falls_through_to_accepted() {
        let decision = make_final_decision(
            &classifier(DocumentLabel::Uncertain),
            &model(FraudLabel::Real, 0.3),
            None,
        );
        assert_eq!(decision.verdict, Verdict::Accepted);
    }
}
