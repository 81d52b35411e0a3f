//! Format and plausibility rules for the extracted fields.
//!
//! Each check is independent and total: absence fails the individual check
//! but never aborts anything. Missing-field bookkeeping deliberately excludes
//! the id number, which has its own format rule.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::domain::{ExtractedFields, QrStatus, ValidationResult};

static BARE_YEAR_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(19\d{2}|20\d{2})$").expect("static year regex"));

pub(crate) fn validate_id_number(id_number: Option<&str>) -> bool {
    id_number.is_some_and(|id| id.len() == 12 && id.chars().all(|c| c.is_ascii_digit()))
}

/// A full `DD/MM/YYYY` date or a bare 19xx/20xx year are both acceptable:
/// older cards print only the year of birth.
pub(crate) fn validate_dob(dob: Option<&str>) -> bool {
    dob.is_some_and(|dob| {
        NaiveDate::parse_from_str(dob, "%d/%m/%Y").is_ok() || BARE_YEAR_ONLY.is_match(dob)
    })
}

pub(crate) fn validate_name(name: Option<&str>) -> bool {
    name.is_some_and(|name| {
        !name.chars().any(|c| c.is_ascii_digit()) && name.split_whitespace().count() >= 2
    })
}

pub(crate) fn rule_validation(fields: &ExtractedFields, qr_status: QrStatus) -> ValidationResult {
    let id_number_valid = validate_id_number(fields.id_number.as_deref());
    let dob_valid = validate_dob(fields.dob.as_deref());
    let name_valid = validate_name(fields.name.as_deref());
    // The extractor only ever produces the two well-formed variants, so
    // validity collapses to presence.
    let gender_valid = fields.gender.is_some();

    let mut missing_fields = std::collections::BTreeSet::new();
    if fields.name.is_none() {
        missing_fields.insert("name".to_string());
    }
    if fields.dob.is_none() {
        missing_fields.insert("dob".to_string());
    }
    if fields.gender.is_none() {
        missing_fields.insert("gender".to_string());
    }

    ValidationResult {
        id_number_valid,
        dob_valid,
        name_valid,
        gender_valid,
        missing_fields,
        overall_valid: id_number_valid && dob_valid && name_valid && gender_valid,
        qr_expected_but_failed: qr_status == QrStatus::LikelyPresentButUnreadable,
    }
}
