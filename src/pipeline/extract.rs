//! Turns raw recognized text lines into typed card fields.
//!
//! Recognized text is noisy: tokens stick together, dates appear with mixed
//! separators, and labels ("DOB", "GOVERNMENT OF ...") sit next to the values
//! they describe. Every heuristic here is tolerant of that noise and returns
//! absence rather than failing.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::domain::{ExtractedFields, Gender};

/// Label and country words that disqualify a line from being a name.
const NAME_EXCLUSIONS: [&str; 7] = ["INDIA", "GOV", "DOB", "MALE", "FEMALE", "AADHAAR", "VID"];

/// Day/month/year with separators drawn from slash, dash, dot, or whitespace.
static FULL_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2})[\s/.\-]+(\d{2})[\s/.\-]+(\d{4})").expect("static date regex")
});

static BARE_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(19\d{2}|20\d{2})\b").expect("static year regex"));

/// Twelve digits, optionally space-grouped 4-4-4.
static ID_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{4}\s?\d{4}\s?\d{4}\b").expect("static id regex"));

// Female first: "fem" would otherwise be shadowed by the "male" suffix shared
// by both words.
static FEMALE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(female|fem)\b").expect("static gender regex"));
static MALE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bmale\b").expect("static gender regex"));

static STUCK_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z])([A-Z])").expect("static case regex"));

/// Extract all typed fields from the recognized lines. Absence of any field
/// is a valid terminal state; this never fails.
pub(crate) fn extract_fields(lines: &[String]) -> ExtractedFields {
    let joined = lines.join(" ");

    ExtractedFields {
        name: extract_name(lines),
        dob: extract_dob(lines),
        gender: extract_gender(&joined),
        id_number: extract_id_number(&joined),
    }
}

/// Removes non-ASCII artifacts the recognizer tends to emit and trims.
fn clean_line(line: &str) -> String {
    line.chars()
        .filter(char::is_ascii)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Splits stuck camel-cased tokens: "RamjeetSingh" -> "Ramjeet Singh".
fn split_stuck_tokens(value: &str) -> String {
    STUCK_CASE.replace_all(value, "$1 $2").into_owned()
}

/// A name candidate is a line of letters only, at least two tokens after
/// de-sticking, free of label vocabulary. The longest candidate wins: longer
/// matches are more likely the full name than a truncated fragment.
fn extract_name(lines: &[String]) -> Option<String> {
    let mut best: Option<String> = None;

    for line in lines {
        let cleaned = clean_line(line);
        if cleaned.len() < 3 || cleaned.chars().any(|c| c.is_ascii_digit()) {
            continue;
        }

        let upper = cleaned.to_uppercase();
        if NAME_EXCLUSIONS.iter().any(|word| upper.contains(word)) {
            continue;
        }

        let candidate = split_stuck_tokens(&cleaned);
        if candidate.split_whitespace().count() < 2 {
            continue;
        }

        let longer = best
            .as_ref()
            .map_or(true, |current| candidate.len() > current.len());
        if longer {
            best = Some(candidate);
        }
    }

    best
}

/// Finds the date of birth among all detected dates.
///
/// Any valid full date beats every bare year, and among full dates the oldest
/// wins: other dates printed on the card (issue, print) are more recent than
/// the birth date. Bare years are only a fallback, again oldest first.
fn extract_dob(lines: &[String]) -> Option<String> {
    let mut full_dates: Vec<(NaiveDate, String)> = Vec::new();
    let mut years: Vec<u16> = Vec::new();

    for line in lines {
        for caps in FULL_DATE.captures_iter(line) {
            let day: u32 = caps[1].parse().unwrap_or(0);
            let month: u32 = caps[2].parse().unwrap_or(0);
            let year: i32 = caps[3].parse().unwrap_or(0);

            if !(1901..=2024).contains(&year) {
                continue;
            }
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                full_dates.push((date, format!("{day:02}/{month:02}/{year}")));
            }
        }

        for caps in BARE_YEAR.captures_iter(line) {
            if let Ok(year) = caps[1].parse::<u16>() {
                if (1901..=2024).contains(&year) {
                    years.push(year);
                }
            }
        }
    }

    if let Some((_, formatted)) = full_dates.into_iter().min_by_key(|(date, _)| *date) {
        return Some(formatted);
    }

    years.into_iter().min().map(|year| year.to_string())
}

fn extract_gender(joined: &str) -> Option<Gender> {
    let lowered = joined.to_lowercase();
    if FEMALE.is_match(&lowered) {
        Some(Gender::Female)
    } else if MALE.is_match(&lowered) {
        Some(Gender::Male)
    } else {
        None
    }
}

fn extract_id_number(joined: &str) -> Option<String> {
    ID_NUMBER
        .find(joined)
        .map(|found| found.as_str().replace(' ', ""))
}
