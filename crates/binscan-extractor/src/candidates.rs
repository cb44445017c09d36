//! Digit-run candidate extraction

use binscan_domain::{BIN_MAX_LEN, BIN_MIN_LEN};
use once_cell::sync::Lazy;
use regex::Regex;

// ASCII only; `\d` would also match other Unicode digits.
static DIGIT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+").expect("digit run pattern is valid"));

/// Every maximal run of 6-8 ASCII digits in `text`, in order of appearance
///
/// Runs shorter than 6 or longer than 8 digits are skipped, not truncated.
/// Duplicates are kept.
pub fn extract_candidates(text: &str) -> Vec<String> {
    DIGIT_RUN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|run| (BIN_MIN_LEN..=BIN_MAX_LEN).contains(&run.len()))
        .map(str::to_string)
        .collect()
}

/// Candidates from unstructured text
///
/// Used when a source cannot be read as a table. Leading zeros are stripped and
/// the length bound is applied again, so a run such as `00012345` is dropped.
pub fn extract_from_raw_text(text: &str) -> Vec<String> {
    extract_candidates(text)
        .into_iter()
        .map(|candidate| strip_leading_zeros(&candidate))
        .filter(|candidate| (BIN_MIN_LEN..=BIN_MAX_LEN).contains(&candidate.len()))
        .collect()
}

fn strip_leading_zeros(candidate: &str) -> String {
    let stripped = candidate.trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}
