// src/utils/text.rs

use std::sync::LazyLock;

use regex::Regex;

use crate::config::KEYWORD_MIN_LEN;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Lowercases and trims an answer for comparison.
pub fn normalize_answer(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Lowercases a subject name and collapses whitespace runs into `_`,
/// so "Operating Systems" and "operating_systems" compare equal.
pub fn normalize_subject(text: &str) -> String {
    WHITESPACE.replace_all(&text.to_lowercase(), "_").into_owned()
}

/// True if either string contains the other, ignoring case.
pub fn loose_match(candidate: &str, target: &str) -> bool {
    let candidate = candidate.to_lowercase();
    let target = target.to_lowercase();
    candidate.contains(&target) || target.contains(&candidate)
}

/// Subject variant of [`loose_match`] that also normalizes whitespace.
pub fn subject_match(candidate: &str, target: &str) -> bool {
    let candidate = normalize_subject(candidate);
    let target = normalize_subject(target);
    candidate.contains(&target) || target.contains(&candidate)
}

/// Whitespace-delimited tokens longer than [`KEYWORD_MIN_LEN`] characters.
pub fn keywords(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .filter(|word| word.chars().count() > KEYWORD_MIN_LEN)
        .collect()
}
