//! Splits a compound query into independent sub-questions.

use std::sync::LazyLock;

use regex::Regex;

static BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[?;]|\b(?:and also|and|also)\b").unwrap());

/// Split a raw query on conjunction and punctuation boundaries.
///
/// Deterministic and side-effect-free; always returns at least one
/// entry, falling back to the trimmed input when no boundary is found
/// or every fragment is empty.
pub fn extract_sub_questions(query: &str) -> Vec<String> {
    let parts: Vec<String> = BOUNDARY
        .split(query)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();

    if parts.is_empty() {
        vec![query.trim().to_string()]
    } else {
        parts
    }
}
