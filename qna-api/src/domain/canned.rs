//! Canned replies for greetings and thanks.
//!
//! Checked against the lower-cased trimmed query before the retrieval
//! pipeline runs; first matching pattern wins.

use std::sync::LazyLock;

use regex::Regex;

pub const GREETING_REPLY: &str = "Welcome! How can I assist you today?";
pub const GRATITUDE_REPLY: &str =
    "Happy to help! Please let me know if you need further assistance.";

static CANNED_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (
            Regex::new(r"^(hi|hello|hey|howdy)\b").unwrap(),
            GREETING_REPLY,
        ),
        (
            Regex::new(r"^good\s+(morning|afternoon|evening)\b").unwrap(),
            GREETING_REPLY,
        ),
        (
            Regex::new(r"\bthank(s|\s+you)?\b").unwrap(),
            GRATITUDE_REPLY,
        ),
        (Regex::new(r"\bappreciate\b").unwrap(), GRATITUDE_REPLY),
    ]
});

/// First matching canned reply for the query, if any.
pub fn canned_reply(query: &str) -> Option<&'static str> {
    let normalized = query.trim().to_lowercase();
    CANNED_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(&normalized))
        .map(|(_, reply)| *reply)
}
