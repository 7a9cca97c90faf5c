//! Phrase-aware keyword extraction for the search endpoint.
//!
//! Normalizes a query (filler phrases stripped in a fixed order,
//! whitespace collapsed), then tokenizes while keeping known
//! multi-word phrases as single keywords.

use std::sync::LazyLock;

use regex::Regex;

/// Filler phrases stripped before tokenization, applied in this order.
static FILLER_PHRASES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\bcan you tell me\b",
        r"\bi want to know\b",
        r"\btell me about\b",
        r"\bwhat is\b",
        r"\bwhat are\b",
        r"\bhow do i\b",
        r"\bhow can i\b",
        r"\bshow me\b",
        r"\bplease\b",
    ]
    .iter()
    .map(|pattern| Regex::new(&format!("(?i){pattern}")).unwrap())
    .collect()
});

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Multi-word phrases kept as single keywords, checked in priority order.
const KNOWN_PHRASES: &[&str] = &[
    "basic sourcing",
    "payment terms",
    "request for quotation",
    "rfq",
];

/// Tokens that never contribute to matching.
const STOP_WORDS: &[&str] = &["some", "questions"];

/// Extract search keywords from a query.
///
/// Deterministic; an empty result is valid and means "no match"
/// downstream.
pub fn extract_keywords(query: &str) -> Vec<String> {
    let mut normalized = query.to_lowercase();
    for filler in FILLER_PHRASES.iter() {
        normalized = filler.replace_all(&normalized, " ").to_string();
    }
    let normalized = WHITESPACE.replace_all(&normalized, " ");
    let normalized = normalized.trim();

    let words: Vec<&str> = normalized.split(' ').filter(|w| !w.is_empty()).collect();

    let mut keywords: Vec<String> = Vec::new();
    let mut i = 0;
    while i < words.len() {
        let mut matched = false;
        for phrase in KNOWN_PHRASES {
            let phrase_words: Vec<&str> = phrase.split(' ').collect();
            if i + phrase_words.len() <= words.len()
                && words[i..i + phrase_words.len()] == phrase_words[..]
            {
                keywords.push((*phrase).to_string());
                i += phrase_words.len();
                matched = true;
                break;
            }
        }
        if !matched {
            keywords.push(words[i].to_string());
            i += 1;
        }
    }

    keywords
        .into_iter()
        .filter(|k| !k.is_empty() && !STOP_WORDS.contains(&k.as_str()))
        .collect()
}
