//! Core types for the QnA domain.

use serde::Serialize;

/// A stored question/answer row scored against a query embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct QnaMatch {
    pub question: String,
    pub answer: String,
    /// Cosine similarity; higher is closer.
    pub similarity: f64,
}

/// Payload returned by the chat endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatResponse {
    pub answers: String,
    pub ambiguous_data: Vec<AmbiguousMatch>,
}

impl ChatResponse {
    /// A canned reply with no ambiguous matches.
    pub fn canned(reply: impl Into<String>) -> Self {
        Self {
            answers: reply.into(),
            ambiguous_data: Vec::new(),
        }
    }
}

/// A sub-question with no confident answer, carrying the closest
/// stored questions as suggestions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmbiguousMatch {
    pub sub_question: String,
    pub candidates: Vec<String>,
}

/// One page of keyword-search results plus the total match count.
///
/// The total comes from an independent count query over the same
/// predicate, so it can drift from the page under concurrent writes.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub matching_questions: Vec<String>,
    pub total: i64,
}

impl SearchPage {
    pub fn empty() -> Self {
        Self {
            matching_questions: Vec::new(),
            total: 0,
        }
    }
}
