//! Trait definitions for the QnA domain abstractions.
//!
//! These traits enable dependency injection and testing with mocks.

use async_trait::async_trait;

use super::types::{QnaMatch, SearchPage};
use crate::domain::QueryType;

/// Error type for QnA pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum QnaError {
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Search count update error: {0}")]
    SearchCount(String),

    #[error("Answer retrieval error: {0}")]
    AnswerRetrieval(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("{0}")]
    Other(String),
}

impl From<sqlx::Error> for QnaError {
    fn from(e: sqlx::Error) -> Self {
        QnaError::Database(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QnaError>;

/// Trait for text embedding generation.
///
/// Abstracts the embedding provider so the pipeline can be tested
/// without network access.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts, index-aligned with the
    /// input. No partial result: any failure fails the whole batch.
    ///
    /// Default implementation calls `embed` sequentially.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Embedding dimensions for this embedder.
    #[allow(dead_code)]
    fn dimensions(&self) -> usize;
}

/// Database operations over the stored questions, answers, and
/// popularity counters.
#[async_trait]
pub trait QnaRepository: Send + Sync {
    /// Most similar stored question for the embedding, if the table
    /// has any rows.
    async fn best_match(
        &self,
        query_type: QueryType,
        embedding: &[f32],
    ) -> Result<Option<QnaMatch>>;

    /// Top `k` most similar stored questions, best first.
    async fn top_matches(
        &self,
        query_type: QueryType,
        embedding: &[f32],
        k: i64,
    ) -> Result<Vec<QnaMatch>>;

    /// Atomically bump the popularity counter for a question.
    ///
    /// The increment happens store-side so concurrent requests never
    /// lose updates.
    async fn increment_search_count(
        &self,
        query_type: QueryType,
        question: &str,
    ) -> Result<()>;

    /// Top questions by descending popularity counter.
    async fn popular_questions(
        &self,
        query_type: QueryType,
        limit: i64,
    ) -> Result<Vec<String>>;

    /// Conjunctive case-insensitive substring search with pagination.
    ///
    /// An empty keyword list short-circuits to an empty page without
    /// touching the store.
    async fn keyword_search(
        &self,
        query_type: QueryType,
        keywords: &[String],
        limit: i64,
        offset: i64,
    ) -> Result<SearchPage>;
}
