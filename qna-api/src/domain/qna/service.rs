//! Chat pipeline: sub-question decomposition, embedding, and the two
//! concurrent retrieval workers.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::sub_questions::extract_sub_questions;
use crate::domain::QueryType;

use super::traits::{Embedder, QnaError, QnaRepository, Result};
use super::types::{AmbiguousMatch, ChatResponse};

/// Fallback reply when no stored answer clears the threshold.
const NO_ANSWER_REPLY: &str =
    "Sorry, I couldn't find an answer to that. Please try rephrasing your question.";

/// Configuration for the chat pipeline.
#[derive(Debug, Clone)]
pub struct QnaConfig {
    /// Minimum similarity for a stored answer to be accepted.
    pub similarity_threshold: f64,
    /// Candidate questions returned for low-confidence sub-questions.
    pub ambiguous_candidates: i64,
    /// Upper bound on each retrieval worker.
    pub worker_timeout: Duration,
}

impl Default for QnaConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.75,
            ambiguous_candidates: 3,
            worker_timeout: Duration::from_secs(30),
        }
    }
}

/// Orchestrates the dual concurrent retrieval pipeline.
///
/// # Type Parameters
///
/// * `E` - Embedder implementation for the sub-question embeddings
/// * `R` - QnaRepository implementation for store access
pub struct QnaService<E, R>
where
    E: Embedder,
    R: QnaRepository + 'static,
{
    embedder: E,
    repository: Arc<R>,
    config: QnaConfig,
}

impl<E, R> QnaService<E, R>
where
    E: Embedder,
    R: QnaRepository + 'static,
{
    pub fn new(embedder: E, repository: Arc<R>, config: QnaConfig) -> Self {
        Self {
            embedder,
            repository,
            config,
        }
    }

    /// Run the full chat pipeline for a query.
    ///
    /// Splits the query into sub-questions, embeds them (one vector per
    /// sub-question, index-aligned), then spawns the search-count
    /// updater and the answer retriever as two independent tasks over
    /// the same inputs and waits for both. Neither task is cancelled
    /// when the other fails; the search-count worker's error is checked
    /// first, so it wins when both fail, and its success value is
    /// discarded. On joint success the response is exactly the answer
    /// retriever's payload.
    pub async fn ask(&self, query: &str, query_type: QueryType) -> Result<ChatResponse> {
        let sub_questions = extract_sub_questions(query);
        tracing::debug!(count = sub_questions.len(), "extracted sub-questions");

        let texts: Vec<&str> = sub_questions.iter().map(String::as_str).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        debug_assert_eq!(embeddings.len(), sub_questions.len());

        let count_task = tokio::spawn(with_timeout(
            self.config.worker_timeout,
            update_search_counts(
                self.repository.clone(),
                sub_questions.clone(),
                embeddings.clone(),
                query_type,
            ),
        ));
        let answer_task = tokio::spawn(with_timeout(
            self.config.worker_timeout,
            retrieve_answers(
                self.repository.clone(),
                sub_questions,
                embeddings,
                query_type,
                self.config.clone(),
            ),
        ));

        let (count_result, answer_result) = tokio::join!(count_task, answer_task);
        let count_result = count_result
            .map_err(|e| QnaError::Other(format!("search count worker panicked: {e}")))?;
        let answer_result = answer_result
            .map_err(|e| QnaError::Other(format!("answer worker panicked: {e}")))?;

        count_result.map_err(|e| QnaError::SearchCount(e.to_string()))?;
        answer_result.map_err(|e| QnaError::AnswerRetrieval(e.to_string()))
    }
}

/// Bound a worker; expiry counts as a worker error.
async fn with_timeout<T, F>(limit: Duration, worker: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, worker).await {
        Ok(result) => result,
        Err(_) => Err(QnaError::Other(format!(
            "worker timed out after {}s",
            limit.as_secs()
        ))),
    }
}

/// Search-count updater worker.
///
/// For each sub-question/embedding pair, bumps the popularity counter
/// of the closest stored question. Success carries no payload.
async fn update_search_counts<R: QnaRepository>(
    repository: Arc<R>,
    sub_questions: Vec<String>,
    embeddings: Vec<Vec<f32>>,
    query_type: QueryType,
) -> Result<()> {
    for (sub_question, embedding) in sub_questions.iter().zip(embeddings.iter()) {
        if let Some(found) = repository.best_match(query_type, embedding).await? {
            repository
                .increment_search_count(query_type, &found.question)
                .await?;
            tracing::debug!(sub_question = %sub_question, matched = %found.question, "bumped search count");
        }
    }
    Ok(())
}

/// Answer retriever worker.
///
/// Resolves each sub-question to its best stored answer; sub-questions
/// below the similarity threshold are collected as ambiguous entries
/// with their candidate questions.
async fn retrieve_answers<R: QnaRepository>(
    repository: Arc<R>,
    sub_questions: Vec<String>,
    embeddings: Vec<Vec<f32>>,
    query_type: QueryType,
    config: QnaConfig,
) -> Result<ChatResponse> {
    let mut answers: Vec<String> = Vec::new();
    let mut ambiguous_data = Vec::new();

    for (sub_question, embedding) in sub_questions.iter().zip(embeddings.iter()) {
        let matches = repository
            .top_matches(query_type, embedding, config.ambiguous_candidates)
            .await?;

        match matches.first() {
            Some(best) if best.similarity >= config.similarity_threshold => {
                answers.push(best.answer.clone());
            }
            _ => ambiguous_data.push(AmbiguousMatch {
                sub_question: sub_question.clone(),
                candidates: matches.into_iter().map(|m| m.question).collect(),
            }),
        }
    }

    let answers = if answers.is_empty() {
        NO_ANSWER_REPLY.to_string()
    } else {
        answers.join("\n\n")
    };

    Ok(ChatResponse {
        answers,
        ambiguous_data,
    })
}
