//! In-memory repository used in service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::qna::traits::{QnaError, QnaRepository, Result};
use crate::domain::qna::types::{QnaMatch, SearchPage};
use crate::domain::QueryType;

struct MockRow {
    question: String,
    answer: String,
    embedding: Vec<f32>,
}

/// Mock repository with in-memory rows, cosine similarity, and
/// injectable failures per operation.
#[derive(Default)]
pub struct MockQnaRepository {
    rows: Vec<MockRow>,
    counts: Mutex<HashMap<(QueryType, String), i64>>,
    search_queries: AtomicUsize,
    fail_best_match: Option<String>,
    fail_top_matches: Option<String>,
    fail_increment: Option<String>,
}

impl MockQnaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row(
        mut self,
        question: impl Into<String>,
        answer: impl Into<String>,
        embedding: Vec<f32>,
    ) -> Self {
        self.rows.push(MockRow {
            question: question.into(),
            answer: answer.into(),
            embedding,
        });
        self
    }

    pub fn failing_best_match(mut self, message: impl Into<String>) -> Self {
        self.fail_best_match = Some(message.into());
        self
    }

    pub fn failing_top_matches(mut self, message: impl Into<String>) -> Self {
        self.fail_top_matches = Some(message.into());
        self
    }

    pub fn failing_increment(mut self, message: impl Into<String>) -> Self {
        self.fail_increment = Some(message.into());
        self
    }

    /// Popularity counter for a question, summed across categories.
    pub fn count_for(&self, question: &str) -> i64 {
        self.counts
            .lock()
            .unwrap()
            .iter()
            .filter(|((_, q), _)| q == question)
            .map(|(_, count)| *count)
            .sum()
    }

    /// Number of keyword searches that actually hit the "store".
    pub fn search_query_count(&self) -> usize {
        self.search_queries.load(Ordering::SeqCst)
    }

    fn ranked_matches(&self, embedding: &[f32]) -> Vec<QnaMatch> {
        let mut matches: Vec<QnaMatch> = self
            .rows
            .iter()
            .map(|row| QnaMatch {
                question: row.question.clone(),
                answer: row.answer.clone(),
                similarity: cosine(&row.embedding, embedding),
            })
            .collect();
        matches.sort_by(|a, b| b.similarity.partial_cmp(&a.similarity).unwrap());
        matches
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f64 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)) as f64
}

#[async_trait]
impl QnaRepository for MockQnaRepository {
    async fn best_match(
        &self,
        _query_type: QueryType,
        embedding: &[f32],
    ) -> Result<Option<QnaMatch>> {
        if let Some(message) = &self.fail_best_match {
            return Err(QnaError::Database(message.clone()));
        }
        Ok(self.ranked_matches(embedding).into_iter().next())
    }

    async fn top_matches(
        &self,
        _query_type: QueryType,
        embedding: &[f32],
        k: i64,
    ) -> Result<Vec<QnaMatch>> {
        if let Some(message) = &self.fail_top_matches {
            return Err(QnaError::Database(message.clone()));
        }
        let mut matches = self.ranked_matches(embedding);
        matches.truncate(k as usize);
        Ok(matches)
    }

    async fn increment_search_count(
        &self,
        query_type: QueryType,
        question: &str,
    ) -> Result<()> {
        if let Some(message) = &self.fail_increment {
            return Err(QnaError::Database(message.clone()));
        }
        *self
            .counts
            .lock()
            .unwrap()
            .entry((query_type, question.to_string()))
            .or_insert(0) += 1;
        Ok(())
    }

    async fn popular_questions(
        &self,
        query_type: QueryType,
        limit: i64,
    ) -> Result<Vec<String>> {
        let counts = self.counts.lock().unwrap();
        let mut entries: Vec<(&String, i64)> = counts
            .iter()
            .filter(|((qt, _), _)| *qt == query_type)
            .map(|((_, q), count)| (q, *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(entries
            .into_iter()
            .take(limit as usize)
            .map(|(q, _)| q.clone())
            .collect())
    }

    async fn keyword_search(
        &self,
        _query_type: QueryType,
        keywords: &[String],
        limit: i64,
        offset: i64,
    ) -> Result<SearchPage> {
        if keywords.is_empty() {
            return Ok(SearchPage::empty());
        }
        self.search_queries.fetch_add(1, Ordering::SeqCst);

        let matching: Vec<String> = self
            .rows
            .iter()
            .filter(|row| {
                let question = row.question.to_lowercase();
                keywords.iter().all(|kw| question.contains(&kw.to_lowercase()))
            })
            .map(|row| row.question.clone())
            .collect();

        let total = matching.len() as i64;
        let page: Vec<String> = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();

        Ok(SearchPage {
            matching_questions: page,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ranks_by_cosine_similarity() {
        let repo = MockQnaRepository::new()
            .with_row("close", "a", vec![1.0, 0.0])
            .with_row("far", "b", vec![0.0, 1.0]);

        let best = repo
            .best_match(QueryType::Buyer, &[1.0, 0.1])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(best.question, "close");
    }

    #[tokio::test]
    async fn empty_keywords_issue_no_store_query() {
        let repo = MockQnaRepository::new().with_row("q", "a", vec![1.0]);

        let page = repo
            .keyword_search(QueryType::Buyer, &[], 20, 0)
            .await
            .unwrap();

        assert_eq!(page, SearchPage::empty());
        assert_eq!(repo.search_query_count(), 0);
    }

    #[tokio::test]
    async fn keyword_search_is_conjunctive_and_paginated() {
        let repo = MockQnaRepository::new()
            .with_row("How do payment terms work?", "a", vec![1.0])
            .with_row("What are payment terms for RFQ?", "b", vec![1.0])
            .with_row("How do I ship goods?", "c", vec![1.0]);

        let keywords = vec!["payment terms".to_string()];
        let page = repo
            .keyword_search(QueryType::Buyer, &keywords, 1, 0)
            .await
            .unwrap();

        assert_eq!(page.matching_questions.len(), 1);
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn popular_questions_order_by_count() {
        let repo = MockQnaRepository::new();
        repo.increment_search_count(QueryType::Buyer, "hot")
            .await
            .unwrap();
        repo.increment_search_count(QueryType::Buyer, "hot")
            .await
            .unwrap();
        repo.increment_search_count(QueryType::Buyer, "cold")
            .await
            .unwrap();

        let questions = repo
            .popular_questions(QueryType::Buyer, 10)
            .await
            .unwrap();
        assert_eq!(questions, vec!["hot", "cold"]);
    }
}
