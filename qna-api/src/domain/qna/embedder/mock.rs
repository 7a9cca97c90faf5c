//! Mock embedder implementation for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::qna::traits::{Embedder, QnaError, Result};

/// Mock embedder returning a configurable vector, with an optional
/// injected failure and a call counter.
#[derive(Clone)]
pub struct MockEmbedder {
    response: Vec<f32>,
    failure: Option<String>,
    call_count: Arc<AtomicUsize>,
}

impl MockEmbedder {
    /// A mock that always returns the same vector.
    pub fn returning(vector: Vec<f32>) -> Self {
        Self {
            response: vector,
            failure: None,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A mock whose every call fails with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Vec::new(),
            failure: Some(message.into()),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of texts embedded so far (batch calls count per item).
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        if let Some(message) = &self.failure {
            return Err(QnaError::Embedding(message.clone()));
        }
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }

    fn dimensions(&self) -> usize {
        self.response.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_fixed_vector_and_counts_calls() {
        let embedder = MockEmbedder::returning(vec![1.0, 2.0]);

        assert_eq!(embedder.embed("a").await.unwrap(), vec![1.0, 2.0]);
        assert_eq!(embedder.embed("b").await.unwrap(), vec![1.0, 2.0]);
        assert_eq!(embedder.call_count(), 2);
    }

    #[tokio::test]
    async fn batch_is_index_aligned() {
        let embedder = MockEmbedder::returning(vec![0.5]);

        let batch = embedder.embed_batch(&["a", "b", "c"]).await.unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(embedder.call_count(), 3);
    }

    #[tokio::test]
    async fn failing_mock_fails_the_batch() {
        let embedder = MockEmbedder::failing("down");

        let err = embedder.embed_batch(&["a", "b"]).await.unwrap_err();
        assert!(err.to_string().contains("down"));
    }
}
