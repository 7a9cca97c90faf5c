//! Gemini embedder implementation using the genai crate.

use async_trait::async_trait;
use genai::embed::EmbedOptions;

use crate::domain::qna::traits::{Embedder, QnaError, Result};

pub const GEMINI_MODEL: &str = "gemini-embedding-001";
pub const GEMINI_DIMENSIONS: usize = 1536;

/// Embedder backed by Google's Gemini API via the `genai` crate.
///
/// The genai client reads `GEMINI_API_KEY` from the environment, which
/// startup populates from the configured key.
#[derive(Clone)]
pub struct GeminiEmbedder {
    client: genai::Client,
    model: String,
    options: EmbedOptions,
}

impl GeminiEmbedder {
    pub fn new() -> Result<Self> {
        Self::with_model(GEMINI_MODEL)
    }

    pub fn with_model(model: impl Into<String>) -> Result<Self> {
        let client = genai::Client::default();
        let options = EmbedOptions::new().with_embedding_type("RETRIEVAL_QUERY");

        Ok(Self {
            client,
            model: model.into(),
            options,
        })
    }
}

#[async_trait]
impl Embedder for GeminiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.is_empty() {
            return Ok(vec![0.0; GEMINI_DIMENSIONS]);
        }

        let response = self
            .client
            .embed(&self.model, text, Some(&self.options))
            .await
            .map_err(|e| QnaError::Embedding(e.to_string()))?;

        let embedding = response
            .first_embedding()
            .ok_or_else(|| QnaError::Embedding("No embedding in response".into()))?;

        Ok(embedding.vector().to_vec())
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let inputs: Vec<String> = texts.iter().map(|t| t.to_string()).collect();
        let response = self
            .client
            .embed_batch(&self.model, inputs, Some(&self.options))
            .await
            .map_err(|e| QnaError::Embedding(e.to_string()))?;

        // Index alignment is a contract: a short response is an error,
        // never a partial result.
        if response.embeddings.len() != texts.len() {
            return Err(QnaError::Embedding(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                response.embeddings.len()
            )));
        }

        Ok(response
            .embeddings
            .iter()
            .map(|e| e.vector().to_vec())
            .collect())
    }

    fn dimensions(&self) -> usize {
        GEMINI_DIMENSIONS
    }
}
