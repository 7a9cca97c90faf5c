use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    config::Settings,
    domain::qna::{
        embedder::GeminiEmbedder, repository::PgQnaRepository, QnaConfig, QnaService,
    },
};

/// Shared per-process state handed to every request handler.
///
/// Built once at startup; everything inside is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    qna_repo: Arc<PgQnaRepository>,
    qna_service: Arc<QnaService<GeminiEmbedder, PgQnaRepository>>,
}

impl AppState {
    pub fn new(db_pool: PgPool, config: &Settings) -> Self {
        let qna_repo = Arc::new(PgQnaRepository::new(db_pool));
        let embedder = if config.embedding.model.is_empty() {
            GeminiEmbedder::new()
        } else {
            GeminiEmbedder::with_model(config.embedding.model.clone())
        }
        .expect("Failed to create Gemini embedder");
        let qna_service = Arc::new(QnaService::new(
            embedder,
            qna_repo.clone(),
            QnaConfig::default(),
        ));

        Self {
            qna_repo,
            qna_service,
        }
    }

    pub fn qna_repo(&self) -> &PgQnaRepository {
        &self.qna_repo
    }

    pub fn qna_service(&self) -> &QnaService<GeminiEmbedder, PgQnaRepository> {
        &self.qna_service
    }
}
