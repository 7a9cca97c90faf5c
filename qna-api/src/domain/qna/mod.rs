//! QnA retrieval core.
//!
//! Decomposes a query into sub-questions, embeds them, and runs two
//! independent retrieval pipelines concurrently: one bumps popularity
//! counters for the closest stored questions, the other assembles the
//! answer payload. Either failure fails the request.
//!
//! Built around trait abstractions for testability:
//!
//! - `Embedder`: text embedding generation (Gemini, mocks)
//! - `QnaRepository`: database operations (PostgreSQL, mocks)

mod service;
mod traits;
mod types;

pub mod embedder;
pub mod repository;

pub use service::{QnaConfig, QnaService};
pub use traits::{QnaError, QnaRepository};
pub use types::ChatResponse;
