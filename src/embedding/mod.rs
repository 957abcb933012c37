//! Embedding provider abstraction.
//!
//! The retrieval core only needs a fixed-dimension vector per text; the
//! concrete provider is an OpenAI-compatible HTTP endpoint (`http`
//! module). Tests substitute deterministic stubs.

mod http;

use async_trait::async_trait;
use thiserror::Error;

pub use http::HttpEmbeddingProvider;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("embedding endpoint error: {0}")]
    Endpoint(String),
}

/// Maps text to fixed-dimension vectors.
///
/// All vectors returned by one provider instance share the same
/// dimensionality for its lifetime. Failures are fatal to the enclosing
/// ingestion or query operation; the provider never retries internally.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}
