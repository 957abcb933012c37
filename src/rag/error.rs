use std::path::PathBuf;

use thiserror::Error;

use crate::embedding::EmbeddingError;

/// Error taxonomy for the retrieval core.
///
/// `NotFound` and `CorruptState` are recoverable load outcomes (the caller
/// starts with an empty store); everything else is fatal to the operation
/// that raised it and leaves the store unmodified.
#[derive(Debug, Error)]
pub enum RagError {
    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("chunk/vector count mismatch: {chunks} chunks, {vectors} vectors")]
    LengthMismatch { chunks: usize, vectors: usize },

    #[error("no persisted knowledge base at {0:?}")]
    NotFound(PathBuf),

    #[error("persisted knowledge base is corrupt: {0}")]
    CorruptState(String),

    #[error("embedding provider failure: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("knowledge base io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("knowledge base serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
