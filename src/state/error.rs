use thiserror::Error;

use crate::rag::RagError;

#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("Failed to restore knowledge base: {0}")]
    Knowledge(#[source] RagError),
}
