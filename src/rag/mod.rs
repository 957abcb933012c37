//! Retrieval core: vector store, similarity-ranked retrieval, persistence.

mod error;
mod persistence;
mod retrieval;
mod store;

pub use error::RagError;
pub use persistence::{delete_snapshot, load_snapshot, save_snapshot};
pub use retrieval::{retrieve_top_k, ScoredChunk, DEFAULT_SCORE_THRESHOLD};
pub use store::{Chunk, ChunkMetadata, VectorStore};
