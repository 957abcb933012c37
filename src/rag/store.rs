//! Append-only in-memory vector store.
//!
//! Chunks and their embedding vectors live in two position-aligned
//! sequences. The store enforces the alignment and dimensionality
//! invariants on every mutation; search is a brute-force cosine scan.

use serde::{Deserialize, Serialize};

use super::error::RagError;

/// Provenance attached to every chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Source identifier (URL or filename).
    pub source: String,
    /// Character offset within the source document where the chunk began.
    pub start_index: usize,
}

/// A bounded slice of source text plus its provenance. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub metadata: ChunkMetadata,
}

/// In-memory pairing of chunks with their embedding vectors.
///
/// Invariants held after every completed mutation:
/// - `chunks.len() == vectors.len()`
/// - `vectors[i]` is the embedding of `chunks[i].text`
/// - every vector has the same length, recorded in `dimension`
///
/// The store grows monotonically via [`VectorStore::append_batch`]; there is
/// no per-entry update or delete. [`VectorStore::reset`] discards the whole
/// state.
#[derive(Debug, Default)]
pub struct VectorStore {
    chunks: Vec<Chunk>,
    vectors: Vec<Vec<f32>>,
    dimension: Option<usize>,
}

impl VectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from restored state, validating the alignment and
    /// dimensionality invariants. Used by the persistence layer.
    pub fn from_parts(chunks: Vec<Chunk>, vectors: Vec<Vec<f32>>) -> Result<Self, RagError> {
        let mut store = Self::new();
        store.append_batch(chunks, vectors)?;
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Established embedding dimensionality, `None` while the store is empty.
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn vectors(&self) -> &[Vec<f32>] {
        &self.vectors
    }

    /// Appends chunks and their vectors to the end of the store, preserving
    /// insertion order.
    ///
    /// All validation happens before any mutation: a failed call leaves the
    /// store exactly as it was. The first batch into an empty store
    /// establishes the dimensionality; later batches must match it.
    pub fn append_batch(
        &mut self,
        chunks: Vec<Chunk>,
        vectors: Vec<Vec<f32>>,
    ) -> Result<(), RagError> {
        if chunks.len() != vectors.len() {
            return Err(RagError::LengthMismatch {
                chunks: chunks.len(),
                vectors: vectors.len(),
            });
        }

        if let Some(first) = vectors.first() {
            let expected = self.dimension.unwrap_or(first.len());
            for vector in &vectors {
                if vector.len() != expected {
                    return Err(RagError::DimensionMismatch {
                        expected,
                        actual: vector.len(),
                    });
                }
            }
            self.dimension = Some(expected);
        }

        self.chunks.extend(chunks);
        self.vectors.extend(vectors);
        Ok(())
    }

    /// Cosine similarity of `query` against every stored vector, aligned by
    /// index with [`VectorStore::chunks`].
    ///
    /// An empty store yields an empty sequence, not an error.
    pub fn similarity_scores(&self, query: &[f32]) -> Result<Vec<f32>, RagError> {
        if self.is_empty() {
            return Ok(Vec::new());
        }

        let expected = self.dimension.unwrap_or_default();
        if query.len() != expected {
            return Err(RagError::DimensionMismatch {
                expected,
                actual: query.len(),
            });
        }

        Ok(self
            .vectors
            .iter()
            .map(|vector| cosine_similarity(query, vector))
            .collect())
    }

    /// Discards all chunks and vectors; the next batch re-establishes the
    /// dimensionality.
    pub fn reset(&mut self) {
        self.chunks.clear();
        self.vectors.clear();
        self.dimension = None;
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    let denom = norm_a * norm_b;

    if denom <= f32::EPSILON {
        0.0
    } else {
        dot / denom
    }
}
