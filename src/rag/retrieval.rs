//! Similarity-ranked top-k retrieval over the vector store.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::error::RagError;
use super::store::{ChunkMetadata, VectorStore};
use crate::embedding::EmbeddingProvider;

/// Default minimum cosine score a retrieved chunk must reach.
pub const DEFAULT_SCORE_THRESHOLD: f32 = 0.25;

/// A retrieved chunk: a copy of the stored text and metadata plus its
/// cosine score against the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub score: f32,
    pub text: String,
    pub metadata: ChunkMetadata,
}

/// Retrieves the `k` most similar chunks for a free-text query.
///
/// The query is embedded via `embedder`, scored against every stored
/// vector, and the `k` best candidates are selected with ties broken
/// toward the earlier-inserted index so output is deterministic. The
/// score threshold is applied after selection, on the chosen candidates
/// only, so fewer than `k` results (including none) is a valid outcome.
///
/// An empty store short-circuits to an empty result without calling the
/// embedding provider.
pub async fn retrieve_top_k(
    query: &str,
    store: &VectorStore,
    embedder: &dyn EmbeddingProvider,
    k: usize,
    threshold: f32,
) -> Result<Vec<ScoredChunk>, RagError> {
    if store.is_empty() {
        return Ok(Vec::new());
    }

    let query_vector = embedder.encode(query).await?;
    let scores = store.similarity_scores(&query_vector)?;

    let k = k.min(store.len());
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.cmp(&b))
    });
    order.truncate(k);

    // Threshold is checked on the already-selected candidates only: with
    // more than k chunks above the cutoff, a weak candidate inside the
    // top k still displaces a stronger one outside it.
    let results = order
        .into_iter()
        .filter(|&idx| scores[idx] >= threshold)
        .map(|idx| {
            let chunk = &store.chunks()[idx];
            ScoredChunk {
                score: scores[idx],
                text: chunk.text.clone(),
                metadata: chunk.metadata.clone(),
            }
        })
        .collect();

    Ok(results)
}
