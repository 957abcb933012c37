use std::sync::Arc;

use tokio::sync::RwLock;

use crate::core::config::{AppPaths, Settings};
use crate::embedding::{EmbeddingProvider, HttpEmbeddingProvider};
use crate::llm::LlmClient;
use crate::rag::{self, Chunk, RagError, VectorStore};

pub mod error;

use error::InitializationError;

/// Global application state shared across all routes.
///
/// The knowledge base lives behind a single-writer/multiple-readers lock:
/// ingestion holds the write guard for the append and the snapshot save,
/// so a reader can never observe mid-growth state and the persisted file
/// always matches a consistent snapshot.
#[derive(Clone)]
pub struct AppState {
    pub paths: Arc<AppPaths>,
    pub settings: Settings,
    pub embedder: Arc<dyn EmbeddingProvider>,
    pub llm: LlmClient,
    pub knowledge: Arc<RwLock<VectorStore>>,
}

impl AppState {
    /// Initializes the application state.
    ///
    /// Restores the knowledge base from the persisted snapshot when one
    /// exists; a missing snapshot starts empty silently, a corrupt one
    /// starts empty with a warning.
    pub async fn initialize() -> Result<Arc<Self>, InitializationError> {
        let paths = Arc::new(AppPaths::new());
        let settings = Settings::load(&paths);

        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(HttpEmbeddingProvider::new(
            settings.embedding.base_url.clone(),
            settings.embedding.model.clone(),
            settings.embedding.api_key.clone(),
        ));

        let llm = LlmClient::new(
            settings.llm.base_url.clone(),
            settings.llm.model.clone(),
            settings.llm.api_key.clone(),
        );

        let store = match rag::load_snapshot(&paths.store_path).await {
            Ok(store) => {
                tracing::info!(
                    "Restored {} chunks from {:?}",
                    store.len(),
                    paths.store_path
                );
                store
            }
            Err(RagError::NotFound(_)) => {
                tracing::info!("No persisted knowledge base; starting empty");
                VectorStore::new()
            }
            Err(RagError::CorruptState(reason)) => {
                tracing::warn!(
                    "Persisted knowledge base at {:?} is unreadable ({}); starting empty",
                    paths.store_path,
                    reason
                );
                VectorStore::new()
            }
            Err(err) => return Err(InitializationError::Knowledge(err)),
        };

        Ok(Arc::new(AppState {
            paths,
            settings,
            embedder,
            llm,
            knowledge: Arc::new(RwLock::new(store)),
        }))
    }

    /// Embeds `chunks` and appends them to the knowledge base, persisting
    /// the new state before releasing the write guard.
    ///
    /// The embedding call runs before the lock is taken; a provider
    /// failure therefore never leaves the store partially mutated.
    pub async fn ingest_chunks(&self, chunks: Vec<Chunk>) -> Result<usize, RagError> {
        if chunks.is_empty() {
            return Ok(0);
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self.embedder.encode_batch(&texts).await?;
        let added = chunks.len();

        let mut store = self.knowledge.write().await;
        store.append_batch(chunks, vectors)?;
        rag::save_snapshot(&store, &self.paths.store_path).await?;

        tracing::info!("Ingested {} chunks (total: {})", added, store.len());
        Ok(added)
    }
}
