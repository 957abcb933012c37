//! Single-file persistence for the vector store.
//!
//! The full `(chunks, vectors)` state is written as one JSON document.
//! Writes go to a sibling temp file first and are renamed over the
//! target, so a crash mid-write leaves the previous valid snapshot in
//! place and a reader can never observe mismatched chunk/vector
//! sequences.

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::RagError;
use super::store::{Chunk, VectorStore};

#[derive(Serialize)]
struct SnapshotRef<'a> {
    chunks: &'a [Chunk],
    vectors: &'a [Vec<f32>],
}

#[derive(Deserialize)]
struct Snapshot {
    chunks: Vec<Chunk>,
    vectors: Vec<Vec<f32>>,
}

/// Serializes the whole store to `path`, replacing any prior content
/// atomically.
pub async fn save_snapshot(store: &VectorStore, path: &Path) -> Result<(), RagError> {
    let snapshot = SnapshotRef {
        chunks: store.chunks(),
        vectors: store.vectors(),
    };
    let bytes = serde_json::to_vec(&snapshot)?;

    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

/// Restores a store from `path`.
///
/// A missing file is signaled as [`RagError::NotFound`]; unreadable or
/// malformed content (including misaligned or mixed-dimension state) as
/// [`RagError::CorruptState`]. Both are recoverable: the caller proceeds
/// with an empty store.
pub async fn load_snapshot(path: &Path) -> Result<VectorStore, RagError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(RagError::NotFound(path.to_path_buf()));
        }
        Err(err) => return Err(RagError::CorruptState(err.to_string())),
    };

    let snapshot: Snapshot =
        serde_json::from_slice(&bytes).map_err(|err| RagError::CorruptState(err.to_string()))?;

    VectorStore::from_parts(snapshot.chunks, snapshot.vectors)
        .map_err(|err| RagError::CorruptState(err.to_string()))
}

/// Removes the persisted snapshot, if any. Used by the reset operation.
pub async fn delete_snapshot(path: &Path) -> Result<(), RagError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(RagError::Io(err)),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::rag::store::ChunkMetadata;

    fn temp_store_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("cognia-store-{}-{}.json", tag, uuid::Uuid::new_v4()))
    }

    fn make_chunk(text: &str, source: &str, start_index: usize) -> Chunk {
        Chunk {
            text: text.to_string(),
            metadata: ChunkMetadata {
                source: source.to_string(),
                start_index,
            },
        }
    }

    fn populated_store() -> VectorStore {
        let mut store = VectorStore::new();
        store
            .append_batch(
                vec![
                    make_chunk("alpha", "https://example.com/a", 0),
                    make_chunk("beta", "report.pdf", 500),
                ],
                vec![vec![0.25, -0.5, 0.125], vec![0.1, 0.2, 0.3]],
            )
            .unwrap();
        store
    }

    #[tokio::test]
    async fn round_trip_preserves_chunks_and_vectors() {
        let path = temp_store_path("roundtrip");
        let store = populated_store();

        save_snapshot(&store, &path).await.unwrap();
        let restored = load_snapshot(&path).await.unwrap();

        assert_eq!(restored.chunks(), store.chunks());
        assert_eq!(restored.dimension(), store.dimension());
        for (restored_vec, original_vec) in restored.vectors().iter().zip(store.vectors()) {
            for (r, o) in restored_vec.iter().zip(original_vec) {
                assert!((r - o).abs() < 1e-6);
            }
        }

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn start_index_survives_as_integer() {
        let path = temp_store_path("offsets");
        save_snapshot(&populated_store(), &path).await.unwrap();

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let start_index = &value["chunks"][1]["metadata"]["start_index"];
        assert!(start_index.is_u64());
        assert_eq!(start_index.as_u64(), Some(500));

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let path = temp_store_path("missing");
        let err = load_snapshot(&path).await.unwrap_err();
        assert!(matches!(err, RagError::NotFound(_)));
    }

    #[tokio::test]
    async fn malformed_json_is_corrupt_state() {
        let path = temp_store_path("garbage");
        tokio::fs::write(&path, b"not json at all").await.unwrap();

        let err = load_snapshot(&path).await.unwrap_err();
        assert!(matches!(err, RagError::CorruptState(_)));

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn misaligned_snapshot_is_corrupt_state() {
        let path = temp_store_path("misaligned");
        let payload = serde_json::json!({
            "chunks": [
                { "text": "a", "metadata": { "source": "doc", "start_index": 0 } },
                { "text": "b", "metadata": { "source": "doc", "start_index": 5 } }
            ],
            "vectors": [[1.0, 0.0]]
        });
        tokio::fs::write(&path, serde_json::to_vec(&payload).unwrap())
            .await
            .unwrap();

        let err = load_snapshot(&path).await.unwrap_err();
        assert!(matches!(err, RagError::CorruptState(_)));

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn save_leaves_no_temp_file_behind() {
        let path = temp_store_path("tmpfile");
        save_snapshot(&populated_store(), &path).await.unwrap();

        assert!(tokio::fs::try_exists(&path).await.unwrap());
        assert!(!tokio::fs::try_exists(path.with_extension("json.tmp"))
            .await
            .unwrap());

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn save_overwrites_previous_snapshot() {
        let path = temp_store_path("overwrite");
        save_snapshot(&populated_store(), &path).await.unwrap();

        let mut bigger = populated_store();
        bigger
            .append_batch(
                vec![make_chunk("gamma", "doc", 1000)],
                vec![vec![0.0, 0.0, 1.0]],
            )
            .unwrap();
        save_snapshot(&bigger, &path).await.unwrap();

        let restored = load_snapshot(&path).await.unwrap();
        assert_eq!(restored.len(), 3);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn delete_snapshot_is_idempotent() {
        let path = temp_store_path("delete");
        save_snapshot(&populated_store(), &path).await.unwrap();

        delete_snapshot(&path).await.unwrap();
        assert!(!tokio::fs::try_exists(&path).await.unwrap());

        // Deleting again is fine.
        delete_snapshot(&path).await.unwrap();
    }
}
