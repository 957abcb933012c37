use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::core::errors::ApiError;
use crate::rag::delete_snapshot;
use crate::state::AppState;

/// Wipes the knowledge base: in-memory state and the persisted snapshot.
pub async fn reset(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let mut store = state.knowledge.write().await;
    store.reset();
    delete_snapshot(&state.paths.store_path).await?;

    tracing::info!("Knowledge base cleared");
    Ok(Json(json!({ "message": "Knowledge base cleared." })))
}
