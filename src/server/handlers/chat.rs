use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::core::errors::ApiError;
use crate::llm::generate_answer;
use crate::rag::{retrieve_top_k, ScoredChunk};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub answer: String,
    pub sources: Vec<ScoredChunk>,
}

/// Answers a query from the knowledge base.
///
/// An empty knowledge base is rejected up front so the caller can tell
/// "nothing ingested yet" apart from "nothing relevant found" (the latter
/// returns a normal reply with empty sources).
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatQuery>,
) -> Result<Json<ChatReply>, ApiError> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".to_string()));
    }

    let sources = {
        let store = state.knowledge.read().await;
        if store.is_empty() {
            return Err(ApiError::BadRequest(
                "Knowledge base is empty. Ingest documents first.".to_string(),
            ));
        }

        retrieve_top_k(
            query,
            &store,
            state.embedder.as_ref(),
            state.settings.rag.top_k,
            state.settings.rag.score_threshold,
        )
        .await?
    };

    let answer = generate_answer(&state.llm, query, &sources).await?;

    Ok(Json(ChatReply { answer, sources }))
}
