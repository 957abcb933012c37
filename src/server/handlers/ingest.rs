use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::core::errors::ApiError;
use crate::ingest::{chunk_text, extract_pdf_text, scrape_url};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct IngestUrlRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub message: String,
    pub chunks_added: usize,
}

pub async fn ingest_url(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IngestUrlRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    let url = request.url.trim();
    if url.is_empty() {
        return Err(ApiError::BadRequest("url must not be empty".to_string()));
    }

    let text = scrape_url(url).await?;
    let chunks = chunk_text(&text, state.settings.rag.chunk_size, url);
    let added = state.ingest_chunks(chunks).await?;

    Ok(Json(IngestResponse {
        message: format!("Successfully added {added} chunks from URL."),
        chunks_added: added,
    }))
}

pub async fn ingest_pdf(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<IngestResponse>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::BadRequest(err.to_string()))?
    {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or("upload.pdf").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|err| ApiError::BadRequest(err.to_string()))?;
            upload = Some((name, data.to_vec()));
            break;
        }
    }

    let (name, data) =
        upload.ok_or_else(|| ApiError::BadRequest("missing 'file' field".to_string()))?;

    let text = extract_pdf_text(data, &name).await?;
    let chunks = chunk_text(&text, state.settings.rag.chunk_size, &name);
    let added = state.ingest_chunks(chunks).await?;

    Ok(Json(IngestResponse {
        message: format!("Successfully added {added} chunks from PDF."),
        chunks_added: added,
    }))
}
