//! PDF text extraction.

use super::IngestError;

/// Extracts the text of a PDF from its raw bytes.
///
/// `pdf-extract` is CPU-bound, so the work runs on the blocking pool.
/// Image-only or encrypted documents surface as [`IngestError::NoText`].
pub async fn extract_pdf_text(data: Vec<u8>, name: &str) -> Result<String, IngestError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|err| IngestError::Pdf(format!("task join error: {err}")))?
        .map_err(|err| IngestError::Pdf(err.to_string()))?;

    if text.trim().is_empty() {
        return Err(IngestError::NoText(name.to_string()));
    }

    Ok(text)
}
