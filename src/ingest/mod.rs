//! Knowledge ingestion: web scraping, PDF extraction, chunking.
//!
//! Everything here produces plain [`crate::rag::Chunk`] values; the
//! retrieval core never sees HTML or PDF internals.

mod chunker;
mod pdf;
mod web;

use thiserror::Error;

pub use chunker::chunk_text;
pub use pdf::extract_pdf_text;
pub use web::scrape_url;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("pdf extraction failed: {0}")]
    Pdf(String),

    #[error("no extractable text in {0}")]
    NoText(String),
}
