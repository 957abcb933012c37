//! Chat-completion collaborator.
//!
//! Retrieval works without this module being reachable; it only turns an
//! already-retrieved context into a natural-language answer.

mod answer;
mod client;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use answer::{build_context, generate_answer, NO_CONTEXT_REPLY, NO_API_KEY_REPLY};
pub use client::LlmClient;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("chat request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("chat endpoint error: {0}")]
    Endpoint(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}
