use reqwest::Client;
use serde_json::{json, Value};

use super::{ChatMessage, LlmError};

/// OpenAI-compatible `/chat/completions` client.
///
/// The default deployment points at OpenRouter; any provider speaking the
/// same schema works. The base URL is expected to include the API version
/// segment (e.g. `https://openrouter.ai/api/v1`).
#[derive(Clone)]
pub struct LlmClient {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: Client,
}

impl LlmClient {
    pub fn new(base_url: String, model: String, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            client: Client::new(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = json!({
            "model": self.model,
            "messages": messages,
        });

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let res = request.send().await?;
        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(LlmError::Endpoint(format!(
                "{url} returned {status}: {text}"
            )));
        }

        let payload: Value = res.json().await?;
        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| LlmError::Endpoint("response has no message content".to_string()))?;

        Ok(content.to_string())
    }
}
