//! Prompt assembly and answer generation over retrieved chunks.

use crate::rag::ScoredChunk;

use super::{ChatMessage, LlmClient, LlmError};

pub const NO_CONTEXT_REPLY: &str =
    "I couldn't find any relevant information in your documents to answer that question.";

pub const NO_API_KEY_REPLY: &str = "No API key configured. Showing retrieved context only.";

/// Joins retrieved chunks into a citation-annotated context block.
pub fn build_context(chunks: &[ScoredChunk]) -> String {
    chunks
        .iter()
        .map(|chunk| format!("[Source: {}]\n{}", chunk.metadata.source, chunk.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn build_prompt(query: &str, context: &str) -> String {
    format!(
        "You are an expert academic assistant. Your goal is to answer the user query based ONLY on the context provided below.\n\
         \n\
         GUIDELINES:\n\
         1. If the answer is not in the context, state \"I do not know based on the provided documents.\"\n\
         2. Keep the answer structured and professional.\n\
         \n\
         CONTEXT:\n\
         {context}\n\
         \n\
         USER QUERY:\n\
         {query}"
    )
}

/// Produces an answer for `query` grounded in `chunks`.
///
/// No surviving chunks yields a fixed reply without touching the LLM, and
/// a missing API key degrades to a context-only reply, so retrieval keeps
/// working when the chat collaborator is unavailable.
pub async fn generate_answer(
    client: &LlmClient,
    query: &str,
    chunks: &[ScoredChunk],
) -> Result<String, LlmError> {
    if chunks.is_empty() {
        return Ok(NO_CONTEXT_REPLY.to_string());
    }

    if !client.has_api_key() {
        return Ok(NO_API_KEY_REPLY.to_string());
    }

    let prompt = build_prompt(query, &build_context(chunks));
    client.chat(vec![ChatMessage::user(prompt)]).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::ChunkMetadata;

    fn scored(text: &str, source: &str, score: f32) -> ScoredChunk {
        ScoredChunk {
            score,
            text: text.to_string(),
            metadata: ChunkMetadata {
                source: source.to_string(),
                start_index: 0,
            },
        }
    }

    #[test]
    fn context_carries_source_citations() {
        let chunks = vec![
            scored("The Amazon is vast.", "wiki/amazon", 0.9),
            scored("Deforestation is a threat.", "report.pdf", 0.7),
        ];

        let context = build_context(&chunks);
        assert!(context.contains("[Source: wiki/amazon]\nThe Amazon is vast."));
        assert!(context.contains("[Source: report.pdf]\nDeforestation is a threat."));
    }

    #[test]
    fn prompt_embeds_context_and_query() {
        let prompt = build_prompt("what is the amazon?", "[Source: x]\nsome text");
        assert!(prompt.contains("CONTEXT:\n[Source: x]\nsome text"));
        assert!(prompt.contains("USER QUERY:\nwhat is the amazon?"));
    }

    #[tokio::test]
    async fn empty_context_short_circuits() {
        let client = LlmClient::new(
            "http://127.0.0.1:1".to_string(),
            "test-model".to_string(),
            Some("key".to_string()),
        );

        // Unreachable endpoint: the call must not be attempted.
        let answer = generate_answer(&client, "q", &[]).await.unwrap();
        assert_eq!(answer, NO_CONTEXT_REPLY);
    }

    #[tokio::test]
    async fn missing_api_key_degrades_gracefully() {
        let client = LlmClient::new(
            "http://127.0.0.1:1".to_string(),
            "test-model".to_string(),
            None,
        );
        let chunks = vec![scored("text", "doc", 0.8)];

        let answer = generate_answer(&client, "q", &chunks).await.unwrap();
        assert_eq!(answer, NO_API_KEY_REPLY);
    }
}
