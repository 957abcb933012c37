//! Fixed-size chunking with source metadata.

use crate::rag::{Chunk, ChunkMetadata};

/// Splits `text` into consecutive slices of at most `chunk_size`
/// characters. Each chunk records `source` and the character offset at
/// which it began.
pub fn chunk_text(text: &str, chunk_size: usize, source: &str) -> Vec<Chunk> {
    let chunk_size = chunk_size.max(1);
    let chars: Vec<char> = text.chars().collect();

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        let content: String = chars[start..end].iter().collect();
        chunks.push(Chunk {
            text: content,
            metadata: ChunkMetadata {
                source: source.to_string(),
                start_index: start,
            },
        });
        start = end;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_track_character_positions() {
        let text = "a".repeat(12);
        let chunks = chunk_text(&text, 5, "doc");

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].metadata.start_index, 0);
        assert_eq!(chunks[1].metadata.start_index, 5);
        assert_eq!(chunks[2].metadata.start_index, 10);
        assert_eq!(chunks[2].text.chars().count(), 2);
    }

    #[test]
    fn every_chunk_respects_the_size_limit() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(10);
        let chunks = chunk_text(&text, 50, "doc");

        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 50);
            assert_eq!(chunk.metadata.source, "doc");
        }

        // Rejoining the chunks reproduces the input.
        let rejoined: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(rejoined, text);
    }

    #[test]
    fn multibyte_text_is_sliced_by_characters() {
        let text = "日本語のテキストです";
        let chunks = chunk_text(text, 4, "doc");

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].text, "日本語の");
        assert_eq!(chunks[1].metadata.start_index, 4);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunk_text("", 500, "doc").is_empty());
    }

    #[test]
    fn zero_chunk_size_does_not_loop_forever() {
        let chunks = chunk_text("abc", 0, "doc");
        assert_eq!(chunks.len(), 3);
    }
}
