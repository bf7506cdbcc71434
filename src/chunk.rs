//! Character-count chunker and the summarize-or-slice dispatch.
//!
//! Small files are split into consecutive fixed-size slices; files strictly
//! larger than the threshold are condensed into a single model-produced
//! summary when summarization is enabled. Slicing counts characters, not
//! bytes, and never lands inside a code point.

use anyhow::Result;
use async_trait::async_trait;

use crate::config::ChunkingConfig;
use crate::models::{Chunk, ChunkKind, FileRecord};

/// Produces a condensed summary of one file via the remote model.
///
/// Implemented by the HTTP model client; tests substitute a stub so the
/// feed pipeline can run offline.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, path: &str, content: &str) -> Result<String>;
}

/// Split content into consecutive, non-overlapping slices of at most
/// `max_chars` characters. The final slice may be shorter; concatenated
/// back, the slices reproduce the input exactly. Empty content yields no
/// chunks.
pub fn split_content(path: &str, content: &str, max_chars: usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut rest = content;
    while !rest.is_empty() {
        let split_at = rest
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (piece, tail) = rest.split_at(split_at);
        chunks.push(Chunk {
            path: path.to_string(),
            kind: ChunkKind::Raw,
            text: piece.to_string(),
        });
        rest = tail;
    }
    chunks
}

/// Chunk one file, or ask the model for a summary when the content exceeds
/// the threshold. The comparison is strict: a file of exactly `max_chars`
/// characters is sliced, not summarized.
///
/// A failed summarization request propagates to the caller; there is no
/// fallback to raw slices.
pub async fn chunk_or_summarize(
    record: &FileRecord,
    chunking: &ChunkingConfig,
    summarizer: &dyn Summarizer,
) -> Result<Vec<Chunk>> {
    let len = record.content.chars().count();
    if chunking.summarize && len > chunking.max_chars {
        let summary = summarizer
            .summarize(&record.relative_path, &record.content)
            .await?;
        return Ok(vec![Chunk {
            path: record.relative_path.clone(),
            kind: ChunkKind::Summary,
            text: summary,
        }]);
    }
    Ok(split_content(
        &record.relative_path,
        &record.content,
        chunking.max_chars,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::fingerprint;

    struct FixedSummary(&'static str);

    #[async_trait]
    impl Summarizer for FixedSummary {
        async fn summarize(&self, _path: &str, _content: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingSummary;

    #[async_trait]
    impl Summarizer for FailingSummary {
        async fn summarize(&self, _path: &str, _content: &str) -> Result<String> {
            anyhow::bail!("summarization unavailable")
        }
    }

    fn record(content: &str) -> FileRecord {
        FileRecord {
            relative_path: "app.js".to_string(),
            fingerprint: fingerprint(content),
            content: content.to_string(),
        }
    }

    fn chunking(max_chars: usize, summarize: bool) -> ChunkingConfig {
        ChunkingConfig {
            max_chars,
            summarize,
        }
    }

    #[test]
    fn test_small_content_single_chunk() {
        let chunks = split_content("app.js", "hello", 3000);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "hello");
        assert_eq!(chunks[0].kind, ChunkKind::Raw);
        assert_eq!(chunks[0].path, "app.js");
    }

    #[test]
    fn test_empty_content_no_chunks() {
        assert!(split_content("app.js", "", 3000).is_empty());
    }

    #[test]
    fn test_ceil_chunk_count_and_roundtrip() {
        let content: String = "abcdefghij".repeat(70); // 700 chars
        for threshold in [3usize, 299, 300, 301, 700, 701] {
            let chunks = split_content("app.js", &content, threshold);
            let expected = content.chars().count().div_ceil(threshold);
            assert_eq!(chunks.len(), expected, "threshold {}", threshold);
            for chunk in &chunks {
                assert!(chunk.text.chars().count() <= threshold);
            }
            let rejoined: String = chunks.iter().map(|c| c.text.as_str()).collect();
            assert_eq!(rejoined, content, "threshold {}", threshold);
        }
    }

    #[test]
    fn test_multibyte_content_never_splits_code_points() {
        let content = "héllo wörld – †est ".repeat(50);
        let chunks = split_content("app.js", &content, 7);
        let rejoined: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(rejoined, content);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 7);
        }
    }

    #[tokio::test]
    async fn test_length_equal_to_threshold_is_sliced() {
        let content = "x".repeat(3000);
        let chunks = chunk_or_summarize(&record(&content), &chunking(3000, true), &FailingSummary)
            .await
            .unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].kind, ChunkKind::Raw);
        assert_eq!(chunks[0].text, content);
    }

    #[tokio::test]
    async fn test_length_over_threshold_is_summarized() {
        let content = "x".repeat(3001);
        let chunks = chunk_or_summarize(
            &record(&content),
            &chunking(3000, true),
            &FixedSummary("condensed"),
        )
        .await
        .unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].kind, ChunkKind::Summary);
        assert_eq!(chunks[0].text, "condensed");
    }

    #[tokio::test]
    async fn test_summarize_disabled_slices_large_files() {
        let content = "x".repeat(5000);
        let chunks = chunk_or_summarize(&record(&content), &chunking(3000, false), &FailingSummary)
            .await
            .unwrap();
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.kind == ChunkKind::Raw));
    }

    #[tokio::test]
    async fn test_summarizer_failure_propagates() {
        let content = "x".repeat(5000);
        let err = chunk_or_summarize(&record(&content), &chunking(3000, true), &FailingSummary)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unavailable"));
    }
}
