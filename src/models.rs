//! Core data types that flow through the feed and chat pipeline.

use serde::Serialize;

/// A file discovered by the repository scanner.
///
/// Recreated in full on every scan; nothing here survives a process restart.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Path relative to the configured repository root.
    pub relative_path: String,
    /// Full text of the file.
    pub content: String,
    /// Hex-encoded SHA-256 of `content`, used for change detection.
    pub fingerprint: String,
}

/// How a chunk was derived from its source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    /// A raw slice of the file content.
    Raw,
    /// A model-produced summary of the whole file.
    Summary,
}

/// A bounded fragment of one file, ready to be fed as conversation context.
///
/// Transient: produced and consumed within a single feed cycle, then rendered
/// into the system entry it becomes.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub path: String,
    pub kind: ChunkKind,
    pub text: String,
}

impl Chunk {
    /// Render the chunk as the system-entry text sent to the model.
    pub fn render(&self) -> String {
        match self.kind {
            ChunkKind::Raw => format!("File: {}\n{}", self.path, self.text),
            ChunkKind::Summary => format!("File: {} (summary)\n{}", self.path, self.text),
        }
    }
}

/// Message role as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged message in the conversation store.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationEntry {
    pub role: Role,
    pub content: String,
}

/// Counters reported by one feed cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedReport {
    /// Files whose fingerprint was new or changed.
    pub files_changed: usize,
    /// System entries appended to the conversation.
    pub chunks_fed: usize,
    /// Files skipped because they could not be read as text.
    pub files_skipped: usize,
}
