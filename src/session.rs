//! Conversation store and fingerprint table.
//!
//! The [`Session`] is the only mutable state in the process. It is created
//! by `main` and handed `&mut` into the feed and chat loops; the feed loop
//! is the sole mutator of the fingerprint table.

use std::collections::HashMap;

use crate::config::RetentionConfig;
use crate::models::{ConversationEntry, Role};

#[derive(Debug, Default)]
pub struct Session {
    entries: Vec<ConversationEntry>,
    fingerprints: HashMap<String, String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_system(&mut self, content: String) {
        self.entries.push(ConversationEntry {
            role: Role::System,
            content,
        });
    }

    pub fn push_user(&mut self, content: String) {
        self.entries.push(ConversationEntry {
            role: Role::User,
            content,
        });
    }

    pub fn push_assistant(&mut self, content: String) {
        self.entries.push(ConversationEntry {
            role: Role::Assistant,
            content,
        });
    }

    /// The full ordered history, as sent to the model on every turn.
    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Last fingerprint recorded for a path, if the path was ever fed.
    pub fn recorded_fingerprint(&self, path: &str) -> Option<&str> {
        self.fingerprints.get(path).map(String::as_str)
    }

    /// Record the fingerprint fed for a path. Entries for files that no
    /// longer exist are left in place; they are harmless.
    pub fn record_fingerprint(&mut self, path: &str, fp: &str) {
        self.fingerprints.insert(path.to_string(), fp.to_string());
    }

    /// Enforce the retention cap before a send.
    ///
    /// With `max_entries == 0` the store is unbounded. Otherwise the oldest
    /// user/assistant entries are evicted until the store fits the cap;
    /// system entries (repo context) are never evicted and relative order
    /// is preserved.
    pub fn enforce_retention(&mut self, retention: &RetentionConfig) {
        if retention.max_entries == 0 {
            return;
        }
        while self.entries.len() > retention.max_entries {
            let evictable = self.entries.iter().position(|e| e.role != Role::System);
            match evictable {
                Some(pos) => {
                    self.entries.remove(pos);
                }
                None => break,
            }
        }
    }
}
