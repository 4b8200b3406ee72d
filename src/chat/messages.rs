//! Per-session ordered message log
//!
//! All logs live under a single storage key as one JSON map from session
//! id to message list. Every mutation reads the whole map, applies the
//! change, and writes the map back.

use crate::chat::types::ChatMessage;
use crate::error::Result;
use crate::storage::{Storage, MESSAGES_KEY};
use std::collections::HashMap;
use std::sync::Arc;

type MessageMap = HashMap<String, Vec<ChatMessage>>;

/// Store for the ordered message log of each session
///
/// Reads never fail: missing or malformed data yields an empty log.
/// Write failures propagate to the caller.
#[derive(Clone)]
pub struct MessageStore {
    storage: Arc<dyn Storage>,
}

impl MessageStore {
    /// Create a message store over the given storage backend
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    fn load_all(&self) -> MessageMap {
        let raw = match self.storage.get(MESSAGES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return MessageMap::new(),
            Err(e) => {
                tracing::warn!("Failed to read message logs, treating as empty: {}", e);
                return MessageMap::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("Malformed message logs, treating as empty: {}", e);
                MessageMap::new()
            }
        }
    }

    fn save_all(&self, all: &MessageMap) -> Result<()> {
        let raw = serde_json::to_string(all)?;
        self.storage.set(MESSAGES_KEY, &raw)
    }

    /// Messages for a session in insertion order, empty if none exist
    pub fn messages(&self, session_id: &str) -> Vec<ChatMessage> {
        self.load_all().remove(session_id).unwrap_or_default()
    }

    /// Append a single message to the end of a session's log
    pub fn append_message(&self, session_id: &str, message: ChatMessage) -> Result<()> {
        let mut all = self.load_all();
        all.entry(session_id.to_string()).or_default().push(message);
        self.save_all(&all)
    }

    /// Overwrite the entire log for a session
    ///
    /// Used after local edits such as feedback toggles.
    pub fn replace_messages(&self, session_id: &str, messages: Vec<ChatMessage>) -> Result<()> {
        let mut all = self.load_all();
        all.insert(session_id.to_string(), messages);
        self.save_all(&all)
    }

    /// Empty the log but keep the session's entry
    pub fn clear_messages(&self, session_id: &str) -> Result<()> {
        let mut all = self.load_all();
        all.insert(session_id.to_string(), Vec::new());
        self.save_all(&all)
    }

    /// Remove the log entirely (cascade from session deletion)
    pub fn delete_messages(&self, session_id: &str) -> Result<()> {
        let mut all = self.load_all();
        all.remove(session_id);
        self.save_all(&all)
    }
}
