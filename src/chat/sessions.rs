//! Session catalog and active-session pointer
//!
//! The catalog is one JSON array under a single storage key, newest
//! sessions at the head. Every mutation reads the whole catalog, applies
//! the change, and writes it back before returning.

use crate::chat::messages::MessageStore;
use crate::chat::types::ChatSession;
use crate::error::Result;
use crate::storage::{Storage, ACTIVE_CHAT_KEY, SESSIONS_KEY};
use chrono::Utc;
use std::cmp::Ordering;
use std::sync::Arc;

/// Maximum length of a session's message preview, in characters
pub const PREVIEW_MAX_CHARS: usize = 80;

/// Store for the session catalog and the active-session pointer
///
/// Deleting a session cascades into the [`MessageStore`] so no orphaned
/// logs remain. Reads never fail: missing or malformed data yields an
/// empty catalog. Write failures propagate to the caller.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
    messages: MessageStore,
}

impl SessionStore {
    /// Create a session store over the given storage backend
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            messages: MessageStore::new(storage.clone()),
            storage,
        }
    }

    fn load_sessions(&self) -> Vec<ChatSession> {
        let raw = match self.storage.get(SESSIONS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read session catalog, treating as empty: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(sessions) => sessions,
            Err(e) => {
                tracing::warn!("Malformed session catalog, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    fn save_sessions(&self, sessions: &[ChatSession]) -> Result<()> {
        let raw = serde_json::to_string(sessions)?;
        self.storage.set(SESSIONS_KEY, &raw)
    }

    /// All sessions in listing order
    ///
    /// Pinned sessions come first with their relative order preserved,
    /// followed by unpinned sessions ordered by most recent activity
    /// (`last_updated`, falling back to `created_at`).
    pub fn list_sessions(&self) -> Vec<ChatSession> {
        sorted(self.load_sessions())
    }

    /// Look up one session by full id or unique id prefix
    pub fn find_session(&self, id: &str) -> Option<ChatSession> {
        let sessions = self.load_sessions();
        sessions
            .iter()
            .find(|s| s.id == id)
            .or_else(|| sessions.iter().find(|s| s.id.starts_with(id)))
            .cloned()
    }

    /// Create a new session, insert it at the head of the catalog, and
    /// make it the active session
    pub fn create_session(&self) -> Result<ChatSession> {
        let session = ChatSession::new();

        let mut sessions = self.load_sessions();
        sessions.insert(0, session.clone());
        self.save_sessions(&sessions)?;
        self.set_active_session(Some(&session.id))?;

        tracing::debug!("Created chat session {}", session.id);
        Ok(session)
    }

    /// Delete a session and all of its messages
    ///
    /// If the deleted session was active, the first entry of the remaining
    /// catalog in listing order becomes active (or none when the catalog
    /// is empty). Returns the resulting active session id so the caller
    /// observes the selection change. Unknown ids are a no-op.
    pub fn delete_session(&self, id: &str) -> Result<Option<String>> {
        let mut sessions = self.load_sessions();
        sessions.retain(|s| s.id != id);
        self.save_sessions(&sessions)?;

        self.messages.delete_messages(id)?;

        let active = self.active_session();
        if active.as_deref() == Some(id) {
            let next = sorted(sessions).first().map(|s| s.id.clone());
            self.set_active_session(next.as_deref())?;
            tracing::debug!("Deleted active session {}, new active: {:?}", id, next);
            return Ok(next);
        }

        Ok(active)
    }

    /// Set a session's title
    pub fn rename_session(&self, id: &str, title: &str) -> Result<()> {
        self.update_session(id, |s| s.title = title.to_string())
    }

    /// Flip a session's pinned flag
    pub fn toggle_pin(&self, id: &str) -> Result<()> {
        self.update_session(id, |s| s.is_pinned = !s.is_pinned)
    }

    /// Record one appended message in the session's counter
    ///
    /// One call adds exactly one; callers pair this with
    /// [`MessageStore::append_message`].
    pub fn increment_message_count(&self, id: &str) -> Result<()> {
        self.update_session(id, |s| s.message_count += 1)
    }

    /// Set the session's preview to a collapsed, length-capped form of
    /// `content`
    pub fn update_preview(&self, id: &str, content: &str) -> Result<()> {
        let preview = collapse_preview(content);
        self.update_session(id, |s| s.last_message_preview = Some(preview))
    }

    /// The currently active session id, if any
    pub fn active_session(&self) -> Option<String> {
        match self.storage.get(ACTIVE_CHAT_KEY) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read active session pointer: {}", e);
                None
            }
        }
    }

    /// Set or clear the active session pointer
    pub fn set_active_session(&self, id: Option<&str>) -> Result<()> {
        match id {
            Some(id) => self.storage.set(ACTIVE_CHAT_KEY, id),
            None => self.storage.remove(ACTIVE_CHAT_KEY),
        }
    }

    /// Apply `apply` to the session with `id`, bump `last_updated`, and
    /// persist. Unknown ids are a silent no-op.
    fn update_session(&self, id: &str, apply: impl FnOnce(&mut ChatSession)) -> Result<()> {
        let mut sessions = self.load_sessions();

        let Some(session) = sessions.iter_mut().find(|s| s.id == id) else {
            tracing::debug!("Ignoring update for unknown session {}", id);
            return Ok(());
        };

        apply(session);
        session.last_updated = Some(Utc::now());

        self.save_sessions(&sessions)
    }
}

/// Listing order: pinned first (stable among themselves), then unpinned by
/// recency descending
fn sorted(mut sessions: Vec<ChatSession>) -> Vec<ChatSession> {
    sessions.sort_by(|a, b| match (a.is_pinned, b.is_pinned) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (true, true) => Ordering::Equal,
        (false, false) => b.sort_key().cmp(&a.sort_key()),
    });
    sessions
}

/// Whitespace-collapse `content` and cap it at [`PREVIEW_MAX_CHARS`]
fn collapse_preview(content: &str) -> String {
    let collapsed = content.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(PREVIEW_MAX_CHARS).collect()
}
