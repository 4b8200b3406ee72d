//! Chat session catalog and per-session message logs
//!
//! Two stores cooperate over the shared key-value area: the
//! [`SessionStore`] owns session metadata and the active-session pointer,
//! the [`MessageStore`] owns the ordered message log of each session. They
//! are coupled only through session ids; deleting a session cascades into
//! its message log.

pub mod messages;
pub mod sessions;
pub mod types;

pub use messages::MessageStore;
pub use sessions::{SessionStore, PREVIEW_MAX_CHARS};
pub use types::{
    ChatMessage, ChatSession, ConfidenceLevel, Feedback, PolicyCitation, Role,
    DEFAULT_SESSION_TITLE, UNTITLED_SESSION_TITLE,
};
