//! PolicyRAG - Enterprise policy assistant demo library
//!
//! This library implements a fully local demonstration of a policy
//! question-answering assistant: chat sessions and their message logs are
//! kept in an embedded key-value store, answers come from canned demo
//! content, and sign-in accepts fixed demo accounts.
//!
//! # Architecture
//!
//! - `chat`: session catalog and per-session message logs (the core)
//! - `storage`: injectable key-value backends (sled, in-memory)
//! - `assistant`: canned demo responder with a cosmetic delay
//! - `policy`: policy/user domain types and the demo catalog
//! - `auth`: demo sign-in over the shared storage
//! - `config`: configuration management and validation
//! - `cli`: command-line interface definition
//! - `commands`: CLI command handlers
//! - `error`: error types and result aliases
//!
//! # Example
//!
//! ```
//! use policyrag::chat::{ChatMessage, MessageStore, SessionStore};
//! use policyrag::storage::MemoryStorage;
//! use std::sync::Arc;
//!
//! # fn main() -> policyrag::error::Result<()> {
//! let storage = Arc::new(MemoryStorage::new());
//! let sessions = SessionStore::new(storage.clone());
//! let messages = MessageStore::new(storage);
//!
//! let session = sessions.create_session()?;
//! messages.append_message(&session.id, ChatMessage::user("What is the PTO policy?"))?;
//! sessions.increment_message_count(&session.id)?;
//! # Ok(())
//! # }
//! ```

pub mod assistant;
pub mod auth;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod policy;
pub mod storage;

// Re-export commonly used types
pub use chat::{ChatMessage, ChatSession, MessageStore, SessionStore};
pub use config::Config;
pub use error::{PolicyRagError, Result};
