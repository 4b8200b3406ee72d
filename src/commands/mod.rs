//! Command handlers for the PolicyRAG CLI
//!
//! Each submodule implements one top-level subcommand. Handlers receive
//! the shared storage backend and construct the stores they need.

pub mod auth;
pub mod chat;
pub mod history;
pub mod policies;
