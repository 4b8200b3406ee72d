//! Chat history management handlers

use crate::chat::{MessageStore, SessionStore};
use crate::cli::HistoryCommand;
use crate::error::Result;
use crate::storage::Storage;
use colored::Colorize;
use prettytable::{format, Table};
use std::sync::Arc;

/// Handle history commands
pub fn handle_history(storage: Arc<dyn Storage>, command: HistoryCommand) -> Result<()> {
    let sessions = SessionStore::new(storage.clone());

    match command {
        HistoryCommand::List => {
            let listed = sessions.list_sessions();

            if listed.is_empty() {
                println!("{}", "No chat history found.".yellow());
                return Ok(());
            }

            let active = sessions.active_session();

            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

            table.add_row(prettytable::row![
                "ID".bold(),
                "Title".bold(),
                "Pinned".bold(),
                "Messages".bold(),
                "Last Updated".bold()
            ]);

            for session in listed {
                let id_short = short_id(&session.id);
                let marker = if active.as_deref() == Some(session.id.as_str()) {
                    format!("{} *", id_short.cyan())
                } else {
                    id_short.cyan().to_string()
                };
                let title = truncate_title(session.display_title());
                let pinned = if session.is_pinned { "yes" } else { "" };
                let updated = session.sort_key().format("%Y-%m-%d %H:%M").to_string();

                table.add_row(prettytable::row![
                    marker,
                    title,
                    pinned,
                    session.message_count,
                    updated
                ]);
            }

            println!("\nChat History:");
            table.printstd();
            println!();
            println!(
                "Use {} to continue a session (* marks the active one).",
                "policyrag chat --resume <ID>".cyan()
            );
            println!();
        }
        HistoryCommand::Delete { id } => {
            let Some(session) = sessions.find_session(&id) else {
                println!("{}", format!("No session matching '{}'.", id).yellow());
                return Ok(());
            };

            sessions.delete_session(&session.id)?;
            println!(
                "{}",
                format!("Deleted session {}", short_id(&session.id)).green()
            );
        }
        HistoryCommand::Rename { id, title } => {
            let Some(session) = sessions.find_session(&id) else {
                println!("{}", format!("No session matching '{}'.", id).yellow());
                return Ok(());
            };

            sessions.rename_session(&session.id, &title)?;
            println!(
                "{}",
                format!("Renamed session {} to \"{}\"", short_id(&session.id), title).green()
            );
        }
        HistoryCommand::Pin { id } => {
            let Some(session) = sessions.find_session(&id) else {
                println!("{}", format!("No session matching '{}'.", id).yellow());
                return Ok(());
            };

            sessions.toggle_pin(&session.id)?;
            let state = if session.is_pinned { "Unpinned" } else { "Pinned" };
            println!(
                "{}",
                format!("{} session {}", state, short_id(&session.id)).green()
            );
        }
        HistoryCommand::Clear { id } => {
            let Some(session) = sessions.find_session(&id) else {
                println!("{}", format!("No session matching '{}'.", id).yellow());
                return Ok(());
            };

            let messages = MessageStore::new(storage);
            messages.clear_messages(&session.id)?;
            println!(
                "{}",
                format!("Cleared messages in session {}", short_id(&session.id)).green()
            );
        }
    }

    Ok(())
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() > 40 {
        let head: String = title.chars().take(37).collect();
        format!("{}...", head)
    } else {
        title.to_string()
    }
}
