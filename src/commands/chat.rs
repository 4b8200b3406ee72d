//! Interactive policy chat
//!
//! Runs a readline loop against the active session: plain input is sent
//! to the demo assistant, slash commands manage sessions and feedback.

use crate::assistant::DemoAssistant;
use crate::auth::AuthService;
use crate::chat::{ChatMessage, ConfidenceLevel, Feedback, MessageStore, Role, SessionStore};
use crate::config::Config;
use crate::error::{PolicyRagError, Result};
use crate::policy::{PolicyScope, User};
use crate::storage::Storage;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;

enum LoopAction {
    Continue,
    Quit,
}

/// Run the interactive chat loop
pub async fn run_chat(
    config: &Config,
    storage: Arc<dyn Storage>,
    resume: Option<String>,
    scope: Option<String>,
) -> Result<()> {
    let auth = AuthService::new(storage.clone());
    let Some(user) = auth.current_user() else {
        return Err(PolicyRagError::Authentication(
            "Not signed in. Use `policyrag login` first.".to_string(),
        )
        .into());
    };

    let scope = scope
        .as_deref()
        .map(PolicyScope::parse_str)
        .transpose()
        .map_err(PolicyRagError::Config)?;

    let sessions = SessionStore::new(storage.clone());
    let messages = MessageStore::new(storage);
    let assistant = DemoAssistant::new(config.assistant.response_delay_ms);

    let mut active = match resume {
        Some(id) => {
            let session = sessions
                .find_session(&id)
                .ok_or_else(|| PolicyRagError::Chat(format!("No session matching '{}'", id)))?;
            sessions.set_active_session(Some(&session.id))?;
            Some(session.id)
        }
        None => match sessions.active_session() {
            Some(id) if sessions.find_session(&id).is_some() => Some(id),
            _ => Some(sessions.create_session()?.id),
        },
    };

    print_banner(&user, &sessions, &active);

    let mut editor = DefaultEditor::new()?;
    loop {
        let line = match editor.readline("you> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "Use /quit to leave.".dimmed());
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(line);

        if let Some(command) = line.strip_prefix('/') {
            match handle_command(command, &sessions, &messages, &mut active)? {
                LoopAction::Continue => continue,
                LoopAction::Quit => break,
            }
        }

        ask(
            line,
            scope,
            &sessions,
            &messages,
            &assistant,
            config.assistant.show_searching,
            &mut active,
        )
        .await?;
    }

    println!("Goodbye.");
    Ok(())
}

/// Send a question through the stores and print the canned reply
///
/// Creates a session on the fly when none is active, which mirrors the
/// "new chat" affordance of the surrounding flow.
async fn ask(
    question: &str,
    scope: Option<PolicyScope>,
    sessions: &SessionStore,
    messages: &MessageStore,
    assistant: &DemoAssistant,
    show_searching: bool,
    active: &mut Option<String>,
) -> Result<()> {
    let session_id = match active.as_deref() {
        Some(id) if sessions.find_session(id).is_some() => id.to_string(),
        _ => {
            let session = sessions.create_session()?;
            *active = Some(session.id.clone());
            session.id
        }
    };

    let user_message = ChatMessage::user(question).with_scope(scope);
    messages.append_message(&session_id, user_message)?;
    sessions.increment_message_count(&session_id)?;
    sessions.update_preview(&session_id, question)?;

    if show_searching {
        println!("{}", "Searching policies...".dimmed());
    }

    let reply = assistant.respond(question, scope).await;
    messages.append_message(&session_id, reply.clone())?;
    sessions.increment_message_count(&session_id)?;
    sessions.update_preview(&session_id, &reply.content)?;

    print_reply(&reply);
    Ok(())
}

fn handle_command(
    input: &str,
    sessions: &SessionStore,
    messages: &MessageStore,
    active: &mut Option<String>,
) -> Result<LoopAction> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let (name, args) = match parts.split_first() {
        Some((name, args)) => (*name, args),
        None => {
            print_help();
            return Ok(LoopAction::Continue);
        }
    };

    match name {
        "help" => print_help(),
        "quit" | "exit" => return Ok(LoopAction::Quit),
        "new" => {
            let session = sessions.create_session()?;
            println!("{}", format!("Started {}", session.display_title()).green());
            *active = Some(session.id);
        }
        "sessions" => print_sessions(sessions, active),
        "switch" => switch_session(args, sessions, active)?,
        "rename" => {
            let Some(id) = active.as_deref() else {
                println!("{}", "No active session.".yellow());
                return Ok(LoopAction::Continue);
            };
            if args.is_empty() {
                println!("{}", "Usage: /rename <title>".yellow());
                return Ok(LoopAction::Continue);
            }
            let title = args.join(" ");
            sessions.rename_session(id, &title)?;
            println!("{}", format!("Renamed session to \"{}\"", title).green());
        }
        "pin" => {
            let Some(id) = active.as_deref() else {
                println!("{}", "No active session.".yellow());
                return Ok(LoopAction::Continue);
            };
            sessions.toggle_pin(id)?;
            let pinned = sessions.find_session(id).map(|s| s.is_pinned).unwrap_or(false);
            let state = if pinned { "Pinned" } else { "Unpinned" };
            println!("{}", format!("{} this session", state).green());
        }
        "delete" => {
            let Some(id) = active.clone() else {
                println!("{}", "No active session.".yellow());
                return Ok(LoopAction::Continue);
            };
            let next = sessions.delete_session(&id)?;
            match &next {
                Some(next_id) => {
                    let title = sessions
                        .find_session(next_id)
                        .map(|s| s.display_title().to_string())
                        .unwrap_or_else(|| next_id.clone());
                    println!(
                        "{}",
                        format!("Deleted session; now in {}", title).green()
                    );
                }
                None => println!(
                    "{}",
                    "Deleted session; next question starts a new chat.".green()
                ),
            }
            *active = next;
        }
        "clear" => {
            let Some(id) = active.as_deref() else {
                println!("{}", "No active session.".yellow());
                return Ok(LoopAction::Continue);
            };
            messages.clear_messages(id)?;
            println!("{}", "Cleared messages in this session.".green());
        }
        "messages" => print_messages(messages, active),
        "feedback" => apply_feedback(args, messages, active)?,
        other => {
            println!(
                "{}",
                format!("Unknown command '/{}'. Type /help for commands.", other).yellow()
            );
        }
    }

    Ok(LoopAction::Continue)
}

fn switch_session(
    args: &[&str],
    sessions: &SessionStore,
    active: &mut Option<String>,
) -> Result<()> {
    let Some(target) = args.first() else {
        println!("{}", "Usage: /switch <number|id>".yellow());
        return Ok(());
    };

    let session = if let Ok(number) = target.parse::<usize>() {
        let listed = sessions.list_sessions();
        number.checked_sub(1).and_then(|i| listed.into_iter().nth(i))
    } else {
        sessions.find_session(target)
    };

    let Some(session) = session else {
        println!("{}", format!("No session matching '{}'.", target).yellow());
        return Ok(());
    };

    sessions.set_active_session(Some(&session.id))?;
    println!(
        "{}",
        format!("Switched to {}", session.display_title()).green()
    );
    *active = Some(session.id);
    Ok(())
}

/// Toggle feedback on an assistant answer
///
/// With one argument the feedback applies to the latest assistant message;
/// with two, the first selects a message by its /messages number. Giving
/// the same feedback again clears it.
fn apply_feedback(
    args: &[&str],
    messages: &MessageStore,
    active: &Option<String>,
) -> Result<()> {
    const USAGE: &str =
        "Usage: /feedback [number] <helpful|incorrect|needs-clarification>";

    let Some(session_id) = active.as_deref() else {
        println!("{}", "No active session.".yellow());
        return Ok(());
    };

    let mut log = messages.messages(session_id);

    let (index, kind) = match args {
        [kind] => {
            let last_assistant = log.iter().rposition(|m| m.role == Role::Assistant);
            (last_assistant, *kind)
        }
        [number, kind] => {
            let index = number
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .filter(|i| *i < log.len());
            if index.is_none() {
                println!("{}", format!("No message #{}.", number).yellow());
                return Ok(());
            }
            (index, *kind)
        }
        _ => {
            println!("{}", USAGE.yellow());
            return Ok(());
        }
    };

    let kind = match Feedback::parse_str(kind) {
        Ok(kind) => kind,
        Err(_) => {
            println!("{}", USAGE.yellow());
            return Ok(());
        }
    };

    let Some(index) = index else {
        println!("{}", "No assistant answer to rate yet.".yellow());
        return Ok(());
    };

    let message = &mut log[index];
    if message.role != Role::Assistant {
        println!("{}", "Feedback applies to assistant answers only.".yellow());
        return Ok(());
    }

    let cleared = message.feedback == Some(kind);
    message.feedback = if cleared { None } else { Some(kind) };
    messages.replace_messages(session_id, log)?;

    if cleared {
        println!("{}", "Feedback cleared.".green());
    } else {
        println!("{}", "Thanks for the feedback.".green());
    }
    Ok(())
}

fn print_banner(user: &User, sessions: &SessionStore, active: &Option<String>) {
    println!("{}", "PolicyRAG Policy Assistant".bold());
    println!("Signed in as {} ({}).", user.name, user.role);
    if let Some(session) = active.as_deref().and_then(|id| sessions.find_session(id)) {
        println!("Session: {}", session.display_title());
    }
    println!("Ask about company policies. Try PTO, passwords, or expenses.");
    println!(
        "Type {} for commands, {} to leave.\n",
        "/help".cyan(),
        "/quit".cyan()
    );
}

fn print_help() {
    println!("Commands:");
    println!("  {}                 start a new chat", "/new".cyan());
    println!("  {}            list chat sessions", "/sessions".cyan());
    println!("  {}  switch session", "/switch <number|id>".cyan());
    println!("  {}      rename the current session", "/rename <title>".cyan());
    println!("  {}                 pin or unpin the current session", "/pin".cyan());
    println!("  {}              delete the current session", "/delete".cyan());
    println!("  {}               clear messages in the current session", "/clear".cyan());
    println!("  {}            show the current session's messages", "/messages".cyan());
    println!(
        "  {}  rate an answer (repeat to clear)",
        "/feedback [n] <kind>".cyan()
    );
    println!("  {}                leave the chat", "/quit".cyan());
}

fn print_sessions(sessions: &SessionStore, active: &Option<String>) {
    let listed = sessions.list_sessions();
    if listed.is_empty() {
        println!("{}", "No sessions yet.".yellow());
        return;
    }

    for (i, session) in listed.iter().enumerate() {
        let marker = if active.as_deref() == Some(session.id.as_str()) {
            ">"
        } else {
            " "
        };
        let pin = if session.is_pinned { "*" } else { " " };
        println!(
            "{} {}{} {} ({} messages)",
            marker,
            pin,
            format!("{}.", i + 1).bold(),
            session.display_title(),
            session.message_count
        );
    }
}

fn print_messages(messages: &MessageStore, active: &Option<String>) {
    let Some(session_id) = active.as_deref() else {
        println!("{}", "No active session.".yellow());
        return;
    };

    let log = messages.messages(session_id);
    if log.is_empty() {
        println!("{}", "No messages yet.".yellow());
        return;
    }

    for (i, message) in log.iter().enumerate() {
        let role = match message.role {
            Role::User => "you".bold().to_string(),
            Role::Assistant => "assistant".bold().blue().to_string(),
        };
        let feedback = message
            .feedback
            .map(|f| format!(" [{}]", feedback_label(f)))
            .unwrap_or_default();
        println!("{}. {}{}: {}", i + 1, role, feedback, message.content);
    }
}

fn print_reply(reply: &ChatMessage) {
    let tag = reply
        .confidence
        .map(confidence_tag)
        .unwrap_or_default();
    println!("\n{} {}", "assistant".bold().blue(), tag);
    println!("{}", reply.content);

    if !reply.citations.is_empty() {
        println!();
        for citation in &reply.citations {
            println!(
                "  {} {}, {} (v{})",
                "cite:".dimmed(),
                citation.policy_name,
                citation.section,
                citation.version
            );
        }
    }
    println!();
}

fn confidence_tag(level: ConfidenceLevel) -> String {
    match level {
        ConfidenceLevel::High => format!("[{}]", "HIGH".green()),
        ConfidenceLevel::Medium => format!("[{}]", "MEDIUM".yellow()),
        ConfidenceLevel::Low => format!("[{}]", "LOW".red()),
    }
}

fn feedback_label(feedback: Feedback) -> &'static str {
    match feedback {
        Feedback::Helpful => "helpful",
        Feedback::Incorrect => "incorrect",
        Feedback::NeedsClarification => "needs-clarification",
    }
}
