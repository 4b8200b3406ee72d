//! Command-line interface definition for PolicyRAG
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for the interactive chat, history management, the
//! demo policy catalog, and demo sign-in.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// PolicyRAG - Enterprise policy assistant demo
///
/// Ask questions about company policies through a simulated assistant.
/// All data stays on this machine; answers come from canned demo content.
#[derive(Parser, Debug, Clone)]
#[command(name = "policyrag")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the chat data directory
    #[arg(long, env = "POLICYRAG_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for PolicyRAG
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Sign in with a demo account
    Login {
        /// Work email (admin@company.com, hr@company.com, or
        /// employee@company.com)
        #[arg(short, long)]
        email: String,

        /// Any password of 6+ characters
        #[arg(short, long)]
        password: String,
    },

    /// Sign out of the demo account
    Logout,

    /// Show the signed-in demo user
    Whoami,

    /// Start the interactive policy chat
    Chat {
        /// Resume a session by id (or unique id prefix) instead of the
        /// active session
        #[arg(short, long)]
        resume: Option<String>,

        /// Limit questions to one policy scope (hr, it, finance, security)
        #[arg(short, long)]
        scope: Option<String>,
    },

    /// Manage chat history
    History {
        /// History subcommand
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Inspect the demo policy catalog
    Policies {
        /// Policy catalog subcommand
        #[command(subcommand)]
        command: PolicyCommand,
    },
}

/// History management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum HistoryCommand {
    /// List chat sessions
    List,

    /// Delete a session and all of its messages
    Delete {
        /// Session id or unique id prefix
        id: String,
    },

    /// Rename a session
    Rename {
        /// Session id or unique id prefix
        id: String,

        /// New title
        title: String,
    },

    /// Pin or unpin a session
    Pin {
        /// Session id or unique id prefix
        id: String,
    },

    /// Clear a session's messages but keep the session
    Clear {
        /// Session id or unique id prefix
        id: String,
    },
}

/// Policy catalog subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PolicyCommand {
    /// List demo policies
    List {
        /// Filter by scope (hr, it, finance, security)
        #[arg(short, long)]
        scope: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_chat_command() {
        let cli = Cli::try_parse_from(["policyrag", "chat"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        assert!(matches!(cli.command, Commands::Chat { .. }));
    }

    #[test]
    fn test_cli_parse_chat_with_scope() {
        let cli = Cli::try_parse_from(["policyrag", "chat", "--scope", "finance"]).unwrap();
        if let Commands::Chat { scope, resume: _ } = cli.command {
            assert_eq!(scope, Some("finance".to_string()));
        } else {
            panic!("Expected Chat command");
        }
    }

    #[test]
    fn test_cli_parse_login() {
        let cli = Cli::try_parse_from([
            "policyrag",
            "login",
            "--email",
            "hr@company.com",
            "--password",
            "secret1",
        ])
        .unwrap();
        if let Commands::Login { email, password } = cli.command {
            assert_eq!(email, "hr@company.com");
            assert_eq!(password, "secret1");
        } else {
            panic!("Expected Login command");
        }
    }

    #[test]
    fn test_cli_parse_history_list() {
        let cli = Cli::try_parse_from(["policyrag", "history", "list"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::History {
                command: HistoryCommand::List
            }
        ));
    }

    #[test]
    fn test_cli_parse_history_rename() {
        let cli =
            Cli::try_parse_from(["policyrag", "history", "rename", "abcd1234", "Expenses"])
                .unwrap();
        if let Commands::History {
            command: HistoryCommand::Rename { id, title },
        } = cli.command
        {
            assert_eq!(id, "abcd1234");
            assert_eq!(title, "Expenses");
        } else {
            panic!("Expected History Rename command");
        }
    }

    #[test]
    fn test_cli_parse_policies_list_with_scope() {
        let cli = Cli::try_parse_from(["policyrag", "policies", "list", "--scope", "hr"]).unwrap();
        if let Commands::Policies {
            command: PolicyCommand::List { scope },
        } = cli.command
        {
            assert_eq!(scope, Some("hr".to_string()));
        } else {
            panic!("Expected Policies List command");
        }
    }

    #[test]
    fn test_cli_requires_a_subcommand() {
        assert!(Cli::try_parse_from(["policyrag"]).is_err());
    }

    #[test]
    fn test_cli_parses_data_dir_override() {
        let cli =
            Cli::try_parse_from(["policyrag", "--data-dir", "/tmp/prag", "whoami"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/prag")));
    }
}
