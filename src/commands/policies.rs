//! Demo policy catalog handlers

use crate::cli::PolicyCommand;
use crate::error::{PolicyRagError, Result};
use crate::policy::{demo_policies, PolicyScope};
use colored::Colorize;
use prettytable::{format, Table};

/// Handle policy catalog commands
pub fn handle_policies(command: PolicyCommand) -> Result<()> {
    match command {
        PolicyCommand::List { scope } => {
            let filter = scope
                .as_deref()
                .map(PolicyScope::parse_str)
                .transpose()
                .map_err(PolicyRagError::Config)?;

            let policies: Vec<_> = demo_policies()
                .into_iter()
                .filter(|p| filter.map_or(true, |s| p.scope == s))
                .collect();

            if policies.is_empty() {
                println!("{}", "No policies in this scope.".yellow());
                return Ok(());
            }

            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

            table.add_row(prettytable::row![
                "Name".bold(),
                "Scope".bold(),
                "Version".bold(),
                "Status".bold(),
                "Indexed".bold(),
                "Last Updated".bold()
            ]);

            for policy in policies {
                let indexed = if policy.indexed {
                    "yes".green().to_string()
                } else {
                    "no".yellow().to_string()
                };

                table.add_row(prettytable::row![
                    policy.name,
                    policy.scope,
                    policy.version,
                    policy.status,
                    indexed,
                    policy.last_updated.format("%Y-%m-%d")
                ]);
            }

            println!("\nPolicy Catalog:");
            table.printstd();
            println!();
        }
    }

    Ok(())
}
