//! Demo sign-in, sign-out, and whoami handlers

use crate::auth::AuthService;
use crate::error::Result;
use crate::storage::Storage;
use colored::Colorize;
use std::sync::Arc;

/// Sign in with a demo account and report the outcome
pub fn login(storage: Arc<dyn Storage>, email: &str, password: &str) -> Result<()> {
    let auth = AuthService::new(storage);
    let user = auth.login(email, password)?;

    println!(
        "{}",
        format!("Signed in as {} ({})", user.name, user.role).green()
    );
    println!("Start chatting with {}.", "policyrag chat".cyan());
    Ok(())
}

/// Sign out of the demo account
pub fn logout(storage: Arc<dyn Storage>) -> Result<()> {
    let auth = AuthService::new(storage);

    match auth.current_user() {
        Some(user) => {
            auth.logout()?;
            println!("{}", format!("Signed out {}", user.email).green());
        }
        None => println!("{}", "Not signed in.".yellow()),
    }
    Ok(())
}

/// Show the signed-in demo user
pub fn whoami(storage: Arc<dyn Storage>) -> Result<()> {
    let auth = AuthService::new(storage);

    match auth.current_user() {
        Some(user) => {
            println!("{} <{}>", user.name.bold(), user.email);
            println!("Role: {}", user.role.to_string().cyan());
        }
        None => {
            println!("{}", "Not signed in.".yellow());
            println!(
                "Use {} to sign in.",
                "policyrag login --email <email> --password <password>".cyan()
            );
        }
    }
    Ok(())
}
