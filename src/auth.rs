//! Demo authentication
//!
//! Accepts three fixed demo accounts with any password of 6+ characters
//! and keeps the signed-in user record in the key-value area. There is no
//! real credential verification anywhere in this crate.

use crate::error::{PolicyRagError, Result};
use crate::policy::{User, UserRole};
use crate::storage::{Storage, USER_KEY};
use std::sync::Arc;
use uuid::Uuid;

/// Demo accounts accepted by [`AuthService::login`]
pub const DEMO_ACCOUNTS: [(&str, UserRole); 3] = [
    ("admin@company.com", UserRole::Admin),
    ("hr@company.com", UserRole::Hr),
    ("employee@company.com", UserRole::Employee),
];

const MIN_PASSWORD_CHARS: usize = 6;

const INVALID_CREDENTIALS: &str = "Invalid credentials. Use admin@company.com, \
     hr@company.com, or employee@company.com with any 6+ character password.";

/// Demo sign-in over the shared storage area
pub struct AuthService {
    storage: Arc<dyn Storage>,
}

impl AuthService {
    /// Create an auth service over the given storage backend
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Sign in with a demo account
    ///
    /// Stores and returns the user record on success.
    ///
    /// # Errors
    ///
    /// Returns `PolicyRagError::Authentication` for unknown accounts or
    /// passwords shorter than 6 characters.
    pub fn login(&self, email: &str, password: &str) -> Result<User> {
        let email = email.trim().to_lowercase();

        let role = DEMO_ACCOUNTS
            .iter()
            .find(|(account, _)| *account == email)
            .map(|(_, role)| *role)
            .ok_or_else(|| PolicyRagError::Authentication(INVALID_CREDENTIALS.to_string()))?;

        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(PolicyRagError::Authentication(INVALID_CREDENTIALS.to_string()).into());
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: display_name(&email),
            email,
            role,
        };

        self.storage.set(USER_KEY, &serde_json::to_string(&user)?)?;
        tracing::info!("Signed in demo user {} ({})", user.email, user.role);
        Ok(user)
    }

    /// Remove the signed-in user record
    pub fn logout(&self) -> Result<()> {
        self.storage.remove(USER_KEY)
    }

    /// The signed-in user, if any
    ///
    /// Missing or malformed records read as signed out.
    pub fn current_user(&self) -> Option<User> {
        let raw = match self.storage.get(USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read user record, treating as signed out: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Malformed user record, treating as signed out: {}", e);
                None
            }
        }
    }
}

/// Display name derived from the mailbox: "admin@company.com" → "Admin"
fn display_name(email: &str) -> String {
    let mailbox = email.split('@').next().unwrap_or(email);
    let mut chars = mailbox.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
