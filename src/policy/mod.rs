//! Policy and user domain types plus the hard-coded demo catalog
//!
//! The catalog stands in for a real document store; nothing here is
//! editable at runtime.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse policy domain a question or document belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyScope {
    Hr,
    It,
    Finance,
    Security,
}

impl PolicyScope {
    /// Parse a scope from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use policyrag::policy::PolicyScope;
    ///
    /// let scope = PolicyScope::parse_str("finance").unwrap();
    /// assert_eq!(scope, PolicyScope::Finance);
    /// ```
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "hr" => Ok(Self::Hr),
            "it" => Ok(Self::It),
            "finance" => Ok(Self::Finance),
            "security" => Ok(Self::Security),
            other => Err(format!("Unknown policy scope: {}", other)),
        }
    }
}

impl fmt::Display for PolicyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hr => write!(f, "hr"),
            Self::It => write!(f, "it"),
            Self::Finance => write!(f, "finance"),
            Self::Security => write!(f, "security"),
        }
    }
}

/// Publication status of a policy document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyStatus {
    Active,
    Draft,
    Archived,
}

impl fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Draft => write!(f, "draft"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

/// A policy document known to the demo catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    pub id: String,
    pub name: String,
    pub scope: PolicyScope,
    pub version: String,
    pub last_updated: DateTime<Utc>,
    pub status: PolicyStatus,
    pub document_url: String,
    /// Whether the (simulated) retrieval index covers this document
    pub indexed: bool,
}

/// Role of a signed-in demo user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Employee,
    Hr,
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Employee => write!(f, "employee"),
            Self::Hr => write!(f, "hr"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// A signed-in demo user record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

fn demo_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// The six-entry demo policy catalog
pub fn demo_policies() -> Vec<Policy> {
    vec![
        Policy {
            id: "1".to_string(),
            name: "Employee Time Off Policy".to_string(),
            scope: PolicyScope::Hr,
            version: "2.1".to_string(),
            last_updated: demo_date(2024, 1, 15),
            status: PolicyStatus::Active,
            document_url: "#".to_string(),
            indexed: true,
        },
        Policy {
            id: "2".to_string(),
            name: "Information Security Policy".to_string(),
            scope: PolicyScope::Security,
            version: "3.0".to_string(),
            last_updated: demo_date(2024, 2, 1),
            status: PolicyStatus::Active,
            document_url: "#".to_string(),
            indexed: true,
        },
        Policy {
            id: "3".to_string(),
            name: "Travel and Expense Policy".to_string(),
            scope: PolicyScope::Finance,
            version: "1.8".to_string(),
            last_updated: demo_date(2024, 1, 20),
            status: PolicyStatus::Active,
            document_url: "#".to_string(),
            indexed: true,
        },
        Policy {
            id: "4".to_string(),
            name: "Remote Work Policy".to_string(),
            scope: PolicyScope::Hr,
            version: "1.5".to_string(),
            last_updated: demo_date(2024, 3, 1),
            status: PolicyStatus::Active,
            document_url: "#".to_string(),
            indexed: true,
        },
        Policy {
            id: "5".to_string(),
            name: "IT Equipment Policy".to_string(),
            scope: PolicyScope::It,
            version: "2.0".to_string(),
            last_updated: demo_date(2024, 2, 15),
            status: PolicyStatus::Active,
            document_url: "#".to_string(),
            indexed: false,
        },
        Policy {
            id: "6".to_string(),
            name: "Data Privacy Policy".to_string(),
            scope: PolicyScope::Security,
            version: "2.2".to_string(),
            last_updated: demo_date(2024, 1, 10),
            status: PolicyStatus::Draft,
            document_url: "#".to_string(),
            indexed: false,
        },
    ]
}
