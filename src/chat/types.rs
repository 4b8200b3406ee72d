//! Record types shared by the session and message stores
//!
//! All records serialize to camelCase JSON with RFC-3339 timestamps, the
//! single canonical wire form of the persisted state.

use crate::policy::PolicyScope;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default title given to a freshly created session
pub const DEFAULT_SESSION_TITLE: &str = "New Chat";

/// Title shown for sessions whose stored title is blank
pub const UNTITLED_SESSION_TITLE: &str = "Untitled Chat";

/// Sender of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Coarse three-tier quality indicator attached to assistant messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

/// User feedback recorded on an assistant message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feedback {
    Helpful,
    Incorrect,
    NeedsClarification,
}

impl Feedback {
    /// Parse a feedback kind from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use policyrag::chat::Feedback;
    ///
    /// let feedback = Feedback::parse_str("needs-clarification").unwrap();
    /// assert_eq!(feedback, Feedback::NeedsClarification);
    /// ```
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "helpful" => Ok(Self::Helpful),
            "incorrect" => Ok(Self::Incorrect),
            "needs-clarification" => Ok(Self::NeedsClarification),
            other => Err(format!("Unknown feedback kind: {}", other)),
        }
    }
}

/// A structured reference to a policy document section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyCitation {
    pub id: String,
    pub policy_name: String,
    pub section: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    pub excerpt: String,
    pub document_url: String,
}

/// A single message in a chat session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Policy references backing an assistant answer (assistant-only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<PolicyCitation>,
    /// Answer quality indicator (assistant-only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<ConfidenceLevel>,
    /// Scope the question was limited to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<PolicyScope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
}

impl ChatMessage {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use policyrag::chat::{ChatMessage, Role};
    ///
    /// let msg = ChatMessage::user("What is the PTO policy?");
    /// assert_eq!(msg.role, Role::User);
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
            citations: Vec::new(),
            confidence: None,
            scope: None,
            feedback: None,
        }
    }

    /// Creates a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            citations: Vec::new(),
            confidence: None,
            scope: None,
            feedback: None,
        }
    }

    /// Attach a policy scope to the message
    pub fn with_scope(mut self, scope: Option<PolicyScope>) -> Self {
        self.scope = scope;
        self
    }
}

/// Metadata for a chat session (no message bodies)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    /// Unique identifier, generated at creation, immutable
    pub id: String,
    /// User-facing title, mutable via rename
    pub title: String,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// When the session was last touched (rename, pin, count, preview)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    /// Number of messages ever appended to this session
    pub message_count: usize,
    pub is_pinned: bool,
    /// Collapsed, length-capped excerpt of the latest message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_preview: Option<String>,
}

impl ChatSession {
    /// Creates a fresh session with a new unique id and default title
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: DEFAULT_SESSION_TITLE.to_string(),
            created_at: now,
            last_updated: Some(now),
            message_count: 0,
            is_pinned: false,
            last_message_preview: None,
        }
    }

    /// Timestamp used for recency ordering: `last_updated`, falling back
    /// to `created_at` for records that never recorded an update
    pub fn sort_key(&self) -> DateTime<Utc> {
        self.last_updated.unwrap_or(self.created_at)
    }

    /// Title for display, substituting a fallback for blank titles
    ///
    /// The store keeps blank titles as stored; the fallback is purely
    /// presentational.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED_SESSION_TITLE
        } else {
            &self.title
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = ChatSession::new();
        assert_eq!(session.title, DEFAULT_SESSION_TITLE);
        assert_eq!(session.message_count, 0);
        assert!(!session.is_pinned);
        assert!(session.last_message_preview.is_none());
        assert_eq!(session.last_updated, Some(session.created_at));
    }

    #[test]
    fn test_sort_key_falls_back_to_created_at() {
        let mut session = ChatSession::new();
        session.last_updated = None;
        assert_eq!(session.sort_key(), session.created_at);
    }

    #[test]
    fn test_display_title_substitutes_fallback_for_blank() {
        let mut session = ChatSession::new();
        session.title = "   ".to_string();
        assert_eq!(session.display_title(), UNTITLED_SESSION_TITLE);

        session.title = "Expenses".to_string();
        assert_eq!(session.display_title(), "Expenses");
    }

    #[test]
    fn test_user_message_constructor() {
        let msg = ChatMessage::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Hello");
        assert!(msg.citations.is_empty());
        assert!(msg.confidence.is_none());
        assert!(msg.feedback.is_none());
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = ChatMessage::user("a");
        let b = ChatMessage::user("b");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_feedback_parse_str() {
        assert_eq!(Feedback::parse_str("helpful").unwrap(), Feedback::Helpful);
        assert_eq!(
            Feedback::parse_str("Incorrect").unwrap(),
            Feedback::Incorrect
        );
        assert_eq!(
            Feedback::parse_str("needs-clarification").unwrap(),
            Feedback::NeedsClarification
        );
        assert!(Feedback::parse_str("meh").is_err());
    }

    #[test]
    fn test_feedback_serializes_kebab_case() {
        let json = serde_json::to_string(&Feedback::NeedsClarification).unwrap();
        assert_eq!(json, "\"needs-clarification\"");
    }

    #[test]
    fn test_message_round_trips_camel_case_json() {
        let mut msg = ChatMessage::assistant("Answer");
        msg.confidence = Some(ConfidenceLevel::Medium);
        msg.citations.push(PolicyCitation {
            id: "c-1".to_string(),
            policy_name: "Travel and Expense Policy".to_string(),
            section: "Section 4.1".to_string(),
            version: "1.8".to_string(),
            page_number: Some(3),
            excerpt: "Receipts are required".to_string(),
            document_url: "#".to_string(),
        });

        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"policyName\""));
        assert!(json.contains("\"pageNumber\":3"));

        let back: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back.role, Role::Assistant);
        assert_eq!(back.citations.len(), 1);
        assert_eq!(back.confidence, Some(ConfidenceLevel::Medium));
    }

    #[test]
    fn test_session_round_trips_camel_case_json() {
        let session = ChatSession::new();
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"messageCount\":0"));

        let back: ChatSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, session.id);
        assert_eq!(back.created_at, session.created_at);
    }

    #[test]
    fn test_session_without_last_updated_deserializes() {
        let json = r#"{"id":"s-1","title":"Old","createdAt":"2024-01-15T00:00:00Z","messageCount":2,"isPinned":false}"#;
        let session: ChatSession = serde_json::from_str(json).unwrap();
        assert!(session.last_updated.is_none());
        assert_eq!(session.sort_key(), session.created_at);
    }
}
