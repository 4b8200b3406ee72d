//! Canned demo assistant
//!
//! Stands in for a real retrieval-augmented pipeline: answers are chosen
//! by keyword, citations point into the demo policy catalog, and a short
//! artificial delay simulates the remote call. The delay is cosmetic and
//! carries no cancellation or retry semantics.

use crate::chat::{ChatMessage, ConfidenceLevel, PolicyCitation};
use crate::policy::PolicyScope;
use std::time::Duration;

/// Default simulated response delay in milliseconds
pub const DEFAULT_RESPONSE_DELAY_MS: u64 = 800;

/// Generator of canned policy answers
#[derive(Debug, Clone)]
pub struct DemoAssistant {
    delay: Duration,
}

impl DemoAssistant {
    /// Create an assistant with the given simulated delay
    ///
    /// # Examples
    ///
    /// ```
    /// use policyrag::assistant::DemoAssistant;
    ///
    /// let assistant = DemoAssistant::new(0);
    /// ```
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
        }
    }

    /// Produce the canned answer for `question` after the simulated delay
    ///
    /// The returned message is a complete assistant record: content,
    /// confidence, citations, and the scope the question was limited to.
    pub async fn respond(&self, question: &str, scope: Option<PolicyScope>) -> ChatMessage {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let template = route(question);

        let mut message = ChatMessage::assistant(template.content).with_scope(scope);
        message.confidence = Some(template.confidence);
        message.citations = template.citations();
        message
    }
}

impl Default for DemoAssistant {
    fn default() -> Self {
        Self::new(DEFAULT_RESPONSE_DELAY_MS)
    }
}

struct ResponseTemplate {
    content: &'static str,
    confidence: ConfidenceLevel,
    citations: fn() -> Vec<PolicyCitation>,
}

impl ResponseTemplate {
    fn citations(&self) -> Vec<PolicyCitation> {
        (self.citations)()
    }
}

static PTO_RESPONSE: ResponseTemplate = ResponseTemplate {
    content: "Full-time employees receive 20 days of paid time off per year, accrued \
              monthly. PTO requests must be submitted at least 2 weeks in advance.",
    confidence: ConfidenceLevel::High,
    citations: pto_citations,
};

static PASSWORD_RESPONSE: ResponseTemplate = ResponseTemplate {
    content: "Passwords must be at least 12 characters long, changed every 90 days, \
              and MFA is mandatory.",
    confidence: ConfidenceLevel::High,
    citations: password_citations,
};

static EXPENSE_RESPONSE: ResponseTemplate = ResponseTemplate {
    content: "Expense reports must be submitted within 30 days. Receipts are required \
              for expenses over $25.",
    confidence: ConfidenceLevel::Medium,
    citations: expense_citations,
};

static DEFAULT_RESPONSE: ResponseTemplate = ResponseTemplate {
    content: "Based on our company policies, I can help you with questions about HR, \
              IT, Finance, and Security policies.",
    confidence: ConfidenceLevel::High,
    citations: Vec::new,
};

fn pto_citations() -> Vec<PolicyCitation> {
    vec![PolicyCitation {
        id: "cit-pto-1".to_string(),
        policy_name: "Employee Time Off Policy".to_string(),
        section: "Section 3.2, Accrual and Requests".to_string(),
        version: "2.1".to_string(),
        page_number: Some(4),
        excerpt: "Paid time off accrues monthly at a rate of 1.67 days per month of \
                  active employment."
            .to_string(),
        document_url: "#".to_string(),
    }]
}

fn password_citations() -> Vec<PolicyCitation> {
    vec![PolicyCitation {
        id: "cit-sec-1".to_string(),
        policy_name: "Information Security Policy".to_string(),
        section: "Section 5.1, Credential Requirements".to_string(),
        version: "3.0".to_string(),
        page_number: Some(11),
        excerpt: "All passwords must contain a minimum of 12 characters and be rotated \
                  on a 90-day cycle."
            .to_string(),
        document_url: "#".to_string(),
    }]
}

fn expense_citations() -> Vec<PolicyCitation> {
    vec![PolicyCitation {
        id: "cit-fin-1".to_string(),
        policy_name: "Travel and Expense Policy".to_string(),
        section: "Section 2.4, Reimbursement".to_string(),
        version: "1.8".to_string(),
        page_number: Some(7),
        excerpt: "Itemized receipts are required for any single expense exceeding $25."
            .to_string(),
        document_url: "#".to_string(),
    }]
}

/// Pick the canned template for a question by keyword
fn route(question: &str) -> &'static ResponseTemplate {
    let lower = question.to_lowercase();

    if lower.contains("pto") || lower.contains("vacation") {
        &PTO_RESPONSE
    } else if lower.contains("password") || lower.contains("mfa") {
        &PASSWORD_RESPONSE
    } else if lower.contains("expense") || lower.contains("receipt") {
        &EXPENSE_RESPONSE
    } else {
        &DEFAULT_RESPONSE
    }
}
