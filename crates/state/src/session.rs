use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::refs::resolve_references as resolve_references_impl;

pub const HISTORY_LIMIT: usize = 10;
const APPROVAL_TTL_SECS: i64 = 300;
const APPROVAL_MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub original: String,
    pub resolved: String,
    pub intent: String,
    pub confidence: f64,
    pub entities: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingClarification {
    pub original_intent: String,
    pub original_entities: serde_json::Value,
    pub missing_entities: Vec<String>,
    pub options: Vec<String>,
    pub awaiting_response: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingApproval {
    pub transaction_type: String,
    pub amount: f64,
    pub details: serde_json::Value,
    pub approval_method: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub attempts: u32,
    pub max_attempts: u32,
}

impl PendingApproval {
    pub fn new(transaction_type: impl Into<String>, amount: f64, details: serde_json::Value, approval_method: impl Into<String>, token: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            transaction_type: transaction_type.into(),
            amount,
            details,
            approval_method: approval_method.into(),
            token: token.into(),
            created_at: now,
            expires_at: now + Duration::seconds(APPROVAL_TTL_SECS),
            attempts: 0,
            max_attempts: APPROVAL_MAX_ATTEMPTS,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: String,
    pub history: Vec<HistoryEntry>,
    pub last_recipient: Option<String>,
    pub last_recipient_id: Option<String>,
    pub last_amount: Option<f64>,
    pub last_account: Option<String>,
    pub last_account_id: Option<String>,
    pub last_intent: Option<String>,
    pub pending_clarification: Option<PendingClarification>,
    pub pending_approval: Option<PendingApproval>,
    pub created_at: DateTime<Utc>,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            history: Vec::new(),
            last_recipient: None,
            last_recipient_id: None,
            last_amount: None,
            last_account: None,
            last_account_id: None,
            last_intent: None,
            pending_clarification: None,
            pending_approval: None,
            created_at: Utc::now(),
        }
    }

    pub fn resolve_references(&self, utterance: &str) -> String {
        resolve_references_impl(utterance, self.last_recipient.as_deref(), self.last_amount, self.last_account.as_deref())
    }

    pub fn push_history(&mut self, entry: HistoryEntry) {
        self.history.push(entry);
        if self.history.len() > HISTORY_LIMIT {
            let overflow = self.history.len() - HISTORY_LIMIT;
            self.history.drain(0..overflow);
        }
    }

    /// Setting a clarification clears any approval, and vice versa —
    /// spec.md §4.7's invariant that at most one is active per session.
    pub fn set_pending_clarification(&mut self, clarification: PendingClarification) {
        self.pending_approval = None;
        self.pending_clarification = Some(clarification);
    }

    pub fn clear_pending_clarification(&mut self) {
        self.pending_clarification = None;
    }

    pub fn set_pending_approval(&mut self, approval: PendingApproval) {
        self.pending_clarification = None;
        self.pending_approval = Some(approval);
    }

    /// Returns `None` when expired, clearing the slot as a side effect.
    pub fn get_pending_approval(&mut self) -> Option<&PendingApproval> {
        if let Some(approval) = &self.pending_approval {
            if approval.is_expired() {
                self.pending_approval = None;
            }
        }
        self.pending_approval.as_ref()
    }

    /// Matches a user's answer to a disambiguation's `options` by numeric
    /// index, ordinal word, or exact/substring name — spec.md §4.7.
    pub fn resolve_clarification(response: &str, options: &[String]) -> Option<usize> {
        let normalized = response.trim().to_lowercase();

        if let Ok(index) = normalized.parse::<usize>() {
            if index >= 1 && index <= options.len() {
                return Some(index - 1);
            }
        }
        if let Some(rest) = normalized.strip_prefix("option ") {
            if let Ok(index) = rest.trim().parse::<usize>() {
                if index >= 1 && index <= options.len() {
                    return Some(index - 1);
                }
            }
        }
        const ORDINALS: &[&str] = &["first", "second", "third", "fourth", "fifth"];
        if let Some(position) = ORDINALS.iter().position(|ord| *ord == normalized) {
            if position < options.len() {
                return Some(position);
            }
        }

        let exact: Vec<usize> = options.iter().enumerate().filter(|(_, opt)| opt.to_lowercase() == normalized).map(|(i, _)| i).collect();
        if exact.len() == 1 {
            return Some(exact[0]);
        }

        let substring: Vec<usize> = options.iter().enumerate().filter(|(_, opt)| opt.to_lowercase().contains(&normalized)).map(|(i, _)| i).collect();
        if substring.len() == 1 {
            return Some(substring[0]);
        }

        None
    }

    /// Verifies a pending approval, incrementing `attempts` and clearing
    /// the slot on success or once the max is reached — spec.md §4.7.
    /// Method/answer values (`"1234"`, `"mockAnswer123"`) are mock values
    /// by design.
    pub fn verify_approval(&mut self, biometric_success: Option<bool>, pin: Option<&str>, security_answer: Option<&str>) -> bool {
        let Some(approval) = self.pending_approval.as_mut() else { return false };
        if approval.is_expired() {
            self.pending_approval = None;
            return false;
        }

        approval.attempts += 1;
        let verified = match approval.approval_method.as_str() {
            "biometric" => biometric_success == Some(true),
            "pin" => pin == Some("1234"),
            "security_question" => security_answer == Some("mockAnswer123"),
            "biometric_and_pin" => biometric_success == Some(true) && pin == Some("1234"),
            _ => false,
        };

        if verified || approval.attempts >= approval.max_attempts {
            self.pending_approval = None;
        }
        verified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_is_bounded_to_ten_entries() {
        let mut ctx = SessionContext::new("s1");
        for i in 0..15 {
            ctx.push_history(HistoryEntry {
                timestamp: Utc::now(),
                original: format!("turn {i}"),
                resolved: format!("turn {i}"),
                intent: "accounts.balance.check".to_string(),
                confidence: 0.9,
                entities: serde_json::json!({}),
            });
        }
        assert_eq!(ctx.history.len(), HISTORY_LIMIT);
        assert_eq!(ctx.history[0].original, "turn 5");
    }

    #[test]
    fn setting_clarification_clears_approval() {
        let mut ctx = SessionContext::new("s1");
        ctx.set_pending_approval(PendingApproval::new("transfer", 100.0, serde_json::json!({}), "pin", "APV-000001"));
        ctx.set_pending_clarification(PendingClarification {
            original_intent: "payments.p2p.send".to_string(),
            original_entities: serde_json::json!({}),
            missing_entities: vec!["recipient".to_string()],
            options: vec![],
            awaiting_response: true,
            created_at: Utc::now(),
        });
        assert!(ctx.pending_approval.is_none());
        assert!(ctx.pending_clarification.is_some());
    }

    #[test]
    fn resolve_clarification_matches_numeric_and_ordinal() {
        let options = vec!["John Smith".to_string(), "John Doe".to_string()];
        assert_eq!(SessionContext::resolve_clarification("2", &options), Some(1));
        assert_eq!(SessionContext::resolve_clarification("first", &options), Some(0));
        assert_eq!(SessionContext::resolve_clarification("option 2", &options), Some(1));
        assert_eq!(SessionContext::resolve_clarification("smith", &options), Some(0));
        assert_eq!(SessionContext::resolve_clarification("john", &options), None);
    }

    #[test]
    fn verify_approval_succeeds_on_correct_pin() {
        let mut ctx = SessionContext::new("s1");
        ctx.set_pending_approval(PendingApproval::new("transfer", 100.0, serde_json::json!({}), "pin", "APV-000001"));
        assert!(ctx.verify_approval(None, Some("1234"), None));
        assert!(ctx.pending_approval.is_none());
    }

    #[test]
    fn verify_approval_clears_after_max_attempts() {
        let mut ctx = SessionContext::new("s1");
        ctx.set_pending_approval(PendingApproval::new("transfer", 100.0, serde_json::json!({}), "pin", "APV-000001"));
        assert!(!ctx.verify_approval(None, Some("0000"), None));
        assert!(!ctx.verify_approval(None, Some("0000"), None));
        assert!(ctx.pending_approval.is_some());
        assert!(!ctx.verify_approval(None, Some("0000"), None));
        assert!(ctx.pending_approval.is_none());
    }
}
