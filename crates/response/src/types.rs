use cba_catalog::{AuthLevel, RiskLevel};
use serde::{Deserialize, Serialize};

/// The subset of `cba-classifier::ClassifyResult` the response generator
/// needs — kept narrow so this crate doesn't depend on the classifier.
#[derive(Debug, Clone)]
pub struct IntentMeta {
    pub id: String,
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub risk_level: RiskLevel,
    pub auth_required: AuthLevel,
    pub required_entities: Vec<String>,
    pub optional_entities: Vec<String>,
    pub preconditions: Vec<String>,
    pub daily_limit: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user_id: String,
    pub auth_level: AuthLevel,
    pub available_balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    Success,
    ConfirmationNeeded,
    MissingInfo,
    AuthRequired,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthChallenge {
    pub required_level: AuthLevel,
    pub methods: Vec<String>,
    pub timeout: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreconditionStatus {
    Passed,
    Failed,
    Pending,
    NotApplicable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreconditionResult {
    pub name: String,
    pub status: PreconditionStatus,
    pub message: Option<String>,
    pub action_required: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedResponse {
    pub response_type: ResponseType,
    pub message: String,
    pub missing_required: Vec<String>,
    pub follow_up_questions: Vec<String>,
    pub auth_challenge: Option<AuthChallenge>,
    pub preconditions: Vec<PreconditionResult>,
    pub risk_warning: Option<String>,
}
