use cba_catalog::AuthLevel;
use cba_operations::OperationResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiContext {
    Banking,
    Transaction,
    Chat,
}

/// `request.userProfile` — spec.md §6.1.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfileInput {
    pub user_id: String,
    pub auth_level: AuthLevel,
    pub available_balance: f64,
}

/// `request.verificationData` — spec.md §4.7/§6.2's `VerifyApproval`. Mock
/// values by design (`"1234"`, `"mockAnswer123"`), mirroring
/// `cba_mock::VerificationData`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerificationPayload {
    pub pin: Option<String>,
    pub security_answer: Option<String>,
    pub biometric_success: Option<bool>,
}

/// `Process(ctx, request)`'s `request` — spec.md §6.1.
#[derive(Debug, Clone, Deserialize)]
pub struct TurnRequest {
    pub query: String,
    pub session_id: Option<String>,
    #[serde(default)]
    pub skip_resolution: bool,
    pub ui_context: Option<UiContext>,
    pub user_profile: Option<UserProfileInput>,
    #[serde(default)]
    pub verification_data: Option<VerificationPayload>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnStatus {
    Success,
    ConfirmationNeeded,
    ClarificationNeeded,
    AuthRequired,
    Info,
    Cancelled,
    Error,
}

/// `Process(ctx, request)`'s `response` — spec.md §6.1.
#[derive(Debug, Clone, Serialize)]
pub struct TurnResponse {
    pub status: TurnStatus,
    pub session_id: String,
    pub intent: Option<String>,
    pub confidence: f64,
    pub entities: serde_json::Value,
    pub message: String,
    pub ui_assistance: Option<serde_json::Value>,
    pub execution: Option<OperationResult>,
    pub processing_time_ms: u64,
    pub requires_confirmation: bool,
    pub pending_clarification: Option<PendingClarificationView>,
    pub approval: Option<ApprovalView>,
    pub next_steps: Option<Vec<String>>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PendingClarificationView {
    pub missing_entities: Vec<String>,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApprovalView {
    pub approval_method: String,
    pub expires_in_secs: i64,
}
