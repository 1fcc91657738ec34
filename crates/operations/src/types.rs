use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
    RequiresApproval,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult {
    pub status: OperationStatus,
    pub data: serde_json::Value,
    pub message: String,
    pub reference_id: Option<String>,
    pub next_steps: Option<Vec<String>>,
    pub ui_hints: Option<serde_json::Value>,
}

impl OperationResult {
    pub fn pending(missing: Vec<String>) -> Self {
        Self {
            status: OperationStatus::Pending,
            data: serde_json::json!({ "missing": missing }),
            message: "additional information is required to complete this request".to_string(),
            reference_id: None,
            next_steps: None,
            ui_hints: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: OperationStatus::Failed,
            data: serde_json::Value::Null,
            message: message.into(),
            reference_id: None,
            next_steps: None,
            ui_hints: None,
        }
    }
}

/// Subset of `request.userProfile` (spec.md §6.1) operations need.
#[derive(Debug, Clone, Default)]
pub struct UserContext {
    pub user_id: Option<String>,
    pub auth_level: Option<String>,
    pub available_balance: Option<f64>,
}
