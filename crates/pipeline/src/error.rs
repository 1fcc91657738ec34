use thiserror::Error;

/// Boundary error taxonomy — spec.md §7. Most kinds are recovered locally
/// (missing info suspends into clarification, confirmation required writes
/// a pending approval, ...) and never reach a caller as a `CoreError`; this
/// enum exists for the handful of kinds that do surface as `TurnStatus::Error`
/// with a typed reason instead of an ad hoc string.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("input rejected: {0}")]
    InputRejected(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("approval expired, please start the request again")]
    ApprovalExpired,
    #[error("maximum verification attempts reached, please start the request again")]
    ApprovalMaxAttempts,
    #[error("internal error: {0}")]
    Internal(String),
}
