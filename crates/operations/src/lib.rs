//! Operations Catalog (C8) — spec.md §4.8. A static `operationId ->
//! Operation` table plus the `intentId -> operationId` mapping, and
//! `execute`, which validates required entities against the intent catalog
//! before calling into the `Banking` collaborator (the mock).

mod dispatch;
mod entities;
mod types;

use cba_catalog::IntentCatalog;
use cba_mock::Banking;

pub use dispatch::operation_id_for_intent;
pub use types::{OperationResult, OperationStatus, UserContext};

use dispatch::{kind_for_operation, OperationKind};

fn missing_required(catalog: &IntentCatalog, operation_id: &str, entities: &serde_json::Value) -> Option<Vec<String>> {
    let intent = catalog.get(operation_id)?;
    let missing: Vec<String> = intent
        .required_entities
        .iter()
        .filter(|key| entities::raw(entities, key).is_none())
        .cloned()
        .collect();
    Some(missing)
}

/// Validates required entities (returning `pending` with the missing list
/// if any), then dispatches to the banking backend. All branches are
/// deterministic functions of `entities` apart from the banking backend's
/// own reference-id generation, satisfying spec.md §4.8's idempotency note.
pub async fn execute(
    banking: &dyn Banking,
    catalog: &IntentCatalog,
    operation_id: &str,
    entities: &serde_json::Value,
    user_context: Option<&UserContext>,
) -> OperationResult {
    let Some(missing) = missing_required(catalog, operation_id, entities) else {
        tracing::warn!(operation_id, "execute called for an operation absent from the catalog");
        return OperationResult::failed(format!("unknown operation '{operation_id}'"));
    };
    if !missing.is_empty() {
        tracing::debug!(operation_id, ?missing, "operation pending required entities");
        return OperationResult::pending(missing);
    }

    match kind_for_operation(operation_id) {
        OperationKind::TransferInternal => transfer_internal(banking, entities).await,
        OperationKind::TransferExternal => transfer_external(banking, entities).await,
        OperationKind::P2pSend => p2p_send(banking, entities).await,
        OperationKind::BillPay => bill_pay(banking, entities).await,
        OperationKind::BlockCard => block_card(banking, entities).await,
        OperationKind::ReplaceCard => replace_card(banking, entities).await,
        OperationKind::DisputeTransaction => dispute_transaction(banking, entities).await,
        OperationKind::Generic => generic(operation_id, entities, user_context),
    }
}

async fn transfer_internal(banking: &dyn Banking, entities: &serde_json::Value) -> OperationResult {
    let amount = entities::f64_value(entities, "amount").unwrap_or(0.0);
    let from = entities::resolved_id(entities, "from_account").unwrap_or_default();
    let to = entities::resolved_id(entities, "to_account").unwrap_or_default();

    let result = banking.transfer_funds(&from, &to, amount).await;
    from_transfer_execution(result)
}

async fn transfer_external(banking: &dyn Banking, entities: &serde_json::Value) -> OperationResult {
    let amount = entities::f64_value(entities, "amount").unwrap_or(0.0);
    let from = entities::resolved_id(entities, "from_account").unwrap_or_else(|| "CHK001".to_string());
    let to = entities::resolved_id(entities, "recipient_account")
        .or_else(|| entities::resolved_id(entities, "recipient"))
        .unwrap_or_default();

    let result = banking.execute_transfer(&from, &to, amount, None).await;
    from_transfer_execution(result)
}

async fn p2p_send(banking: &dyn Banking, entities: &serde_json::Value) -> OperationResult {
    let amount = entities::f64_value(entities, "amount").unwrap_or(0.0);
    let from = entities::resolved_id(entities, "from_account").unwrap_or_else(|| "CHK001".to_string());
    let to = entities::resolved_id(entities, "recipient").unwrap_or_default();

    let result = banking.execute_transfer(&from, &to, amount, None).await;
    from_transfer_execution(result)
}

fn from_transfer_execution(result: cba_mock::TransferExecution) -> OperationResult {
    OperationResult {
        status: if !result.success && result.requires_approval {
            OperationStatus::RequiresApproval
        } else if result.success {
            OperationStatus::Completed
        } else {
            OperationStatus::Failed
        },
        data: serde_json::json!({ "requiresApproval": result.requires_approval }),
        message: result.message,
        reference_id: result.reference_id,
        next_steps: None,
        ui_hints: None,
    }
}

async fn bill_pay(banking: &dyn Banking, entities: &serde_json::Value) -> OperationResult {
    let amount = entities::f64_value(entities, "amount").unwrap_or(0.0);
    let from = entities::resolved_id(entities, "account_id").unwrap_or_else(|| "CHK001".to_string());
    let payee = entities::str_value(entities, "payee").unwrap_or_else(|| "payee".to_string());

    let result = banking.send_payment(&from, &payee, amount).await;
    OperationResult {
        status: if result.success { OperationStatus::Completed } else { OperationStatus::Failed },
        data: serde_json::json!({ "requiresApproval": result.requires_approval }),
        message: result.message,
        reference_id: result.reference_id,
        next_steps: None,
        ui_hints: None,
    }
}

async fn block_card(banking: &dyn Banking, entities: &serde_json::Value) -> OperationResult {
    let card_id = entities::str_value(entities, "card_identifier").unwrap_or_default();
    let reason = entities::str_value(entities, "reason").unwrap_or_else(|| "customer request".to_string());

    let result = banking.block_card(&card_id, &reason).await;
    OperationResult {
        status: if result.success { OperationStatus::Completed } else { OperationStatus::Failed },
        data: serde_json::json!({ "cardId": result.card_id }),
        message: result.message,
        reference_id: None,
        next_steps: Some(vec!["a replacement card can be requested from this conversation".to_string()]),
        ui_hints: None,
    }
}

/// The mock has no standalone card-replacement path; a replacement is
/// modeled as blocking the lost card and minting a new card id.
async fn replace_card(banking: &dyn Banking, entities: &serde_json::Value) -> OperationResult {
    let card_id = entities::str_value(entities, "card_id").unwrap_or_default();
    let block = banking.block_card(&card_id, "lost or stolen").await;
    if !block.success {
        return OperationResult::failed(block.message);
    }
    OperationResult {
        status: OperationStatus::Completed,
        data: serde_json::json!({ "replacesCardId": card_id }),
        message: format!("{card_id} blocked; a replacement is on its way"),
        reference_id: Some(format!("REP-{card_id}")),
        next_steps: Some(vec!["allow 5-7 business days for delivery".to_string()]),
        ui_hints: None,
    }
}

async fn dispute_transaction(banking: &dyn Banking, entities: &serde_json::Value) -> OperationResult {
    let transaction_id = entities::str_value(entities, "transaction_id").unwrap_or_default();
    let reason = entities::str_value(entities, "reason").unwrap_or_else(|| "unrecognized transaction".to_string());

    let result = banking.dispute_transaction(&transaction_id, &reason).await;
    OperationResult {
        status: if result.success { OperationStatus::Completed } else { OperationStatus::Failed },
        data: serde_json::json!({ "transactionId": transaction_id }),
        message: result.message,
        reference_id: result.dispute_id,
        next_steps: result.success.then(|| vec!["a provisional credit may post within 10 business days".to_string()]),
        ui_hints: None,
    }
}

/// Every other executable intent in the catalog (loans, investments,
/// security, onboarding, …) has no mock banking counterpart. Acknowledged
/// as `completed` with a synthetic reference id, per spec.md §1's scoping
/// of the real back-office integration out of the core.
fn generic(operation_id: &str, entities: &serde_json::Value, user_context: Option<&UserContext>) -> OperationResult {
    let user_id = user_context.and_then(|ctx| ctx.user_id.clone()).unwrap_or_else(|| "anonymous".to_string());
    let digest = operation_id.len() + entities.to_string().len() + user_id.len();
    OperationResult {
        status: OperationStatus::Completed,
        data: serde_json::json!({ "operationId": operation_id }),
        message: format!("{operation_id} request received and is being processed"),
        reference_id: Some(format!("REQ-{digest:06}")),
        next_steps: None,
        ui_hints: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cba_mock::MockBankingService;

    fn catalog() -> IntentCatalog {
        IntentCatalog::new()
    }

    #[tokio::test]
    async fn missing_required_entities_yields_pending() {
        let bank = MockBankingService::new();
        let result = execute(&bank, &catalog(), "payments.transfer.internal", &serde_json::json!({}), None).await;
        assert_eq!(result.status, OperationStatus::Pending);
        assert!(result.data["missing"].as_array().unwrap().contains(&serde_json::json!("amount")));
    }

    #[tokio::test]
    async fn internal_transfer_executes_against_mock_banking() {
        let bank = MockBankingService::new();
        let entities = serde_json::json!({
            "amount": 250.0,
            "from_account": "CHK001",
            "to_account": "SAV001",
        });
        let result = execute(&bank, &catalog(), "payments.transfer.internal", &entities, None).await;
        assert_eq!(result.status, OperationStatus::Completed);
        assert!(result.reference_id.is_some());
    }

    #[tokio::test]
    async fn large_external_transfer_requires_approval() {
        let bank = MockBankingService::new();
        let entities = serde_json::json!({
            "amount": 15_000.0,
            "recipient_account": "RCP001",
            "recipient_name": "John Smith",
        });
        let result = execute(&bank, &catalog(), "payments.transfer.external", &entities, None).await;
        assert_eq!(result.status, OperationStatus::RequiresApproval);
    }

    #[tokio::test]
    async fn block_card_uses_enriched_entity_shape() {
        let bank = MockBankingService::new();
        let entities = serde_json::json!({ "card_identifier": { "value": "CRD001", "enriched_record": null } });
        let result = execute(&bank, &catalog(), "cards.block.temporary", &entities, None).await;
        assert_eq!(result.status, OperationStatus::Completed);
    }

    #[tokio::test]
    async fn generic_operation_completes_without_banking_call() {
        let bank = MockBankingService::new();
        let entities = serde_json::json!({ "username": "alice", "new_password": "s3cret!" });
        let result = execute(&bank, &catalog(), "security.password.reset", &entities, None).await;
        assert_eq!(result.status, OperationStatus::Completed);
        assert!(result.reference_id.is_some());
    }

    #[tokio::test]
    async fn unknown_operation_fails() {
        let bank = MockBankingService::new();
        let result = execute(&bank, &catalog(), "nonexistent.intent", &serde_json::json!({}), None).await;
        assert_eq!(result.status, OperationStatus::Failed);
    }
}
