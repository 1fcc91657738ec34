#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    TransferInternal,
    TransferExternal,
    P2pSend,
    BillPay,
    BlockCard,
    ReplaceCard,
    DisputeTransaction,
    /// No banking-backend counterpart in the mock (loans, investments,
    /// security, onboarding, …); acknowledged and completed synchronously.
    Generic,
}

/// `intentId -> (operationId, OperationKind)` from spec.md §4.8. `operationId`
/// is the intent id itself; kept as a separate lookup (not a raw identity
/// function) because a future catalog could fan multiple intents into one
/// shared operation.
const TABLE: &[(&str, OperationKind)] = &[
    ("payments.transfer.internal", OperationKind::TransferInternal),
    ("payments.transfer.external", OperationKind::TransferExternal),
    ("international.wire.send", OperationKind::TransferExternal),
    ("payments.p2p.send", OperationKind::P2pSend),
    ("payments.bill.pay", OperationKind::BillPay),
    ("payments.bill.schedule", OperationKind::BillPay),
    ("payments.recurring.setup", OperationKind::Generic),
    ("cards.block.temporary", OperationKind::BlockCard),
    ("cards.replace.lost", OperationKind::ReplaceCard),
    ("cards.activate", OperationKind::Generic),
    ("cards.pin.change", OperationKind::Generic),
    ("cards.limit.increase", OperationKind::Generic),
    ("disputes.transaction.initiate", OperationKind::DisputeTransaction),
    ("accounts.alerts.setup", OperationKind::Generic),
    ("accounts.close.request", OperationKind::Generic),
    ("accounts.statement.download", OperationKind::Generic),
    ("lending.apply.personal", OperationKind::Generic),
    ("lending.apply.mortgage", OperationKind::Generic),
    ("lending.payment.make", OperationKind::TransferInternal),
    ("investments.buy.stock", OperationKind::Generic),
    ("investments.sell.stock", OperationKind::Generic),
    ("authentication.login", OperationKind::Generic),
    ("authentication.logout", OperationKind::Generic),
    ("profile.update.contact", OperationKind::Generic),
    ("security.password.reset", OperationKind::Generic),
    ("security.2fa.setup", OperationKind::Generic),
    ("onboarding.account.open", OperationKind::Generic),
    ("business.account.open", OperationKind::Generic),
    ("cash.deposit.schedule", OperationKind::Generic),
];

/// `None` means the intent has no C8 operation — purely informational
/// intents (balance checks, statement views, searches) never reach here
/// because the orchestrator's executable gate (spec.md §4.9) filters them
/// out before calling `execute`.
pub fn operation_id_for_intent(intent_id: &str) -> Option<&'static str> {
    TABLE.iter().find(|(id, _)| *id == intent_id).map(|(id, _)| *id)
}

pub fn kind_for_operation(operation_id: &str) -> OperationKind {
    TABLE.iter().find(|(id, _)| *id == operation_id).map(|(_, kind)| *kind).unwrap_or(OperationKind::Generic)
}
