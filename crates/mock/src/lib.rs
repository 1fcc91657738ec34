mod seed;
mod types;

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use rand::Rng;

pub use types::{
    Account, AccountType, ApprovalMethod, ApprovalRequest, CardBlockResult, DisputeResult,
    PaymentExecution, Recipient, Transaction, TransferExecution, TransferType, TransferValidation,
    VerificationData,
};

/// External collaborator contract from spec.md §6.3 (`Banking.*`). The core
/// depends only on this trait; `MockBankingService` is the only
/// implementation shipped here — a real core-banking adapter is out of
/// scope per spec.md §1.
#[async_trait]
pub trait Banking: Send + Sync {
    async fn get_balance(&self, account_id: &str) -> Option<f64>;
    async fn get_account(&self, account_id: &str) -> Option<Account>;
    async fn get_account_by_type(&self, account_type: AccountType) -> Option<Account>;
    async fn get_all_accounts(&self) -> Vec<Account>;
    async fn search_recipients(&self, query: &str) -> Vec<Recipient>;
    async fn get_recipient_by_id(&self, id: &str) -> Option<Recipient>;
    async fn get_transaction_history(&self, account_id: &str, limit: usize) -> Vec<Transaction>;
    async fn search_transactions(&self, query: &str) -> Vec<Transaction>;
    async fn validate_transfer(&self, from_account: &str, to: &str, amount: f64) -> TransferValidation;
    async fn transfer_funds(&self, from_account: &str, to_account: &str, amount: f64) -> TransferExecution;
    async fn execute_transfer(
        &self,
        from_account: &str,
        recipient_id: &str,
        amount: f64,
        approval_token: Option<&str>,
    ) -> TransferExecution;
    async fn request_transaction_approval(&self, transaction_type: &str, amount: f64) -> ApprovalRequest;
    async fn verify_transaction_approval(&self, token: &str, data: &VerificationData) -> bool;
    /// Bill-pay/merchant payment, distinct from peer `TransferFunds` only in
    /// bookkeeping (spec.md §6.3); shares the same amount-range validation.
    async fn send_payment(&self, from_account: &str, payee: &str, amount: f64) -> PaymentExecution;
    async fn block_card(&self, card_id: &str, reason: &str) -> CardBlockResult;
    async fn dispute_transaction(&self, transaction_id: &str, reason: &str) -> DisputeResult;
    /// `home_bank` for `Recipient::transfer_type`; constant across the mock.
    fn home_bank(&self) -> &str;
}

fn approval_threshold(transaction_type: &str) -> f64 {
    match transaction_type {
        "transfer" => 10_000.0,
        "payment" => 5_000.0,
        "wire" => 5_000.0,
        "investment" => 25_000.0,
        _ => 10_000.0,
    }
}

/// Per spec.md §9's resolution of Open Question #3: this layer is
/// authoritative for approval-method selection.
fn approval_method_for_amount(amount: f64) -> ApprovalMethod {
    if amount > 50_000.0 {
        ApprovalMethod::BiometricAndPin
    } else if amount > 25_000.0 {
        ApprovalMethod::Biometric
    } else {
        ApprovalMethod::Pin
    }
}

const TRANSACTION_TEMPLATES: &[(&str, f64, &str)] = &[
    ("Grocery Store", -150.0, "debit"),
    ("Paycheck Deposit", 3500.0, "credit"),
    ("Rent", -1500.0, "debit"),
    ("Utilities", -200.0, "debit"),
    ("Restaurant", -85.0, "debit"),
    ("ATM Withdrawal", -200.0, "debit"),
    ("Online Transfer", 500.0, "credit"),
    ("Insurance", -300.0, "debit"),
    ("Gas Station", -65.0, "debit"),
    ("Coffee Shop", -12.50, "debit"),
];

fn generate_transaction_history(account_id: &str, starting_balance: f64) -> Vec<Transaction> {
    let mut rng = rand::thread_rng();
    let now = Utc::now();
    let mut rows: Vec<(i64, Transaction)> = Vec::with_capacity(20);
    let mut running_balance = starting_balance;

    for i in 0..20 {
        let (description, base_amount, kind) = TRANSACTION_TEMPLATES[i % TRANSACTION_TEMPLATES.len()];
        let variation = rng.gen_range(-0.20..=0.20);
        let amount = (base_amount * (1.0 + variation) * 100.0).round() / 100.0;
        let days_ago = rng.gen_range(0..=30);
        let date = (now - ChronoDuration::days(days_ago)).format("%Y-%m-%d").to_string();

        running_balance -= amount;
        rows.push((
            days_ago,
            Transaction {
                id: format!("TXN{:06}", rng.gen_range(0..1_000_000)),
                date,
                amount,
                description: description.to_string(),
                kind: kind.to_string(),
                account_id: account_id.to_string(),
                balance_after: (running_balance * 100.0).round() / 100.0,
            },
        ));
    }

    rows.sort_by_key(|(days_ago, _)| *days_ago);
    rows.into_iter().map(|(_, t)| t).collect()
}

struct Inner {
    accounts: Vec<Account>,
    recipients: Vec<Recipient>,
    transactions: HashMap<String, Vec<Transaction>>,
    pending_approvals: HashMap<String, (ApprovalMethod, f64)>,
}

/// In-memory banking backend used throughout the core's tests and demo
/// CLI. Grounded in `mock_banking.py`'s `MockBankingService`, including its
/// exact seed fixture data.
pub struct MockBankingService {
    inner: RwLock<Inner>,
}

impl MockBankingService {
    pub fn new() -> Self {
        let accounts = seed::seed_accounts();
        let mut transactions = HashMap::new();
        for account in &accounts {
            transactions.insert(account.id.clone(), generate_transaction_history(&account.id, account.balance));
        }

        Self {
            inner: RwLock::new(Inner {
                accounts,
                recipients: seed::seed_recipients(),
                transactions,
                pending_approvals: HashMap::new(),
            }),
        }
    }
}

impl Default for MockBankingService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Banking for MockBankingService {
    async fn get_balance(&self, account_id: &str) -> Option<f64> {
        self.inner.read().unwrap().accounts.iter().find(|a| a.id == account_id).map(|a| a.balance)
    }

    async fn get_account(&self, account_id: &str) -> Option<Account> {
        self.inner.read().unwrap().accounts.iter().find(|a| a.id == account_id).cloned()
    }

    async fn get_account_by_type(&self, account_type: AccountType) -> Option<Account> {
        self.inner.read().unwrap().accounts.iter().find(|a| a.account_type == account_type).cloned()
    }

    async fn get_all_accounts(&self) -> Vec<Account> {
        self.inner.read().unwrap().accounts.clone()
    }

    async fn search_recipients(&self, query: &str) -> Vec<Recipient> {
        let q = query.to_lowercase();
        self.inner
            .read()
            .unwrap()
            .recipients
            .iter()
            .filter(|r| {
                r.name.to_lowercase().contains(&q)
                    || r.alias.as_deref().map(|a| a.to_lowercase().contains(&q)).unwrap_or(false)
            })
            .cloned()
            .collect()
    }

    async fn get_recipient_by_id(&self, id: &str) -> Option<Recipient> {
        self.inner.read().unwrap().recipients.iter().find(|r| r.id == id).cloned()
    }

    async fn get_transaction_history(&self, account_id: &str, limit: usize) -> Vec<Transaction> {
        self.inner
            .read()
            .unwrap()
            .transactions
            .get(account_id)
            .map(|txns| txns.iter().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    async fn search_transactions(&self, query: &str) -> Vec<Transaction> {
        let q = query.to_lowercase();
        self.inner
            .read()
            .unwrap()
            .transactions
            .values()
            .flatten()
            .filter(|t| t.description.to_lowercase().contains(&q))
            .take(20)
            .cloned()
            .collect()
    }

    async fn validate_transfer(&self, from_account: &str, to: &str, amount: f64) -> TransferValidation {
        let inner = self.inner.read().unwrap();
        let Some(from) = inner.accounts.iter().find(|a| a.id == from_account) else {
            return TransferValidation { valid: false, reason: Some("source account not found".to_string()), estimated_fee: 0.0 };
        };
        if amount <= 0.0 {
            return TransferValidation { valid: false, reason: Some("amount must be positive".to_string()), estimated_fee: 0.0 };
        }
        if amount > from.balance {
            return TransferValidation { valid: false, reason: Some("insufficient funds".to_string()), estimated_fee: 0.0 };
        }
        let recipient_exists = inner.accounts.iter().any(|a| a.id == to) || inner.recipients.iter().any(|r| r.id == to);
        if !recipient_exists {
            return TransferValidation { valid: false, reason: Some("recipient not found".to_string()), estimated_fee: 0.0 };
        }
        TransferValidation { valid: true, reason: None, estimated_fee: 0.0 }
    }

    async fn transfer_funds(&self, from_account: &str, to_account: &str, amount: f64) -> TransferExecution {
        if amount <= 0.0 || amount > 50_000.0 {
            return TransferExecution {
                success: false,
                reference_id: None,
                requires_approval: false,
                message: "amount out of allowed range".to_string(),
            };
        }
        let date = Utc::now().format("%Y%m%d").to_string();
        let suffix = (from_account.len() * 7 + to_account.len() * 13 + amount as usize) % 10_000;
        TransferExecution {
            success: true,
            reference_id: Some(format!("TXN-{date}-{suffix:04}")),
            requires_approval: false,
            message: format!("transferred {amount:.2} from {from_account} to {to_account}"),
        }
    }

    async fn execute_transfer(
        &self,
        from_account: &str,
        recipient_id: &str,
        amount: f64,
        approval_token: Option<&str>,
    ) -> TransferExecution {
        if amount > 10_000.0 && approval_token.is_none() {
            return TransferExecution {
                success: false,
                reference_id: None,
                requires_approval: true,
                message: "approval required for transfers over $10,000".to_string(),
            };
        }
        self.transfer_funds(from_account, recipient_id, amount).await
    }

    async fn send_payment(&self, from_account: &str, payee: &str, amount: f64) -> PaymentExecution {
        let transfer = self.transfer_funds(from_account, payee, amount).await;
        PaymentExecution {
            success: transfer.success,
            reference_id: transfer.reference_id,
            requires_approval: transfer.requires_approval,
            message: if transfer.success {
                format!("paid {amount:.2} to {payee}")
            } else {
                transfer.message
            },
        }
    }

    async fn block_card(&self, card_id: &str, reason: &str) -> CardBlockResult {
        if card_id.trim().is_empty() {
            return CardBlockResult { success: false, card_id: card_id.to_string(), message: "card_id is required".to_string() };
        }
        CardBlockResult {
            success: true,
            card_id: card_id.to_string(),
            message: format!("card {card_id} blocked ({reason})"),
        }
    }

    async fn dispute_transaction(&self, transaction_id: &str, reason: &str) -> DisputeResult {
        let found = self
            .inner
            .read()
            .unwrap()
            .transactions
            .values()
            .flatten()
            .any(|t| t.id == transaction_id);
        if !found {
            return DisputeResult { success: false, dispute_id: None, message: format!("transaction {transaction_id} not found") };
        }
        let mut rng = rand::thread_rng();
        let dispute_id = format!("DSP-{:06}", rng.gen_range(0..1_000_000));
        DisputeResult {
            success: true,
            dispute_id: Some(dispute_id),
            message: format!("dispute opened for {transaction_id}: {reason}"),
        }
    }

    async fn request_transaction_approval(&self, transaction_type: &str, amount: f64) -> ApprovalRequest {
        let method = approval_method_for_amount(amount);
        let _ = approval_threshold(transaction_type);
        let mut rng = rand::thread_rng();
        let token = format!("APV-{:06}", rng.gen_range(0..1_000_000));
        self.inner.write().unwrap().pending_approvals.insert(token.clone(), (method, amount));
        ApprovalRequest { token, approval_method: method, expires_in_secs: 300 }
    }

    async fn verify_transaction_approval(&self, token: &str, data: &VerificationData) -> bool {
        let method = self.inner.read().unwrap().pending_approvals.get(token).map(|(m, _)| *m);
        let Some(method) = method else { return false };

        let ok = match method {
            ApprovalMethod::Biometric | ApprovalMethod::BiometricAndPin => {
                data.biometric_success.unwrap_or(false) || data.pin.as_deref() == Some("1234")
            }
            ApprovalMethod::Pin => data.pin.as_deref() == Some("1234"),
            ApprovalMethod::SecurityQuestion => data.security_answer.as_deref() == Some("mockAnswer123"),
        };

        if ok {
            self.inner.write().unwrap().pending_approvals.remove(token);
        }
        ok
    }

    fn home_bank(&self) -> &str {
        "Mock Bank"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_accounts_match_fixture() {
        let bank = MockBankingService::new();
        let accounts = bank.get_all_accounts().await;
        assert_eq!(accounts.len(), 3);
        assert_eq!(bank.get_balance("CHK001").await, Some(5000.0));
    }

    #[tokio::test]
    async fn recipient_search_is_case_insensitive_and_matches_alias() {
        let bank = MockBankingService::new();
        let found = bank.search_recipients("john").await;
        assert_eq!(found.len(), 2);
        let by_alias = bank.search_recipients("johnny").await;
        assert_eq!(by_alias.len(), 1);
        assert_eq!(by_alias[0].id, "RCP001");
    }

    #[tokio::test]
    async fn transfer_type_classifies_by_bank_and_country() {
        let bank = MockBankingService::new();
        let smith = bank.get_recipient_by_id("RCP001").await.unwrap();
        assert_eq!(smith.transfer_type(bank.home_bank()), TransferType::Internal);
        let sarah = bank.get_recipient_by_id("RCP004").await.unwrap();
        assert_eq!(sarah.transfer_type(bank.home_bank()), TransferType::Domestic);
        let jack = bank.get_recipient_by_id("RCP007").await.unwrap();
        assert_eq!(jack.transfer_type(bank.home_bank()), TransferType::International);
        assert!(jack.is_international());
    }

    #[tokio::test]
    async fn approval_method_escalates_with_amount() {
        let bank = MockBankingService::new();
        let low = bank.request_transaction_approval("transfer", 1000.0).await;
        assert_eq!(low.approval_method, ApprovalMethod::Pin);
        let mid = bank.request_transaction_approval("transfer", 30_000.0).await;
        assert_eq!(mid.approval_method, ApprovalMethod::Biometric);
        let high = bank.request_transaction_approval("transfer", 60_000.0).await;
        assert_eq!(high.approval_method, ApprovalMethod::BiometricAndPin);
        assert!(low.token.starts_with("APV-"));
    }

    #[tokio::test]
    async fn verify_approval_accepts_mock_pin_and_consumes_token() {
        let bank = MockBankingService::new();
        let req = bank.request_transaction_approval("transfer", 1000.0).await;
        let bad = VerificationData { pin: Some("0000".to_string()), ..Default::default() };
        assert!(!bank.verify_transaction_approval(&req.token, &bad).await);
        let good = VerificationData { pin: Some("1234".to_string()), ..Default::default() };
        assert!(bank.verify_transaction_approval(&req.token, &good).await);
        assert!(!bank.verify_transaction_approval(&req.token, &good).await);
    }

    #[tokio::test]
    async fn execute_transfer_requires_approval_above_ten_thousand() {
        let bank = MockBankingService::new();
        let result = bank.execute_transfer("SAV001", "RCP001", 15_000.0, None).await;
        assert!(!result.success);
        assert!(result.requires_approval);
    }

    #[tokio::test]
    async fn transaction_history_is_newest_first_and_bounded() {
        let bank = MockBankingService::new();
        let history = bank.get_transaction_history("CHK001", 50).await;
        assert_eq!(history.len(), 20);
        for pair in history.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
    }

    #[tokio::test]
    async fn send_payment_reuses_transfer_range_check() {
        let bank = MockBankingService::new();
        let ok = bank.send_payment("CHK001", "Electric Co", 100.0).await;
        assert!(ok.success);
        let too_large = bank.send_payment("CHK001", "Electric Co", 100_000.0).await;
        assert!(!too_large.success);
    }

    #[tokio::test]
    async fn block_card_rejects_empty_id() {
        let bank = MockBankingService::new();
        let ok = bank.block_card("CRD001", "lost").await;
        assert!(ok.success);
        let rejected = bank.block_card("", "lost").await;
        assert!(!rejected.success);
    }

    #[tokio::test]
    async fn dispute_transaction_requires_known_transaction() {
        let bank = MockBankingService::new();
        let history = bank.get_transaction_history("CHK001", 1).await;
        let known = &history[0].id;
        let ok = bank.dispute_transaction(known, "unauthorized charge").await;
        assert!(ok.success);
        assert!(ok.dispute_id.is_some());

        let unknown = bank.dispute_transaction("TXN999999", "unauthorized charge").await;
        assert!(!unknown.success);
    }
}
