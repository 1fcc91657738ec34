use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Checking,
    Savings,
    Credit,
    Investment,
    Loan,
    Business,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub balance: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferType {
    Internal,
    Domestic,
    International,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    pub id: String,
    pub name: String,
    pub account_number: String,
    pub bank_name: String,
    pub bank_country: String,
    pub alias: Option<String>,
    pub routing_number: Option<String>,
    pub swift_code: Option<String>,
    pub bank_address: Option<String>,
}

impl Recipient {
    pub fn is_international(&self) -> bool {
        self.bank_country != "US"
    }

    /// Derived attribute from spec.md §3: internal (same bank as home),
    /// domestic (same country, different bank), international (otherwise).
    pub fn transfer_type(&self, home_bank: &str) -> TransferType {
        if self.bank_name == home_bank {
            TransferType::Internal
        } else if self.bank_country == "US" {
            TransferType::Domestic
        } else {
            TransferType::International
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: String,
    pub amount: f64,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub account_id: String,
    pub balance_after: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalMethod {
    Biometric,
    Pin,
    SecurityQuestion,
    BiometricAndPin,
}

impl ApprovalMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalMethod::Biometric => "biometric",
            ApprovalMethod::Pin => "pin",
            ApprovalMethod::SecurityQuestion => "security_question",
            ApprovalMethod::BiometricAndPin => "biometric_and_pin",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub token: String,
    pub approval_method: ApprovalMethod,
    pub expires_in_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationData {
    pub pin: Option<String>,
    pub security_answer: Option<String>,
    pub biometric_success: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferValidation {
    pub valid: bool,
    pub reason: Option<String>,
    pub estimated_fee: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferExecution {
    pub success: bool,
    pub reference_id: Option<String>,
    pub requires_approval: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentExecution {
    pub success: bool,
    pub reference_id: Option<String>,
    pub requires_approval: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardBlockResult {
    pub success: bool,
    pub card_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisputeResult {
    pub success: bool,
    pub dispute_id: Option<String>,
    pub message: String,
}
