use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of entity kinds the extractor ever produces — spec.md §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Amount,
    Currency,
    AccountType,
    AccountName,
    FromAccount,
    ToAccount,
    AccountId,
    Recipient,
    RecipientAccount,
    RoutingNumber,
    CardId,
    Date,
    DateRange,
    Merchant,
    Memo,
    Phone,
    Email,
    TransactionId,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Amount => "amount",
            EntityType::Currency => "currency",
            EntityType::AccountType => "account_type",
            EntityType::AccountName => "account_name",
            EntityType::FromAccount => "from_account",
            EntityType::ToAccount => "to_account",
            EntityType::AccountId => "account_id",
            EntityType::Recipient => "recipient",
            EntityType::RecipientAccount => "recipient_account",
            EntityType::RoutingNumber => "routing_number",
            EntityType::CardId => "card_id",
            EntityType::Date => "date",
            EntityType::DateRange => "date_range",
            EntityType::Merchant => "merchant",
            EntityType::Memo => "memo",
            EntityType::Phone => "phone",
            EntityType::Email => "email",
            EntityType::TransactionId => "transaction_id",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "amount" => EntityType::Amount,
            "currency" => EntityType::Currency,
            "account_type" => EntityType::AccountType,
            "account_name" => EntityType::AccountName,
            "from_account" => EntityType::FromAccount,
            "to_account" => EntityType::ToAccount,
            "account_id" => EntityType::AccountId,
            "recipient" => EntityType::Recipient,
            "recipient_account" => EntityType::RecipientAccount,
            "routing_number" => EntityType::RoutingNumber,
            "card_id" => EntityType::CardId,
            "date" => EntityType::Date,
            "date_range" => EntityType::DateRange,
            "merchant" => EntityType::Merchant,
            "memo" => EntityType::Memo,
            "phone" => EntityType::Phone,
            "email" => EntityType::Email,
            "transaction_id" => EntityType::TransactionId,
            _ => return Err(()),
        })
    }
}

/// Where a value came from — spec.md §3's `source ∈ {pattern, llm,
/// function, enrichment}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitySource {
    Pattern,
    Llm,
    Function,
    Enrichment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedEntity {
    pub entity_type: EntityType,
    pub value: serde_json::Value,
    pub raw_text: String,
    pub confidence: f64,
    pub source: EntitySource,
    pub enriched_record: Option<serde_json::Value>,
}

impl ExtractedEntity {
    pub fn new(entity_type: EntityType, value: serde_json::Value, raw_text: impl Into<String>, confidence: f64, source: EntitySource) -> Self {
        Self { entity_type, value, raw_text: raw_text.into(), confidence, source, enriched_record: None }
    }
}

/// Conversational carry-overs the LLM prompt is biased with — spec.md §4.2.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionContext {
    pub last_recipient: Option<String>,
    pub last_amount: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ExtractRequest {
    pub utterance: String,
    pub intent_id: Option<String>,
    pub required_entities: Vec<String>,
    pub context: Option<ExtractionContext>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractResult {
    pub entities: Vec<ExtractedEntity>,
    pub missing_required: Vec<String>,
    pub validation_errors: std::collections::HashMap<String, String>,
    pub confidence_score: f64,
    pub follow_up_needed: bool,
    pub suggestions: Vec<String>,
    pub warnings: Vec<String>,
}

impl ExtractResult {
    pub fn get(&self, entity_type: EntityType) -> Option<&ExtractedEntity> {
        self.entities.iter().find(|e| e.entity_type == entity_type)
    }
}
