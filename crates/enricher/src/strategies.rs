use async_trait::async_trait;
use cba_extractor::{EntitySource, EntityType, ExtractedEntity};
use cba_mock::{Account, AccountType, Banking};

const ENRICHMENT_CONFIDENCE: f64 = 0.95;
const ACCOUNT_ENTITY_TYPES: &[EntityType] = &[EntityType::AccountId, EntityType::AccountType, EntityType::AccountName, EntityType::FromAccount, EntityType::ToAccount];

fn parse_account_type(raw: &str) -> Option<AccountType> {
    match raw.to_lowercase().as_str() {
        "checking" => Some(AccountType::Checking),
        "savings" => Some(AccountType::Savings),
        "credit" => Some(AccountType::Credit),
        "investment" => Some(AccountType::Investment),
        "loan" => Some(AccountType::Loan),
        "business" => Some(AccountType::Business),
        _ => None,
    }
}

fn account_record(account: &Account) -> serde_json::Value {
    serde_json::json!({
        "id": account.id,
        "name": account.name,
        "type": account.account_type,
        "balance": account.balance,
        "currency": account.currency,
    })
}

/// A strategy that enriches entities by reading the banking backend. Pure:
/// never mutates the backend or the intent — spec.md §4.3.
#[async_trait]
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn can_enrich(&self, entities: &[ExtractedEntity]) -> bool;
    async fn enrich(&self, banking: &dyn Banking, entities: &mut Vec<ExtractedEntity>);
}

pub struct AccountResolution;

#[async_trait]
impl Strategy for AccountResolution {
    fn name(&self) -> &'static str {
        "account_resolution"
    }

    fn can_enrich(&self, entities: &[ExtractedEntity]) -> bool {
        entities.iter().any(|e| ACCOUNT_ENTITY_TYPES.contains(&e.entity_type))
    }

    async fn enrich(&self, banking: &dyn Banking, entities: &mut Vec<ExtractedEntity>) {
        for entity in entities.iter_mut() {
            if !ACCOUNT_ENTITY_TYPES.contains(&entity.entity_type) {
                continue;
            }
            let Some(raw) = entity.value.as_str().map(str::to_string) else {
                continue;
            };

            let resolved = match entity.entity_type {
                EntityType::AccountId => banking.get_account(&raw).await,
                EntityType::AccountType => match parse_account_type(&raw) {
                    Some(account_type) => banking.get_account_by_type(account_type).await,
                    None => None,
                },
                EntityType::AccountName => banking.get_all_accounts().await.into_iter().find(|a| a.name.to_lowercase().contains(&raw.to_lowercase())),
                EntityType::FromAccount => resolve_from_account(banking, &raw).await,
                EntityType::ToAccount => resolve_to_account(banking, &raw).await,
                _ => None,
            };

            if let Some(account) = resolved {
                entity.enriched_record = Some(account_record(&account));
                entity.source = EntitySource::Enrichment;
                entity.confidence = ENRICHMENT_CONFIDENCE;
            }
        }

        remove_redundant_account_type(entities);
    }
}

async fn resolve_from_account(banking: &dyn Banking, raw: &str) -> Option<Account> {
    if let Some(account) = banking.get_account(raw).await {
        return Some(account);
    }
    if let Some(account_type) = parse_account_type(raw) {
        if let Some(account) = banking.get_account_by_type(account_type).await {
            return Some(account);
        }
    }
    let accounts = banking.get_all_accounts().await;
    accounts
        .iter()
        .find(|a| a.name.to_lowercase().contains("primary"))
        .cloned()
        .or_else(|| accounts.into_iter().next())
}

async fn resolve_to_account(banking: &dyn Banking, raw: &str) -> Option<Account> {
    if let Some(account) = banking.get_account(raw).await {
        return Some(account);
    }
    if let Some(account_type) = parse_account_type(raw) {
        if let Some(account) = banking.get_account_by_type(account_type).await {
            return Some(account);
        }
    }
    banking.get_all_accounts().await.into_iter().next()
}

/// Transfer-specific `from_account`/`to_account` win over a generic
/// `account_type` carried alongside them — spec.md §4.3.
fn remove_redundant_account_type(entities: &mut Vec<ExtractedEntity>) {
    let has_from = entities.iter().any(|e| e.entity_type == EntityType::FromAccount);
    let has_to = entities.iter().any(|e| e.entity_type == EntityType::ToAccount);
    if has_from && has_to {
        entities.retain(|e| e.entity_type != EntityType::AccountType);
    }
}

pub struct RecipientResolution;

#[async_trait]
impl Strategy for RecipientResolution {
    fn name(&self) -> &'static str {
        "recipient_resolution"
    }

    fn can_enrich(&self, entities: &[ExtractedEntity]) -> bool {
        entities.iter().any(|e| e.entity_type == EntityType::Recipient)
    }

    async fn enrich(&self, banking: &dyn Banking, entities: &mut Vec<ExtractedEntity>) {
        for entity in entities.iter_mut() {
            if entity.entity_type != EntityType::Recipient {
                continue;
            }
            let Some(raw) = entity.value.as_str().map(str::to_string) else {
                continue;
            };

            let matches = banking.search_recipients(&raw).await;
            entity.enriched_record = Some(match matches.as_slice() {
                [] => serde_json::json!({"status": "not_found"}),
                [single] => {
                    entity.source = EntitySource::Enrichment;
                    entity.confidence = ENRICHMENT_CONFIDENCE;
                    serde_json::json!({
                        "status": "resolved",
                        "record": single,
                        "transfer_type": single.transfer_type(banking.home_bank()),
                    })
                }
                many => serde_json::json!({"status": "ambiguous", "options": many}),
            });
        }
    }
}
