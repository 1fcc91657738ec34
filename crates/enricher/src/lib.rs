//! Entity Enricher (C3) — spec.md §4.3. A strategy registry: each intent
//! names its `enrichmentRequirements`, and the matching strategy runs in
//! order, idempotently, reading the banking backend without mutating it.

mod strategies;

pub use strategies::{AccountResolution, RecipientResolution, Strategy};

use cba_extractor::ExtractedEntity;
use cba_mock::Banking;

/// Applies the strategies named by `enrichment_requirements`, in order.
pub async fn enrich(banking: &dyn Banking, enrichment_requirements: &[String], entities: &mut Vec<ExtractedEntity>) {
    for requirement in enrichment_requirements {
        let strategy: Option<Box<dyn Strategy>> = match requirement.as_str() {
            "account_resolution" => Some(Box::new(AccountResolution)),
            "recipient_resolution" => Some(Box::new(RecipientResolution)),
            other => {
                tracing::debug!(requirement = other, "no enrichment strategy registered for requirement");
                None
            }
        };
        if let Some(strategy) = strategy {
            if strategy.can_enrich(entities) {
                strategy.enrich(banking, entities).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cba_extractor::{EntitySource, EntityType};
    use cba_mock::MockBankingService;

    #[tokio::test]
    async fn account_resolution_attaches_enriched_record() {
        let banking = MockBankingService::new();
        let mut entities = vec![ExtractedEntity::new(EntityType::AccountId, serde_json::json!("CHK001"), "CHK001", 0.85, EntitySource::Pattern)];
        enrich(&banking, &["account_resolution".to_string()], &mut entities).await;
        let entity = &entities[0];
        assert_eq!(entity.source, EntitySource::Enrichment);
        assert!(entity.enriched_record.is_some());
    }

    #[tokio::test]
    async fn recipient_resolution_flags_ambiguous_matches() {
        let banking = MockBankingService::new();
        let mut entities = vec![ExtractedEntity::new(EntityType::Recipient, serde_json::json!("John"), "John", 0.8, EntitySource::Llm)];
        enrich(&banking, &["recipient_resolution".to_string()], &mut entities).await;
        let record = entities[0].enriched_record.as_ref().unwrap();
        assert_eq!(record["status"], "ambiguous");
    }

    #[tokio::test]
    async fn recipient_resolution_resolves_unique_match() {
        let banking = MockBankingService::new();
        let mut entities = vec![ExtractedEntity::new(EntityType::Recipient, serde_json::json!("Sarah Johnson"), "Sarah Johnson", 0.8, EntitySource::Llm)];
        enrich(&banking, &["recipient_resolution".to_string()], &mut entities).await;
        let record = entities[0].enriched_record.as_ref().unwrap();
        assert_eq!(record["status"], "resolved");
        assert_eq!(record["transfer_type"], "domestic");
    }

    #[tokio::test]
    async fn redundant_account_type_is_removed_when_from_and_to_present() {
        let banking = MockBankingService::new();
        let mut entities = vec![
            ExtractedEntity::new(EntityType::FromAccount, serde_json::json!("CHK001"), "checking", 0.85, EntitySource::Pattern),
            ExtractedEntity::new(EntityType::ToAccount, serde_json::json!("SAV001"), "savings", 0.85, EntitySource::Pattern),
            ExtractedEntity::new(EntityType::AccountType, serde_json::json!("checking"), "checking", 0.85, EntitySource::Pattern),
        ];
        enrich(&banking, &["account_resolution".to_string()], &mut entities).await;
        assert!(!entities.iter().any(|e| e.entity_type == EntityType::AccountType));
    }
}
