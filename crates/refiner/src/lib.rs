//! Intent Refiner (C5) — spec.md §4.5. A pure function applied after
//! enrichment and before response generation. Entities are never mutated;
//! rules are evaluated in order and the first match wins.

use cba_extractor::{EntityType, ExtractedEntity};

const P2P_LIMIT: f64 = 1000.0;
const P2P_KEYWORDS: &[&str] = &["zelle", "venmo", "cash app"];

pub fn refine(intent_id: &str, entities: &[ExtractedEntity], utterance: &str) -> (String, &'static str) {
    if let Some((status, transfer_type)) = recipient_status(entities) {
        if status == "resolved" && transfer_type.as_deref() == Some("international") && intent_id != "international.wire.send" {
            return ("international.wire.send".to_string(), "international_recipient");
        }
    }

    if intent_id == "payments.p2p.send" {
        if let Some(amount) = amount_value(entities) {
            if amount > P2P_LIMIT {
                return ("payments.transfer.external".to_string(), "p2p_limit_exceeded");
            }
        }
    }

    if let Some((status, transfer_type)) = recipient_status(entities) {
        if status == "resolved" && transfer_type.as_deref() == Some("internal") {
            return ("payments.transfer.external".to_string(), "different_customer_same_bank");
        }
    }

    let lowered = utterance.to_lowercase();
    if P2P_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        let within_limit = amount_value(entities).map(|a| a <= P2P_LIMIT).unwrap_or(true);
        if within_limit {
            return ("payments.p2p.send".to_string(), "explicit_p2p_service");
        }
    }

    (intent_id.to_string(), "no_refinement")
}

fn recipient_status(entities: &[ExtractedEntity]) -> Option<(String, Option<String>)> {
    let record = entities.iter().find(|e| e.entity_type == EntityType::Recipient)?.enriched_record.as_ref()?;
    let status = record.get("status")?.as_str()?.to_string();
    let transfer_type = record.get("transfer_type").and_then(|v| v.as_str()).map(str::to_string);
    Some((status, transfer_type))
}

fn amount_value(entities: &[ExtractedEntity]) -> Option<f64> {
    entities.iter().find(|e| e.entity_type == EntityType::Amount)?.value.as_f64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cba_extractor::EntitySource;

    fn recipient_entity(status: &str, transfer_type: Option<&str>) -> ExtractedEntity {
        let mut record = serde_json::json!({"status": status});
        if let Some(tt) = transfer_type {
            record["transfer_type"] = serde_json::json!(tt);
        }
        let mut entity = ExtractedEntity::new(EntityType::Recipient, serde_json::json!("Jack White"), "Jack White", 0.95, EntitySource::Enrichment);
        entity.enriched_record = Some(record);
        entity
    }

    fn amount_entity(value: f64) -> ExtractedEntity {
        ExtractedEntity::new(EntityType::Amount, serde_json::json!(value), "amount", 0.85, EntitySource::Pattern)
    }

    #[test]
    fn international_recipient_overrides_to_wire_send() {
        let entities = vec![recipient_entity("resolved", Some("international"))];
        let (id, reason) = refine("payments.transfer.external", &entities, "send money to Jack White");
        assert_eq!(id, "international.wire.send");
        assert_eq!(reason, "international_recipient");
    }

    #[test]
    fn p2p_over_limit_becomes_external_transfer() {
        let entities = vec![amount_entity(1500.0)];
        let (id, reason) = refine("payments.p2p.send", &entities, "send 1500 to John");
        assert_eq!(id, "payments.transfer.external");
        assert_eq!(reason, "p2p_limit_exceeded");
    }

    #[test]
    fn internal_recipient_becomes_external_different_customer() {
        let entities = vec![recipient_entity("resolved", Some("internal"))];
        let (id, reason) = refine("payments.transfer.internal", &entities, "send money to John Smith");
        assert_eq!(id, "payments.transfer.external");
        assert_eq!(reason, "different_customer_same_bank");
    }

    #[test]
    fn explicit_p2p_keyword_under_limit_becomes_p2p() {
        let entities = vec![amount_entity(50.0)];
        let (id, reason) = refine("payments.transfer.external", &entities, "venmo Sarah 50 bucks");
        assert_eq!(id, "payments.p2p.send");
        assert_eq!(reason, "explicit_p2p_service");
    }

    #[test]
    fn no_rule_matches_is_idempotent() {
        let entities = vec![amount_entity(200.0)];
        let (id, reason) = refine("accounts.balance.check", &entities, "what's my balance");
        assert_eq!(id, "accounts.balance.check");
        assert_eq!(reason, "no_refinement");
        let (id2, _) = refine(&id, &entities, "what's my balance");
        assert_eq!(id2, id);
    }
}
