use cba_catalog::Intent;
use cba_extractor::{EntityType, ExtractedEntity};
use cba_state::PendingClarification;

use crate::flatten;
use crate::types::{PendingClarificationView, TurnResponse, TurnStatus};

/// Entities not yet satisfying `intent.requiredEntities` — a present-set
/// diff independent of whichever required list the extractor itself ran
/// against (the refiner may have switched to a different intent since).
pub fn missing_for(intent: &Intent, entities: &[ExtractedEntity]) -> Vec<String> {
    let present: std::collections::HashSet<&str> = entities.iter().map(|e| e.entity_type.as_str()).collect();
    intent.required_entities.iter().filter(|r| !present.contains(r.as_str())).cloned().collect()
}

pub fn generic_suggestion(entity: &str) -> String {
    format!("Could you provide your {entity}?")
}

/// A `Recipient` enrichment left in `ambiguous` status needs a disambiguation
/// turn before anything else can proceed — spec.md §4.3/§4.9.
pub fn ambiguous_clarification(intent_id: &str, entities: &[ExtractedEntity]) -> Option<PendingClarification> {
    let record = entities.iter().find(|e| e.entity_type == EntityType::Recipient)?.enriched_record.as_ref()?;
    if record.get("status").and_then(|v| v.as_str()) != Some("ambiguous") {
        return None;
    }
    let options: Vec<String> = record
        .get("options")?
        .as_array()?
        .iter()
        .filter_map(|r| r.get("name").and_then(|n| n.as_str()).map(str::to_string))
        .collect();

    Some(PendingClarification {
        original_intent: intent_id.to_string(),
        original_entities: flatten::to_map(entities),
        missing_entities: vec![],
        options,
        awaiting_response: true,
        created_at: chrono::Utc::now(),
    })
}

/// `ClarificationNeeded` view of a pending clarification, whether freshly
/// raised or re-prompted after a partial answer.
pub fn response(session_id: String, clarification: &PendingClarification, processing_time_ms: u64) -> TurnResponse {
    let message = if clarification.options.is_empty() {
        "A few more details are needed to continue.".to_string()
    } else {
        format!("I found multiple matches. Did you mean: {}?", clarification.options.join(", "))
    };

    TurnResponse {
        status: TurnStatus::ClarificationNeeded,
        session_id,
        intent: Some(clarification.original_intent.clone()),
        confidence: 0.0,
        entities: clarification.original_entities.clone(),
        message,
        ui_assistance: None,
        execution: None,
        processing_time_ms,
        requires_confirmation: false,
        pending_clarification: Some(PendingClarificationView {
            missing_entities: clarification.missing_entities.clone(),
            options: clarification.options.clone(),
        }),
        approval: None,
        next_steps: None,
        warnings: vec![],
    }
}

/// Applies a disambiguation pick to the ambiguous `Recipient` entity,
/// reusing the candidate record the original enrichment already attached
/// under `enriched_record.options[idx]`.
pub fn resolve_recipient_choice(entities: &mut [ExtractedEntity], idx: usize, home_bank: &str) {
    let Some(entity) = entities.iter_mut().find(|e| e.entity_type == EntityType::Recipient) else { return };
    let Some(chosen) = entity.enriched_record.as_ref().and_then(|r| r.get("options")).and_then(|o| o.get(idx)).cloned() else { return };

    let transfer_type = recipient_transfer_type(&chosen, home_bank);
    entity.enriched_record = Some(serde_json::json!({ "status": "resolved", "record": chosen, "transfer_type": transfer_type }));
    entity.source = cba_extractor::EntitySource::Enrichment;
    entity.confidence = 0.95;
}

fn recipient_transfer_type(record: &serde_json::Value, home_bank: &str) -> &'static str {
    let bank_name = record.get("bank_name").and_then(|v| v.as_str()).unwrap_or_default();
    let bank_country = record.get("bank_country").and_then(|v| v.as_str()).unwrap_or_default();
    if bank_name == home_bank {
        "internal"
    } else if bank_country == "US" {
        "domestic"
    } else {
        "international"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cba_catalog::{AuthLevel, RiskLevel};
    use cba_extractor::{EntitySource, ExtractedEntity};

    fn intent() -> Intent {
        Intent {
            id: "payments.p2p.send".to_string(),
            name: "Send Money".to_string(),
            category: "payments".to_string(),
            subcategory: "p2p".to_string(),
            description: String::new(),
            confidence_threshold: 0.7,
            risk_level: RiskLevel::Medium,
            auth_required: AuthLevel::Basic,
            required_entities: vec!["amount".to_string(), "recipient".to_string()],
            optional_entities: vec![],
            example_utterances: vec![],
            keywords: vec![],
            patterns: vec![],
            preconditions: vec![],
            enrichment_requirements: vec![],
            daily_limit: None,
            timeout_ms: 3000,
            max_retries: 1,
        }
    }

    #[test]
    fn missing_for_reports_absent_required_entities() {
        let amount = ExtractedEntity::new(EntityType::Amount, serde_json::json!(50.0), "$50", 0.9, EntitySource::Pattern);
        let missing = missing_for(&intent(), &[amount]);
        assert_eq!(missing, vec!["recipient".to_string()]);
    }

    #[test]
    fn ambiguous_recipient_yields_named_options() {
        let mut recipient = ExtractedEntity::new(EntityType::Recipient, serde_json::json!("John"), "John", 0.8, EntitySource::Llm);
        recipient.enriched_record = Some(serde_json::json!({
            "status": "ambiguous",
            "options": [{"name": "John Smith"}, {"name": "John Doe"}],
        }));
        let clarification = ambiguous_clarification("payments.p2p.send", &[recipient]).unwrap();
        assert_eq!(clarification.options, vec!["John Smith".to_string(), "John Doe".to_string()]);
    }

    #[test]
    fn resolve_recipient_choice_picks_the_chosen_option() {
        let mut recipient = ExtractedEntity::new(EntityType::Recipient, serde_json::json!("John"), "John", 0.8, EntitySource::Llm);
        recipient.enriched_record = Some(serde_json::json!({
            "status": "ambiguous",
            "options": [
                {"name": "John Smith", "id": "RCP001", "bank_name": "Mock Bank", "bank_country": "US"},
                {"name": "John Doe", "id": "RCP002", "bank_name": "Other Bank", "bank_country": "CA"},
            ],
        }));
        let mut entities = vec![recipient];
        resolve_recipient_choice(&mut entities, 1, "Mock Bank");
        let record = entities[0].enriched_record.as_ref().unwrap();
        assert_eq!(record["status"], "resolved");
        assert_eq!(record["transfer_type"], "international");
        assert_eq!(record["record"]["id"], "RCP002");
    }
}
