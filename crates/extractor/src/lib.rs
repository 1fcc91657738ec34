//! Entity Extractor (C2) — spec.md §4.2. Two phases merged: a fixed table
//! of compiled regexes for high-confidence values, and a single LLM call
//! for everything patterns miss. `cba-pipeline` is the only caller; it
//! supplies the intent's required/optional entity names so missing-entity
//! suggestions can be generated.

mod llm_phase;
mod patterns;
mod suggestions;
mod types;
mod validate;

pub use types::{EntitySource, EntityType, ExtractRequest, ExtractResult, ExtractedEntity, ExtractionContext};

use cba_llm::Llm;

/// `extract(utterance, intentId?, requiredEntities?, context?)` — spec.md §4.2.
pub async fn extract(llm: &dyn Llm, request: &ExtractRequest) -> ExtractResult {
    let mut entities = patterns::extract(&request.utterance);

    let llm_entities = llm_phase::extract(
        llm,
        &request.utterance,
        request.intent_id.as_deref(),
        &request.required_entities,
        request.context.as_ref(),
    )
    .await;

    merge(&mut entities, llm_entities);

    let mut warnings = Vec::new();
    let mut validation_errors = std::collections::HashMap::new();
    let mut validated = Vec::with_capacity(entities.len());
    for mut entity in entities {
        match validate::validate(&mut entity, &mut warnings) {
            Ok(()) => validated.push(entity),
            Err(message) => {
                validation_errors.insert(entity.entity_type.to_string(), message);
            }
        }
    }

    let present: std::collections::HashSet<&str> = validated.iter().map(|e| e.entity_type.as_str()).collect();
    let mut missing_required = Vec::new();
    let mut suggestions = Vec::new();
    for required in &request.required_entities {
        if !present.contains(required.as_str()) {
            missing_required.push(required.clone());
            suggestions.push(suggestions::suggestion_for(required));
        }
    }

    let confidence_score = if validated.is_empty() {
        0.0
    } else {
        validated.iter().map(|e| e.confidence).sum::<f64>() / validated.len() as f64
    };

    ExtractResult {
        entities: validated,
        follow_up_needed: !missing_required.is_empty(),
        missing_required,
        validation_errors,
        confidence_score,
        suggestions,
        warnings,
    }
}

/// Entities are keyed by type. Higher confidence wins; on ties, LLM beats
/// pattern for amounts, pattern beats LLM for routing/phone — spec.md §4.2.
fn merge(entities: &mut Vec<ExtractedEntity>, llm_entities: Vec<ExtractedEntity>) {
    for candidate in llm_entities {
        match entities.iter().position(|e| e.entity_type == candidate.entity_type) {
            None => entities.push(candidate),
            Some(index) => {
                let incumbent = &entities[index];
                let replace = if (candidate.confidence - incumbent.confidence).abs() < f64::EPSILON {
                    matches!(candidate.entity_type, EntityType::Amount)
                } else {
                    candidate.confidence > incumbent.confidence
                };
                if replace {
                    entities[index] = candidate;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cba_llm::MockLlm;

    #[tokio::test]
    async fn pattern_only_extraction_when_llm_unavailable() {
        let llm = MockLlm;
        let request = ExtractRequest {
            utterance: "send $200 to John".to_string(),
            intent_id: Some("payments.p2p.send".to_string()),
            required_entities: vec!["amount".to_string(), "recipient".to_string()],
            context: None,
        };
        let result = extract(&llm, &request).await;
        assert!(result.get(EntityType::Amount).is_some());
        assert!(result.missing_required.contains(&"recipient".to_string()));
        assert!(result.follow_up_needed);
        assert_eq!(result.suggestions.len(), 1);
    }

    #[tokio::test]
    async fn no_entities_yields_zero_confidence() {
        let llm = MockLlm;
        let request = ExtractRequest {
            utterance: "hello there".to_string(),
            intent_id: None,
            required_entities: vec![],
            context: None,
        };
        let result = extract(&llm, &request).await;
        assert!(result.entities.is_empty());
        assert_eq!(result.confidence_score, 0.0);
        assert!(!result.follow_up_needed);
    }

    #[test]
    fn merge_prefers_pattern_for_routing_number_on_tie() {
        let mut entities = vec![ExtractedEntity::new(EntityType::RoutingNumber, serde_json::json!("021000021"), "021000021", 0.85, EntitySource::Pattern)];
        let llm_entities = vec![ExtractedEntity::new(EntityType::RoutingNumber, serde_json::json!("111111111"), "111111111", 0.85, EntitySource::Llm)];
        merge(&mut entities, llm_entities);
        assert_eq!(entities[0].value, serde_json::json!("021000021"));
    }

    #[test]
    fn merge_prefers_llm_for_amount_on_tie() {
        let mut entities = vec![ExtractedEntity::new(EntityType::Amount, serde_json::json!(200.0), "200", 0.85, EntitySource::Pattern)];
        let llm_entities = vec![ExtractedEntity::new(EntityType::Amount, serde_json::json!(250.0), "two hundred fifty", 0.85, EntitySource::Llm)];
        merge(&mut entities, llm_entities);
        assert_eq!(entities[0].value, serde_json::json!(250.0));
    }
}
