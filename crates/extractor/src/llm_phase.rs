use std::collections::HashMap;

use cba_llm::{CompleteOptions, Llm};

use crate::types::{EntitySource, EntityType, ExtractedEntity, ExtractionContext};

#[derive(Debug, serde::Deserialize)]
struct LlmEntity {
    value: serde_json::Value,
    #[serde(default)]
    raw_text: String,
    #[serde(default = "default_llm_confidence")]
    confidence: f64,
}

fn default_llm_confidence() -> f64 {
    0.75
}

/// A single call requesting JSON-shaped entity extraction, retried twice
/// with exponential backoff on parse/timeout errors — spec.md §4.2.
pub async fn extract(
    llm: &dyn Llm,
    utterance: &str,
    intent_id: Option<&str>,
    required_entities: &[String],
    context: Option<&ExtractionContext>,
) -> Vec<ExtractedEntity> {
    let prompt = build_prompt(utterance, intent_id, required_entities, context);

    let mut delay_ms = 200u64;
    for attempt in 0..3 {
        match llm.complete(&prompt, CompleteOptions::json(0.2, 4000)).await {
            Ok(output) => match parse_output(&output) {
                Ok(entities) => return entities,
                Err(err) => {
                    tracing::warn!(attempt, %err, "LLM entity extraction produced unparseable output");
                }
            },
            Err(err) => {
                tracing::warn!(attempt, %err, "LLM entity extraction call failed");
            }
        }
        if attempt < 2 {
            tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
            delay_ms *= 2;
        }
    }
    Vec::new()
}

fn build_prompt(utterance: &str, intent_id: Option<&str>, required_entities: &[String], context: Option<&ExtractionContext>) -> String {
    let mut prompt = String::new();
    prompt.push_str("Extract banking entities from the user's utterance as a JSON object\n");
    prompt.push_str("mapping entity type to {\"value\", \"raw_text\", \"confidence\"}.\n\n");
    if let Some(id) = intent_id {
        prompt.push_str(&format!("Intent: {id}\n"));
    }
    if !required_entities.is_empty() {
        prompt.push_str(&format!("Required entities: {}\n", required_entities.join(", ")));
    }
    if let Some(ctx) = context {
        if let Some(recipient) = &ctx.last_recipient {
            prompt.push_str(&format!("Last recipient mentioned: {recipient}\n"));
        }
        if let Some(amount) = ctx.last_amount {
            prompt.push_str(&format!("Last amount mentioned: {amount}\n"));
        }
    }
    prompt.push_str("\nExamples:\n");
    prompt.push_str("\"send $200 to John\" -> {\"amount\": {\"value\": 200.0, \"raw_text\": \"$200\", \"confidence\": 0.9}, \"recipient\": {\"value\": \"John\", \"raw_text\": \"John\", \"confidence\": 0.85}}\n");
    prompt.push_str("\"pay my visa bill tomorrow\" -> {\"date\": {\"value\": \"tomorrow\", \"raw_text\": \"tomorrow\", \"confidence\": 0.8}}\n\n");
    prompt.push_str(&format!("Utterance: {utterance}\n"));
    prompt
}

fn parse_output(output: &cba_llm::LlmOutput) -> anyhow::Result<Vec<ExtractedEntity>> {
    let raw: HashMap<String, LlmEntity> = match output {
        cba_llm::LlmOutput::Content { text } => cba_llm::extract_json_output(text)?,
        cba_llm::LlmOutput::FunctionCall { arguments, .. } => serde_json::from_value(arguments.clone())?,
    };

    Ok(raw
        .into_iter()
        .filter_map(|(key, entity)| {
            let entity_type: EntityType = key.parse().ok()?;
            Some(ExtractedEntity::new(entity_type, entity.value, entity.raw_text, entity.confidence, EntitySource::Llm))
        })
        .collect())
}
