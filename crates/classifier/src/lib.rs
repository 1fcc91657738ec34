//! Intent Classifier (C4) — spec.md §4.4. LLM-first with a deterministic
//! rule-based fallback to `cba-catalog::IntentCatalog::match_intent`, a
//! 300s classification cache, and metadata enhancement from the catalog.

mod cache;
mod types;

pub use cache::ClassificationCache;
pub use types::{ClassifyContext, ClassifyRequest, ClassifyResult};

use cba_catalog::IntentCatalog;
use cba_llm::{CompleteOptions, Llm};
use types::LlmClassification;

const LLM_TEMPERATURE: f64 = 0.2;
const LLM_TIMEOUT_MS: u64 = 3000;
const MAX_ALTERNATIVES: usize = 3;

pub async fn classify(llm: &dyn Llm, catalog: &IntentCatalog, cache: &ClassificationCache, request: &ClassifyRequest) -> ClassifyResult {
    let started = std::time::Instant::now();

    if let Some(mut cached) = cache.get(&request.utterance) {
        cached.from_cache = true;
        cached.response_time_ms = started.elapsed().as_millis() as u64;
        return cached;
    }

    let (intent_id, confidence, alternatives, reasoning, fallback) = match classify_via_llm(llm, catalog, request).await {
        Some(classification) => classification,
        None => classify_via_catalog(catalog, &request.utterance),
    };

    let mut result = enhance(catalog, intent_id, confidence, alternatives, reasoning, fallback);
    result.response_time_ms = started.elapsed().as_millis() as u64;
    result.from_cache = false;

    cache.set(&request.utterance, result.clone());
    result
}

async fn classify_via_llm(llm: &dyn Llm, catalog: &IntentCatalog, request: &ClassifyRequest) -> Option<(String, f64, Vec<String>, String, bool)> {
    let prompt = build_prompt(catalog, request);
    let opts = CompleteOptions::json(LLM_TEMPERATURE, LLM_TIMEOUT_MS);

    let output = llm.complete(&prompt, opts).await.ok()?;
    let classification: LlmClassification = match &output {
        cba_llm::LlmOutput::Content { text } => cba_llm::extract_json_output(text).ok()?,
        cba_llm::LlmOutput::FunctionCall { arguments, .. } => serde_json::from_value(arguments.clone()).ok()?,
    };

    let resolved_id = resolve_intent_id(catalog, &classification.intent_id)?;
    Some((resolved_id, classification.confidence, classification.alternatives, classification.reasoning, false))
}

/// Validate the LLM's `intentId` against the catalog; if unknown, map to
/// the closest known id by shared category prefix — spec.md §4.4 step 2.
fn resolve_intent_id(catalog: &IntentCatalog, candidate: &str) -> Option<String> {
    if catalog.get(candidate).is_some() {
        return Some(candidate.to_string());
    }
    let category = candidate.split('.').next()?;
    let prefix = format!("{category}.");
    catalog.all_ids().find(|id| id.starts_with(&prefix)).map(|id| id.to_string())
}

fn classify_via_catalog(catalog: &IntentCatalog, utterance: &str) -> (String, f64, Vec<String>, String, bool) {
    let matched = catalog.match_intent(utterance);
    let alternatives = matched.alternatives.into_iter().map(|alt| alt.intent_id).collect();
    (matched.intent_id, matched.confidence, alternatives, "rule-based fallback".to_string(), true)
}

fn enhance(catalog: &IntentCatalog, intent_id: String, confidence: f64, alternatives: Vec<String>, reasoning: String, fallback: bool) -> ClassifyResult {
    let confidence = confidence.clamp(0.0, 1.0);
    let alternatives: Vec<_> = alternatives
        .into_iter()
        .filter(|id| *id != intent_id)
        .take(MAX_ALTERNATIVES)
        .filter_map(|id| catalog.get(&id).map(|_| cba_catalog::ScoredIntent { intent_id: id, confidence: 0.0 }))
        .collect();

    match catalog.get(&intent_id) {
        Some(intent) => ClassifyResult {
            intent_id: intent.id.clone(),
            name: intent.name.clone(),
            category: intent.category.clone(),
            subcategory: intent.subcategory.clone(),
            confidence,
            alternatives,
            risk_level: intent.risk_level,
            auth_required: intent.auth_required,
            required_entities: intent.required_entities.clone(),
            optional_entities: intent.optional_entities.clone(),
            preconditions: intent.preconditions.clone(),
            timeout_ms: intent.timeout_ms,
            confidence_threshold: intent.confidence_threshold,
            reasoning,
            response_time_ms: 0,
            from_cache: false,
            fallback,
        },
        None => ClassifyResult {
            intent_id: "unknown".to_string(),
            name: "Unknown".to_string(),
            category: "unknown".to_string(),
            subcategory: "unknown".to_string(),
            confidence: 0.0,
            alternatives,
            risk_level: cba_catalog::RiskLevel::Low,
            auth_required: cba_catalog::AuthLevel::None,
            required_entities: vec![],
            optional_entities: vec![],
            preconditions: vec![],
            timeout_ms: LLM_TIMEOUT_MS,
            confidence_threshold: 0.0,
            reasoning,
            response_time_ms: 0,
            from_cache: false,
            fallback: true,
        },
    }
}

fn build_prompt(catalog: &IntentCatalog, request: &ClassifyRequest) -> String {
    let mut prompt = String::new();
    prompt.push_str("Classify the banking utterance into one of these intents.\n");
    prompt.push_str("Respond with JSON: {\"intent_id\", \"confidence\", \"alternatives\", \"reasoning\", \"entities_detected\"}.\n\n");
    for id in catalog.all_ids() {
        if let Some(intent) = catalog.get(id) {
            let top_keywords: Vec<_> = intent.keywords.iter().take(5).cloned().collect();
            prompt.push_str(&format!("- {id}: {} (keywords: {})\n", intent.description, top_keywords.join(", ")));
        }
    }
    if let Some(ctx) = &request.context {
        if let Some(last_intent) = &ctx.last_intent {
            prompt.push_str(&format!("\nPrevious intent in this conversation: {last_intent}\n"));
        }
    }
    prompt.push_str(&format!("\nUtterance: {}\n", request.utterance));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use cba_llm::MockLlm;

    #[tokio::test]
    async fn falls_back_to_catalog_when_llm_unavailable() {
        let catalog = IntentCatalog::new();
        let cache = ClassificationCache::new();
        let llm = MockLlm;
        let request = ClassifyRequest { utterance: "what's my checking balance".to_string(), context: None, include_risk: true };
        let result = classify(&llm, &catalog, &cache, &request).await;
        assert!(result.fallback);
        assert_eq!(result.intent_id, "accounts.balance.check");
    }

    #[tokio::test]
    async fn second_call_is_served_from_cache() {
        let catalog = IntentCatalog::new();
        let cache = ClassificationCache::new();
        let llm = MockLlm;
        let request = ClassifyRequest { utterance: "what's my checking balance".to_string(), context: None, include_risk: true };
        classify(&llm, &catalog, &cache, &request).await;
        let second = classify(&llm, &catalog, &cache, &request).await;
        assert!(second.from_cache);
    }

    #[tokio::test]
    async fn unknown_utterance_falls_back_to_unknown_intent() {
        let catalog = IntentCatalog::new();
        let cache = ClassificationCache::new();
        let llm = MockLlm;
        let request = ClassifyRequest { utterance: "xyzzy plugh".to_string(), context: None, include_risk: false };
        let result = classify(&llm, &catalog, &cache, &request).await;
        assert_eq!(result.intent_id, "unknown");
        assert_eq!(result.confidence, 0.0);
    }
}
