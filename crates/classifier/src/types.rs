use cba_catalog::{AuthLevel, RiskLevel, ScoredIntent};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
pub struct ClassifyContext {
    pub last_intent: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ClassifyRequest {
    pub utterance: String,
    pub context: Option<ClassifyContext>,
    pub include_risk: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResult {
    pub intent_id: String,
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub confidence: f64,
    pub alternatives: Vec<ScoredIntent>,
    pub risk_level: RiskLevel,
    pub auth_required: AuthLevel,
    pub required_entities: Vec<String>,
    pub optional_entities: Vec<String>,
    pub preconditions: Vec<String>,
    pub timeout_ms: u64,
    pub confidence_threshold: f64,
    pub reasoning: String,
    pub response_time_ms: u64,
    pub from_cache: bool,
    pub fallback: bool,
}

/// What the LLM is asked to return — spec.md §4.4 step 2.
#[derive(Debug, Deserialize)]
pub struct LlmClassification {
    pub intent_id: String,
    pub confidence: f64,
    #[serde(default)]
    pub alternatives: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub entities_detected: Vec<String>,
}
