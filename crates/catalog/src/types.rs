use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Ordered `none < basic < full < challenge`, per spec.md §4.6's auth hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthLevel {
    None,
    Basic,
    Full,
    Challenge,
}

/// A single banking intent. Immutable once loaded — see Lifecycle in §3.
#[derive(Debug, Clone)]
pub struct Intent {
    pub id: String,
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub description: String,
    pub confidence_threshold: f64,
    pub risk_level: RiskLevel,
    pub auth_required: AuthLevel,
    pub required_entities: Vec<String>,
    pub optional_entities: Vec<String>,
    pub example_utterances: Vec<String>,
    pub keywords: Vec<String>,
    pub patterns: Vec<Regex>,
    pub preconditions: Vec<String>,
    pub enrichment_requirements: Vec<String>,
    pub daily_limit: Option<u32>,
    pub timeout_ms: u64,
    pub max_retries: u32,
}

/// One scored candidate from `IntentCatalog::search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredIntent {
    pub intent_id: String,
    pub confidence: f64,
}

/// Convenience result of `IntentCatalog::match_intent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentMatch {
    pub intent_id: String,
    pub confidence: f64,
    pub alternatives: Vec<ScoredIntent>,
}

impl IntentMatch {
    pub fn unknown() -> Self {
        Self {
            intent_id: "unknown".to_string(),
            confidence: 0.0,
            alternatives: Vec::new(),
        }
    }
}
