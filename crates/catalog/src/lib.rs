mod data;
mod types;

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

pub use types::{AuthLevel, Intent, IntentMatch, RiskLevel, ScoredIntent};

const ACCOUNT_ENTITY_TYPES: &[&str] =
    &["account_id", "account_type", "account_name", "from_account", "to_account"];
const RECIPIENT_ENTITY_TYPES: &[&str] = &["recipient", "recipient_account", "recipient_name"];

/// Read-only map `id -> Intent`, built once at startup. See spec.md §4.1.
pub struct IntentCatalog {
    intents: HashMap<String, Intent>,
    order: Vec<String>,
}

impl IntentCatalog {
    pub fn new() -> Self {
        let mut intents = HashMap::with_capacity(data::SEEDS.len());
        let mut order = Vec::with_capacity(data::SEEDS.len());

        for seed in data::SEEDS {
            let patterns: Vec<Regex> = seed
                .patterns
                .iter()
                .map(|p| Regex::new(p).expect("catalog pattern must compile"))
                .collect();

            let required_entities: Vec<String> =
                seed.required_entities.iter().map(|s| s.to_string()).collect();
            let optional_entities: Vec<String> =
                seed.optional_entities.iter().map(|s| s.to_string()).collect();

            let mut enrichment_requirements = Vec::new();
            let touches = |kinds: &[&str]| {
                required_entities.iter().chain(optional_entities.iter()).any(|e| kinds.contains(&e.as_str()))
            };
            if touches(ACCOUNT_ENTITY_TYPES) {
                enrichment_requirements.push("account_resolution".to_string());
            }
            if touches(RECIPIENT_ENTITY_TYPES) {
                enrichment_requirements.push("recipient_resolution".to_string());
            }

            let intent = Intent {
                id: seed.id.to_string(),
                name: seed.name.to_string(),
                category: seed.category.to_string(),
                subcategory: seed.subcategory.to_string(),
                description: seed.description.to_string(),
                confidence_threshold: seed.confidence_threshold,
                risk_level: seed.risk_level,
                auth_required: seed.auth_required,
                required_entities,
                optional_entities,
                example_utterances: seed.example_utterances.iter().map(|s| s.to_string()).collect(),
                keywords: seed.keywords.iter().map(|s| s.to_string()).collect(),
                patterns,
                preconditions: seed.preconditions.iter().map(|s| s.to_string()).collect(),
                enrichment_requirements,
                daily_limit: seed.daily_limit,
                timeout_ms: seed.timeout_ms,
                max_retries: seed.max_retries,
            };

            order.push(intent.id.clone());
            intents.insert(intent.id.clone(), intent);
        }

        Self { intents, order }
    }

    pub fn get(&self, id: &str) -> Option<&Intent> {
        self.intents.get(id)
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    pub fn all_ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    /// Scores every intent against `utterance` and returns the top `k`
    /// non-zero scores, descending. See spec.md §4.1.
    pub fn search(&self, utterance: &str, k: usize) -> Vec<ScoredIntent> {
        let mut scored: Vec<ScoredIntent> = self
            .order
            .iter()
            .filter_map(|id| {
                let intent = &self.intents[id];
                let score = score_utterance(intent, utterance);
                (score > 0.0).then_some(ScoredIntent { intent_id: id.clone(), confidence: score })
            })
            .collect();

        scored.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap());
        scored.truncate(k);
        scored
    }

    /// Convenience wrapper returning the top-1 match plus the next two as
    /// alternatives, or `unknown`/0 when no intent scores above zero.
    pub fn match_intent(&self, utterance: &str) -> IntentMatch {
        let mut top = self.search(utterance, 3);
        if top.is_empty() {
            return IntentMatch::unknown();
        }
        let best = top.remove(0);
        IntentMatch { intent_id: best.intent_id, confidence: best.confidence, alternatives: top }
    }
}

impl Default for IntentCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// `matches_utterance` from the original catalog, ported verbatim.
fn score_utterance(intent: &Intent, utterance: &str) -> f64 {
    let utterance_lower = utterance.to_lowercase();

    if intent
        .example_utterances
        .iter()
        .any(|example| example.to_lowercase() == utterance_lower)
    {
        return 0.99 * intent.confidence_threshold;
    }

    let pattern_contribution = if intent.patterns.is_empty() {
        0.0
    } else {
        let matched = intent.patterns.iter().filter(|p| p.is_match(&utterance_lower)).count();
        0.4 * (matched as f64 / intent.patterns.len() as f64).min(1.0)
    };

    let keyword_contribution = intent
        .keywords
        .iter()
        .filter_map(|kw| {
            let kw_lower = kw.to_lowercase();
            if !utterance_lower.contains(&kw_lower) {
                return None;
            }
            let specificity_bonus = kw_lower.split_whitespace().count() as f64 * 0.2;
            let coverage = kw_lower.len() as f64 / utterance_lower.len() as f64;
            Some((0.5 + specificity_bonus + coverage).min(1.0))
        })
        .fold(0.0_f64, f64::max)
        * 0.6;

    let combined = (pattern_contribution + keyword_contribution).min(1.0);
    combined * intent.confidence_threshold
}

/// Process-wide shared catalog instance. Intents are immutable after
/// construction, so a single `LazyLock` is sufficient — no locking needed
/// on the read path.
pub static CATALOG: LazyLock<IntentCatalog> = LazyLock::new(IntentCatalog::new);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_example_match_scores_near_threshold() {
        let catalog = IntentCatalog::new();
        let m = catalog.match_intent("What's my balance?");
        assert_eq!(m.intent_id, "accounts.balance.check");
        assert!(m.confidence >= 0.9 * 0.92);
    }

    #[test]
    fn unknown_utterance_has_no_match() {
        let catalog = IntentCatalog::new();
        let m = catalog.match_intent("zzz qqq flibbertigibbet nonsense");
        assert_eq!(m.intent_id, "unknown");
        assert_eq!(m.confidence, 0.0);
    }

    #[test]
    fn search_is_sorted_descending_and_capped() {
        let catalog = IntentCatalog::new();
        let top = catalog.search("I want to wire transfer money abroad internationally", 3);
        assert!(top.len() <= 3);
        for pair in top.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[test]
    fn all_intents_have_compiled_patterns() {
        let catalog = IntentCatalog::new();
        assert_eq!(catalog.len(), data::SEEDS.len());
        for id in catalog.all_ids() {
            assert!(catalog.get(id).is_some());
        }
    }

    #[test]
    fn account_resolution_requirement_is_derived() {
        let catalog = IntentCatalog::new();
        let intent = catalog.get("payments.transfer.internal").unwrap();
        assert!(intent.enrichment_requirements.contains(&"account_resolution".to_string()));
    }

    #[test]
    fn recipient_resolution_requirement_is_derived() {
        let catalog = IntentCatalog::new();
        let intent = catalog.get("payments.p2p.send").unwrap();
        assert!(intent.enrichment_requirements.contains(&"recipient_resolution".to_string()));
    }

    #[test]
    fn auth_level_ordering_matches_spec() {
        assert!(AuthLevel::None < AuthLevel::Basic);
        assert!(AuthLevel::Basic < AuthLevel::Full);
        assert!(AuthLevel::Full < AuthLevel::Challenge);
    }
}
