use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};

use crate::types::ClassifyResult;

const TTL: Duration = Duration::from_secs(300);

/// Classification cache keyed `intent:{hash(normalize(utterance))}`,
/// TTL 300s, safe for concurrent writes (last-writer-wins) — spec.md §5.
/// The original keys on `md5`; this workspace already carries `sha2` for
/// the rest of the ambient stack, so the digest algorithm here is sha256
/// rather than pulling in a second hashing crate for one call site.
pub struct ClassificationCache {
    entries: Mutex<HashMap<String, (ClassifyResult, Instant)>>,
}

impl ClassificationCache {
    pub fn new() -> Self {
        Self { entries: Mutex::new(HashMap::new()) }
    }

    pub fn get(&self, utterance: &str) -> Option<ClassifyResult> {
        let key = cache_key(utterance);
        let mut entries = self.entries.lock().unwrap();
        match entries.get(&key) {
            Some((result, inserted_at)) if inserted_at.elapsed() < TTL => Some(result.clone()),
            Some(_) => {
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    pub fn set(&self, utterance: &str, result: ClassifyResult) {
        let key = cache_key(utterance);
        self.entries.lock().unwrap().insert(key, (result, Instant::now()));
    }
}

impl Default for ClassificationCache {
    fn default() -> Self {
        Self::new()
    }
}

pub fn normalize(utterance: &str) -> String {
    utterance.trim().to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

fn cache_key(utterance: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize(utterance).as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClassifyResult;
    use cba_catalog::{AuthLevel, RiskLevel};

    fn sample() -> ClassifyResult {
        ClassifyResult {
            intent_id: "accounts.balance.check".to_string(),
            name: "Check Balance".to_string(),
            category: "accounts".to_string(),
            subcategory: "balance".to_string(),
            confidence: 0.9,
            alternatives: vec![],
            risk_level: RiskLevel::Low,
            auth_required: AuthLevel::Basic,
            required_entities: vec![],
            optional_entities: vec![],
            preconditions: vec![],
            timeout_ms: 3000,
            confidence_threshold: 0.7,
            reasoning: "test".to_string(),
            response_time_ms: 5,
            from_cache: false,
            fallback: false,
        }
    }

    #[test]
    fn normalization_ignores_case_and_whitespace() {
        let cache = ClassificationCache::new();
        cache.set("What's my   Balance", sample());
        assert!(cache.get("what's my balance").is_some());
    }

    #[test]
    fn miss_returns_none() {
        let cache = ClassificationCache::new();
        assert!(cache.get("anything").is_none());
    }
}
