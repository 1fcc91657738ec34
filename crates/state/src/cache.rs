use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;

/// `Cache.{Get,Set,SetEx,Delete,Exists,HGet,HSet,Expire}` — spec.md §6.3.
/// A real Redis-backed implementation is out of scope per spec.md §1; the
/// `"mock"` sentinel in `cba-config::PersistenceConfig` selects
/// `InMemoryCache` at construction time.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: String);
    async fn set_ex(&self, key: &str, value: String, ttl_secs: u64);
    async fn delete(&self, key: &str);
    async fn exists(&self, key: &str) -> bool;
    async fn hget(&self, key: &str, field: &str) -> Option<String>;
    async fn hset(&self, key: &str, field: &str, value: String);
    async fn expire(&self, key: &str, ttl_secs: u64);
}

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

pub struct InMemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
    hashes: RwLock<HashMap<String, HashMap<String, String>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self { entries: RwLock::new(HashMap::new()), hashes: RwLock::new(HashMap::new()) }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.write().unwrap();
        match entries.get(key) {
            Some(entry) if entry.expires_at.map(|at| Instant::now() < at).unwrap_or(true) => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn set(&self, key: &str, value: String) {
        self.entries.write().unwrap().insert(key.to_string(), Entry { value, expires_at: None });
    }

    async fn set_ex(&self, key: &str, value: String, ttl_secs: u64) {
        let expires_at = Some(Instant::now() + Duration::from_secs(ttl_secs));
        self.entries.write().unwrap().insert(key.to_string(), Entry { value, expires_at });
    }

    async fn delete(&self, key: &str) {
        self.entries.write().unwrap().remove(key);
        self.hashes.write().unwrap().remove(key);
    }

    async fn exists(&self, key: &str) -> bool {
        self.get(key).await.is_some()
    }

    async fn hget(&self, key: &str, field: &str) -> Option<String> {
        self.hashes.read().unwrap().get(key).and_then(|h| h.get(field)).cloned()
    }

    async fn hset(&self, key: &str, field: &str, value: String) {
        self.hashes.write().unwrap().entry(key.to_string()).or_default().insert(field.to_string(), value);
    }

    async fn expire(&self, key: &str, ttl_secs: u64) {
        if let Some(entry) = self.entries.write().unwrap().get_mut(key) {
            entry.expires_at = Some(Instant::now() + Duration::from_secs(ttl_secs));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_and_get_roundtrip() {
        let cache = InMemoryCache::new();
        cache.set("k", "v".to_string()).await;
        assert_eq!(cache.get("k").await, Some("v".to_string()));
    }

    #[tokio::test]
    async fn hash_fields_are_independent_of_string_values() {
        let cache = InMemoryCache::new();
        cache.hset("h", "f1", "a".to_string()).await;
        cache.hset("h", "f2", "b".to_string()).await;
        assert_eq!(cache.hget("h", "f1").await, Some("a".to_string()));
        assert_eq!(cache.hget("h", "f2").await, Some("b".to_string()));
    }

    #[tokio::test]
    async fn delete_removes_entry() {
        let cache = InMemoryCache::new();
        cache.set("k", "v".to_string()).await;
        cache.delete("k").await;
        assert!(!cache.exists("k").await);
    }
}
