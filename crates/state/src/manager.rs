use std::sync::Arc;

use crate::cache::Cache;
use crate::database::Database;
use crate::session::{HistoryEntry, SessionContext};

const SESSION_TTL_SECS: u64 = 3600;

fn session_key(session_id: &str) -> String {
    format!("session:{session_id}")
}

/// `entities[key]` is either a bare value or a serialized `ExtractedEntity`
/// (`{"value": ..., ...}`) — unwrap the latter so carry-over tracking works
/// regardless of which shape the caller passed in.
fn raw_value<'a>(entities: &'a serde_json::Value, key: &str) -> Option<&'a serde_json::Value> {
    match entities.get(key)? {
        serde_json::Value::Object(map) if map.contains_key("value") => map.get("value"),
        other => Some(other),
    }
}

/// The only stateful component of the core — owns `SessionContext` per
/// `sessionId`, backed by a cache (authoritative within a session) and a
/// database (best-effort history hydration/logging) — spec.md §4.7.
pub struct StateManager {
    cache: Arc<dyn Cache>,
    database: Arc<dyn Database>,
}

impl StateManager {
    pub fn new(cache: Arc<dyn Cache>, database: Arc<dyn Database>) -> Self {
        Self { cache, database }
    }

    pub async fn get_context(&self, session_id: &str) -> SessionContext {
        let key = session_key(session_id);
        if let Some(raw) = self.cache.get(&key).await {
            if let Ok(context) = serde_json::from_str(&raw) {
                return context;
            }
        }

        let mut context = SessionContext::new(session_id);
        if let Ok(history) = self.database.get_session_history(session_id, crate::session::HISTORY_LIMIT).await {
            for entry in history {
                if let Ok(entry) = serde_json::from_value::<HistoryEntry>(entry) {
                    context.push_history(entry);
                }
            }
        }
        self.save(&context).await;
        context
    }

    pub async fn save(&self, context: &SessionContext) {
        if let Ok(serialized) = serde_json::to_string(context) {
            self.cache.set_ex(&session_key(&context.session_id), serialized, SESSION_TTL_SECS).await;
        }
    }

    /// Extracts `lastRecipient/Amount/Account/Intent`, records a history
    /// entry, truncates, saves to cache, and logs to the database
    /// asynchronously — failures there are logged and swallowed.
    pub async fn update(&self, context: &mut SessionContext, original: &str, resolved: &str, intent_id: &str, confidence: f64, entities: serde_json::Value) {
        context.last_intent = Some(intent_id.to_string());
        if let Some(amount) = raw_value(&entities, "amount").and_then(|v| v.as_f64()) {
            context.last_amount = Some(amount);
        }
        if let Some(recipient) = raw_value(&entities, "recipient").and_then(|v| v.as_str().map(str::to_string)) {
            context.last_recipient = Some(recipient);
        }
        if let Some(account) = raw_value(&entities, "account_id")
            .or_else(|| raw_value(&entities, "from_account"))
            .and_then(|v| v.as_str().map(str::to_string))
        {
            context.last_account_id = Some(account);
        }

        let entry = HistoryEntry {
            timestamp: chrono::Utc::now(),
            original: original.to_string(),
            resolved: resolved.to_string(),
            intent: intent_id.to_string(),
            confidence,
            entities: entities.clone(),
        };
        context.push_history(entry.clone());
        self.save(context).await;

        if let Ok(serialized) = serde_json::to_value(&entry) {
            if let Err(err) = self.database.log_interaction(&context.session_id, serialized).await {
                tracing::warn!(session_id = %context.session_id, %err, "failed to log interaction to database");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCache;
    use crate::database::InMemoryDatabase;

    fn manager() -> StateManager {
        StateManager::new(Arc::new(InMemoryCache::new()), Arc::new(InMemoryDatabase::new()))
    }

    #[tokio::test]
    async fn fresh_session_has_empty_history() {
        let manager = manager();
        let context = manager.get_context("s1").await;
        assert!(context.history.is_empty());
    }

    #[tokio::test]
    async fn saved_context_round_trips_through_cache() {
        let manager = manager();
        let mut context = manager.get_context("s1").await;
        manager.update(&mut context, "send $50 to John", "send $50 to John", "payments.p2p.send", 0.9, serde_json::json!({"amount": 50.0, "recipient": "John"})).await;

        let reloaded = manager.get_context("s1").await;
        assert_eq!(reloaded.last_amount, Some(50.0));
        assert_eq!(reloaded.last_recipient.as_deref(), Some("John"));
        assert_eq!(reloaded.history.len(), 1);
    }
}
