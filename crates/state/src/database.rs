use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// `Database.{CreateSession,GetSession,LogInteraction,GetSessionHistory,
/// UpdateAnalytics,CleanupOldSessions}` — spec.md §6.3. Analytics and
/// history writes are fire-and-forget; reads only occur on session
/// hydration. A real Postgres-backed implementation is out of scope per
/// spec.md §1; `InMemoryDatabase` backs the `"mock"` sentinel.
#[async_trait]
pub trait Database: Send + Sync {
    async fn create_session(&self, session_id: &str) -> anyhow::Result<()>;
    async fn get_session(&self, session_id: &str) -> anyhow::Result<Option<serde_json::Value>>;
    async fn log_interaction(&self, session_id: &str, entry: serde_json::Value) -> anyhow::Result<()>;
    async fn get_session_history(&self, session_id: &str, limit: usize) -> anyhow::Result<Vec<serde_json::Value>>;
    async fn update_analytics(&self, session_id: &str, data: serde_json::Value) -> anyhow::Result<()>;
    async fn cleanup_old_sessions(&self, older_than_secs: u64) -> anyhow::Result<()>;
}

struct SessionRow {
    created_at: DateTime<Utc>,
    history: Vec<serde_json::Value>,
    analytics: serde_json::Value,
}

pub struct InMemoryDatabase {
    sessions: RwLock<HashMap<String, SessionRow>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self { sessions: RwLock::new(HashMap::new()) }
    }
}

impl Default for InMemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Database for InMemoryDatabase {
    async fn create_session(&self, session_id: &str) -> anyhow::Result<()> {
        self.sessions
            .write()
            .unwrap()
            .entry(session_id.to_string())
            .or_insert_with(|| SessionRow { created_at: Utc::now(), history: Vec::new(), analytics: serde_json::json!({}) });
        Ok(())
    }

    async fn get_session(&self, session_id: &str) -> anyhow::Result<Option<serde_json::Value>> {
        Ok(self.sessions.read().unwrap().get(session_id).map(|row| serde_json::json!({"created_at": row.created_at})))
    }

    async fn log_interaction(&self, session_id: &str, entry: serde_json::Value) -> anyhow::Result<()> {
        let mut sessions = self.sessions.write().unwrap();
        let row = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionRow { created_at: Utc::now(), history: Vec::new(), analytics: serde_json::json!({}) });
        row.history.push(entry);
        Ok(())
    }

    async fn get_session_history(&self, session_id: &str, limit: usize) -> anyhow::Result<Vec<serde_json::Value>> {
        let sessions = self.sessions.read().unwrap();
        Ok(sessions.get(session_id).map(|row| row.history.iter().rev().take(limit).rev().cloned().collect()).unwrap_or_default())
    }

    async fn update_analytics(&self, session_id: &str, data: serde_json::Value) -> anyhow::Result<()> {
        let mut sessions = self.sessions.write().unwrap();
        let row = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionRow { created_at: Utc::now(), history: Vec::new(), analytics: serde_json::json!({}) });
        row.analytics = data;
        Ok(())
    }

    async fn cleanup_old_sessions(&self, older_than_secs: u64) -> anyhow::Result<()> {
        let cutoff = Utc::now() - chrono::Duration::seconds(older_than_secs as i64);
        self.sessions.write().unwrap().retain(|_, row| row.created_at > cutoff);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_interaction_is_retrievable_as_history() {
        let db = InMemoryDatabase::new();
        db.log_interaction("s1", serde_json::json!({"turn": 1})).await.unwrap();
        db.log_interaction("s1", serde_json::json!({"turn": 2})).await.unwrap();
        let history = db.get_session_history("s1", 10).await.unwrap();
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn cleanup_keeps_sessions_newer_than_cutoff() {
        let db = InMemoryDatabase::new();
        db.create_session("s1").await.unwrap();
        db.cleanup_old_sessions(3600).await.unwrap();
        assert!(db.get_session("s1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn cleanup_removes_sessions_older_than_cutoff() {
        let db = InMemoryDatabase::new();
        db.create_session("s1").await.unwrap();
        db.cleanup_old_sessions(0).await.unwrap();
        assert!(db.get_session("s1").await.unwrap().is_none());
    }
}
