use std::env;
use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub fallback_provider: String,
    pub fallback_model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "mock".to_string(),
            model: String::new(),
            timeout_secs: 15,
            max_retries: 3,
            fallback_provider: String::new(),
            fallback_model: String::new(),
        }
    }
}

/// `redis_url`/`database_url` both default to the `"mock"` sentinel —
/// `cba-state` reads it to pick the in-memory `Cache`/`Database` impls
/// rather than dialing out to a real backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    pub redis_url: String,
    pub database_url: String,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self { redis_url: "mock".to_string(), database_url: "mock".to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub session_ttl_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { session_ttl_seconds: 3600 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub rate_limit_per_minute: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self { rate_limit_per_minute: 30 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub persistence: PersistenceConfig,
    pub session: SessionConfig,
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::default();
        if let Ok(raw) = fs::read_to_string(path) {
            config = toml::from_str(&raw)?;
        }

        if let Ok(value) = env::var("LLM_PROVIDER") {
            if !value.is_empty() {
                config.llm.provider = value;
            }
        }
        if let Ok(value) = env::var("REDIS_URL") {
            if !value.is_empty() {
                config.persistence.redis_url = value;
            }
        }
        if let Ok(value) = env::var("DATABASE_URL") {
            if !value.is_empty() {
                config.persistence.database_url = value;
            }
        }

        Ok(config)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let rendered = toml::to_string_pretty(self)?;
        fs::write(path, rendered)?;
        Ok(())
    }

    pub fn uses_mock_persistence(&self) -> bool {
        self.persistence.redis_url == "mock" && self.persistence.database_url == "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_mock_persistence() {
        let config = AppConfig::default();
        assert!(config.uses_mock_persistence());
        assert_eq!(config.session.session_ttl_seconds, 3600);
        assert_eq!(config.rate_limit.rate_limit_per_minute, 30);
    }

    #[test]
    fn round_trips_through_toml() {
        let config = AppConfig::default();
        let rendered = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.llm.provider, config.llm.provider);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_from("/nonexistent/path/does-not-exist.toml").unwrap();
        assert_eq!(config.llm.provider, "mock");
    }
}
