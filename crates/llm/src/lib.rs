//! LLM collaborator contract (spec.md §6.3, §6.6) plus provider
//! implementations. The core depends only on the `Llm` trait; `MockLlm` is
//! the deterministic default (`llm_provider = "mock"`), and `OllamaClient`/
//! `OpenRouterClient` are optional real adapters kept in the teacher's own
//! idiom for completeness. Concrete provider adapters are explicitly OUT OF
//! SCOPE design-wise per spec.md §1 — they carry no interesting logic here.

mod chat;
mod mock;
mod providers;
mod router;
mod structured;

pub use chat::{ChatMessage, ChatRole, ToolCall, ToolCallFunction};
pub use mock::MockLlm;
pub use providers::{OllamaClient, OpenRouterClient};
pub use router::{LlmRouter, Provider};
pub use structured::{extract_json_output, StructuredOutput};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Options accompanying an `Llm::complete` call. Mirrors spec.md §6.3:
/// `opts` may request `responseFormat=json_object` and/or a named
/// function-call tool; the core tolerates function-call support being
/// absent and falls back to JSON mode.
#[derive(Debug, Clone, Default)]
pub struct CompleteOptions {
    pub response_format_json: bool,
    pub function_name: Option<String>,
    pub temperature: f64,
    pub timeout_ms: u64,
}

impl CompleteOptions {
    pub fn json(temperature: f64, timeout_ms: u64) -> Self {
        Self { response_format_json: true, function_name: None, temperature, timeout_ms }
    }
}

/// Result of an `Llm::complete` call — either free text or a structured
/// function/tool call, never both. `Llm::complete` returning `Err` models
/// the `error` branch of spec.md §6.3's `{content | functionCall | error}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum LlmOutput {
    Content { text: String },
    FunctionCall { name: String, arguments: serde_json::Value },
}

impl LlmOutput {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            LlmOutput::Content { text } => Some(text),
            LlmOutput::FunctionCall { .. } => None,
        }
    }
}

/// Provider-agnostic LLM contract consumed by `cba-classifier` and
/// `cba-extractor`. Every inter-component boundary in the core returns a
/// result type (spec.md §9) — providers never panic across this boundary.
#[async_trait]
pub trait Llm: Send + Sync {
    async fn complete(&self, prompt: &str, opts: CompleteOptions) -> anyhow::Result<LlmOutput>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_llm_is_deterministically_unavailable() {
        let llm = MockLlm::default();
        let result = llm.complete("classify: what's my balance?", CompleteOptions::json(0.2, 3000)).await;
        assert!(result.is_err());
    }
}
