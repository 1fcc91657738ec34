use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::chat::{ChatMessage, ChatRole};
use crate::{CompleteOptions, Llm, LlmOutput};

/// Thin adapter over Ollama's `/api/chat` endpoint. Real-provider wiring is
/// out of scope design-wise (spec.md §1); kept in the teacher's idiom as an
/// optional alternative to `MockLlm`.
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), model: model.into(), client: reqwest::Client::new() }
    }
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: OllamaMessage,
}

#[derive(Deserialize)]
struct OllamaMessage {
    content: String,
}

#[async_trait]
impl Llm for OllamaClient {
    async fn complete(&self, prompt: &str, opts: CompleteOptions) -> anyhow::Result<LlmOutput> {
        let messages = vec![ChatMessage { role: ChatRole::User, content: Some(prompt.to_string()), tool_calls: Vec::new(), tool_call_id: None }];

        let body = json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
            "options": { "temperature": opts.temperature },
            "format": if opts.response_format_json { "json" } else { serde_json::Value::Null },
        });

        let timeout = std::time::Duration::from_millis(opts.timeout_ms.max(1));
        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&body)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?
            .json::<OllamaChatResponse>()
            .await?;

        Ok(LlmOutput::Content { text: response.message.content })
    }
}
