use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::{CompleteOptions, Llm, LlmOutput};

/// Thin adapter over OpenRouter's OpenAI-compatible chat completions
/// endpoint. Real-provider wiring is out of scope design-wise (spec.md
/// §1); kept in the teacher's idiom as an optional alternative to
/// `MockLlm`.
pub struct OpenRouterClient {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenRouterClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), model: model.into(), client: reqwest::Client::new() }
    }
}

#[derive(Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}

#[async_trait]
impl Llm for OpenRouterClient {
    async fn complete(&self, prompt: &str, opts: CompleteOptions) -> anyhow::Result<LlmOutput> {
        let mut body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": opts.temperature,
        });
        if opts.response_format_json {
            body["response_format"] = json!({"type": "json_object"});
        }

        let timeout = std::time::Duration::from_millis(opts.timeout_ms.max(1));
        let response = self
            .client
            .post("https://openrouter.ai/api/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&body)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?
            .json::<OpenAiChatResponse>()
            .await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| anyhow::anyhow!("empty completion from OpenRouter"))?;

        Ok(LlmOutput::Content { text: content })
    }
}
