use async_trait::async_trait;

use crate::{CompleteOptions, Llm, LlmOutput, MockLlm, OllamaClient, OpenRouterClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Mock,
    Ollama,
    OpenRouter,
}

/// Dispatches to a primary provider and, on failure, to an optional
/// fallback — spec.md §6.6's `llm_fallback_provider`/`llm_fallback_model`.
/// A provider failure is never fatal to the turn: callers treat an `Err`
/// from `complete` as `LLMUnavailable` (spec.md §7) and fall back further
/// (rule-based classification, empty-but-structured extraction).
pub struct LlmRouter {
    primary: Box<dyn Llm>,
    fallback: Option<Box<dyn Llm>>,
}

impl LlmRouter {
    pub fn new(primary: Box<dyn Llm>) -> Self {
        Self { primary, fallback: None }
    }

    pub fn with_fallback(mut self, fallback: Box<dyn Llm>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn from_config(
        provider: Provider,
        model: &str,
        ollama_base_url: &str,
        openrouter_api_key: &str,
        fallback: Option<(Provider, &str)>,
    ) -> Self {
        let primary = build_provider(provider, model, ollama_base_url, openrouter_api_key);
        let mut router = Self::new(primary);
        if let Some((fallback_provider, fallback_model)) = fallback {
            router = router.with_fallback(build_provider(
                fallback_provider,
                fallback_model,
                ollama_base_url,
                openrouter_api_key,
            ));
        }
        router
    }
}

fn build_provider(provider: Provider, model: &str, ollama_base_url: &str, openrouter_api_key: &str) -> Box<dyn Llm> {
    match provider {
        Provider::Mock => Box::new(MockLlm),
        Provider::Ollama => Box::new(OllamaClient::new(ollama_base_url, model)),
        Provider::OpenRouter => Box::new(OpenRouterClient::new(openrouter_api_key, model)),
    }
}

#[async_trait]
impl Llm for LlmRouter {
    async fn complete(&self, prompt: &str, opts: CompleteOptions) -> anyhow::Result<LlmOutput> {
        match self.primary.complete(prompt, opts.clone()).await {
            Ok(output) => Ok(output),
            Err(primary_err) => match &self.fallback {
                Some(fallback) => fallback.complete(prompt, opts).await.map_err(|fallback_err| {
                    tracing::warn!(%primary_err, %fallback_err, "both primary and fallback LLM providers failed");
                    fallback_err
                }),
                None => {
                    tracing::warn!(%primary_err, "primary LLM provider failed with no fallback configured");
                    Err(primary_err)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysOk;

    #[async_trait]
    impl Llm for AlwaysOk {
        async fn complete(&self, _prompt: &str, _opts: CompleteOptions) -> anyhow::Result<LlmOutput> {
            Ok(LlmOutput::Content { text: "ok".to_string() })
        }
    }

    #[tokio::test]
    async fn falls_back_when_primary_fails() {
        let router = LlmRouter::new(Box::new(MockLlm)).with_fallback(Box::new(AlwaysOk));
        let result = router.complete("hello", CompleteOptions::default()).await.unwrap();
        assert_eq!(result.as_text(), Some("ok"));
    }

    #[tokio::test]
    async fn propagates_error_with_no_fallback() {
        let router = LlmRouter::new(Box::new(MockLlm));
        assert!(router.complete("hello", CompleteOptions::default()).await.is_err());
    }
}
