use async_trait::async_trait;

use crate::{CompleteOptions, Llm, LlmOutput};

/// Deterministic `llm_provider = "mock"` implementation. Always reports
/// unavailability so that callers exercise their documented fallback paths
/// (classifier → `catalog.match`, extractor → empty-but-structured result)
/// rather than depending on a live model, per spec.md's Non-goal of
/// "training or hosting any language model".
#[derive(Debug, Default, Clone, Copy)]
pub struct MockLlm;

#[async_trait]
impl Llm for MockLlm {
    async fn complete(&self, _prompt: &str, _opts: CompleteOptions) -> anyhow::Result<LlmOutput> {
        Err(anyhow::anyhow!("mock LLM provider has no model backing"))
    }
}
