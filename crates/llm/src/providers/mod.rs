mod ollama;
mod openrouter;

pub use ollama::OllamaClient;
pub use openrouter::OpenRouterClient;
