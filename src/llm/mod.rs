pub mod anthropic;
pub mod client;
pub mod openai;

use std::sync::Arc;

pub use client::LlmClient;

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub operation: String,
}

#[derive(Debug, Clone)]
pub struct GenerateResponse {
    pub content: String,
    pub model: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub finish_reason: String,
}

#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    async fn generate(&self, req: &GenerateRequest) -> anyhow::Result<GenerateResponse>;
    fn name(&self) -> &str;

    /// Host and port reported as `server.address` / `server.port` on spans.
    fn server(&self) -> (&str, i64) {
        ("unknown", 443)
    }
}

/// Builds the provider selected by `LLM_PROVIDER`. Unknown names use Google,
/// the provider the dashboard was built against.
pub fn provider_from_config(config: &Config) -> Arc<dyn Provider> {
    match config.llm_provider.as_str() {
        "anthropic" => Arc::new(anthropic::AnthropicProvider::new(config.llm_api_key())),
        "openai" => Arc::new(openai::OpenAIProvider::new(config.llm_api_key())),
        "ollama" => Arc::new(openai::OpenAIProvider::new_ollama(&config.ollama_base_url)),
        _ => Arc::new(openai::OpenAIProvider::new_google(config.llm_api_key())),
    }
}
