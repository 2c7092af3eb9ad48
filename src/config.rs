use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub environment: String,
    pub reports_dir: PathBuf,
    pub llm_provider: String,
    pub llm_model: String,
    pub ollama_base_url: String,
    pub google_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    pub analysis_max_rfcs: usize,
    pub otel_service_name: String,
    pub otel_exporter_endpoint: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            port: parse_var("APP_PORT", 8080)?,
            environment: env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            reports_dir: env::var("REPORTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            llm_provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "google".to_string()),
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| "gemini-1.5-pro".to_string()),
            ollama_base_url: env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            google_api_key: env::var("GOOGLE_GENERATIVE_AI_API_KEY").ok(),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            anthropic_api_key: env::var("ANTHROPIC_API_KEY").ok(),
            llm_temperature: parse_var("LLM_TEMPERATURE", 0.2)?,
            llm_max_tokens: parse_var("LLM_MAX_TOKENS", 4096)?,
            analysis_max_rfcs: parse_var("ANALYSIS_MAX_RFCS", 30)?,
            otel_service_name: env::var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|_| "audit-dashboard".to_string()),
            otel_exporter_endpoint: env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:4317".to_string()),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// The API key matching `llm_provider`, empty when unset. A missing key
    /// surfaces as an authentication failure on the first provider call.
    pub fn llm_api_key(&self) -> &str {
        let key = match self.llm_provider.as_str() {
            "openai" => &self.openai_api_key,
            "anthropic" => &self.anthropic_api_key,
            _ => &self.google_api_key,
        };
        key.as_deref().unwrap_or("")
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(name: &str, raw: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("{name} must be a number, got {raw:?}"))
}
