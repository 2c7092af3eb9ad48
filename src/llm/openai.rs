use async_openai::{
    Client,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
    },
};

use super::{GenerateRequest, GenerateResponse, Provider};

const GOOGLE_OPENAI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Chat completions over the OpenAI wire format. Gemini and Ollama both
/// expose a compatible endpoint, so one client covers all three.
pub struct OpenAIProvider {
    client: Client<OpenAIConfig>,
    provider_name: &'static str,
    server_address: String,
    server_port: i64,
}

impl OpenAIProvider {
    pub fn new(api_key: &str) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Client::with_config(config),
            provider_name: "openai",
            server_address: "api.openai.com".to_string(),
            server_port: 443,
        }
    }

    pub fn new_google(api_key: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(GOOGLE_OPENAI_BASE);
        Self {
            client: Client::with_config(config),
            provider_name: "google",
            server_address: "generativelanguage.googleapis.com".to_string(),
            server_port: 443,
        }
    }

    pub fn new_ollama(base_url: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key("ollama")
            .with_api_base(format!("{base_url}/v1"));
        let (server_address, server_port) = split_host_port(base_url);
        Self {
            client: Client::with_config(config),
            provider_name: "ollama",
            server_address,
            server_port,
        }
    }
}

/// Host and port of `base_url` for span attributes. Unparseable URLs report
/// `unknown:443`.
fn split_host_port(base_url: &str) -> (String, i64) {
    match reqwest::Url::parse(base_url) {
        Ok(url) => match url.host_str() {
            Some(host) => (
                host.to_string(),
                url.port_or_known_default().map_or(443, i64::from),
            ),
            None => ("unknown".to_string(), 443),
        },
        Err(_) => ("unknown".to_string(), 443),
    }
}

#[async_trait::async_trait]
impl Provider for OpenAIProvider {
    async fn generate(&self, req: &GenerateRequest) -> anyhow::Result<GenerateResponse> {
        let mut messages = Vec::with_capacity(2);
        if !req.system.is_empty() {
            messages.push(ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessage {
                    content: ChatCompletionRequestSystemMessageContent::Text(req.system.clone()),
                    name: None,
                },
            ));
        }
        messages.push(ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(req.prompt.clone()),
                name: None,
            },
        ));

        #[allow(deprecated)]
        let request = CreateChatCompletionRequest {
            model: req.model.clone(),
            messages,
            temperature: Some(req.temperature),
            max_completion_tokens: Some(req.max_tokens),
            ..Default::default()
        };

        let response = self.client.chat().create(request).await?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        let finish_reason = response
            .choices
            .first()
            .and_then(|c| c.finish_reason)
            .map(|r| format!("{r:?}").to_lowercase())
            .unwrap_or_default();

        let (input_tokens, output_tokens) = match &response.usage {
            Some(usage) => (usage.prompt_tokens, usage.completion_tokens),
            None => (0, 0),
        };

        Ok(GenerateResponse {
            content,
            model: response.model,
            input_tokens,
            output_tokens,
            finish_reason,
        })
    }

    fn name(&self) -> &str {
        self.provider_name
    }

    fn server(&self) -> (&str, i64) {
        (&self.server_address, self.server_port)
    }
}
