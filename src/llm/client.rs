use std::sync::Arc;
use std::time::Instant;

use opentelemetry::KeyValue;
use tracing::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use super::{GenerateRequest, GenerateResponse, Provider};
use crate::telemetry::metrics::{
    GEN_AI_ERROR_COUNT, GEN_AI_OPERATION_DURATION, GEN_AI_TOKEN_USAGE,
};

/// Instrumented access to one provider. Every call is a single attempt:
/// no retry, no fallback provider, no caching of identical prompts.
pub struct LlmClient {
    provider: Arc<dyn Provider>,
}

impl LlmClient {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn generate(&self, req: &GenerateRequest) -> anyhow::Result<GenerateResponse> {
        let provider_name = self.provider.name().to_string();
        let (server_addr, server_port) = self.provider.server();
        let span_display_name = format!("gen_ai.chat {}", req.model);
        let start = Instant::now();

        let span = tracing::info_span!(
            "gen_ai.chat",
            otel.name = %span_display_name,
            gen_ai.operation.name = "chat",
            gen_ai.provider.name = %provider_name,
            gen_ai.request.model = %req.model,
            server.address = %server_addr,
            server.port = server_port,
            gen_ai.request.temperature = req.temperature,
            gen_ai.request.max_tokens = req.max_tokens as i64,
            gen_ai.response.model = tracing::field::Empty,
            gen_ai.usage.input_tokens = tracing::field::Empty,
            gen_ai.usage.output_tokens = tracing::field::Empty,
            gen_ai.response.finish_reasons = tracing::field::Empty,
            audit.operation = %req.operation,
            otel.status_code = tracing::field::Empty,
            error.type = tracing::field::Empty,
        );

        {
            let mut user_event_attrs =
                vec![KeyValue::new("gen_ai.prompt", truncate(&req.prompt, 1000))];
            if !req.system.is_empty() {
                user_event_attrs.push(KeyValue::new(
                    "gen_ai.system_instructions",
                    truncate(&req.system, 500),
                ));
            }
            span.add_event("gen_ai.user.message", user_event_attrs);
        }

        let result = self.provider.generate(req).instrument(span.clone()).await;

        let duration = start.elapsed().as_secs_f64();
        let op_kv = KeyValue::new("gen_ai.operation.name", "chat");
        let provider_kv = KeyValue::new("gen_ai.provider.name", provider_name.clone());

        match result {
            Ok(resp) => {
                span.record("gen_ai.response.model", resp.model.as_str());
                span.record("gen_ai.usage.input_tokens", resp.input_tokens as i64);
                span.record("gen_ai.usage.output_tokens", resp.output_tokens as i64);
                if !resp.finish_reason.is_empty() {
                    span.record(
                        "gen_ai.response.finish_reasons",
                        resp.finish_reason.as_str(),
                    );
                }

                span.add_event(
                    "gen_ai.assistant.message",
                    vec![KeyValue::new(
                        "gen_ai.completion",
                        truncate(&resp.content, 2000),
                    )],
                );

                let model_kv = KeyValue::new("gen_ai.request.model", resp.model.clone());

                GEN_AI_TOKEN_USAGE.record(
                    f64::from(resp.input_tokens),
                    &[
                        KeyValue::new("gen_ai.token.type", "input"),
                        op_kv.clone(),
                        provider_kv.clone(),
                        model_kv.clone(),
                    ],
                );
                GEN_AI_TOKEN_USAGE.record(
                    f64::from(resp.output_tokens),
                    &[
                        KeyValue::new("gen_ai.token.type", "output"),
                        op_kv.clone(),
                        provider_kv.clone(),
                        model_kv.clone(),
                    ],
                );
                GEN_AI_OPERATION_DURATION.record(duration, &[op_kv, provider_kv, model_kv]);

                Ok(resp)
            }
            Err(err) => {
                let error_type = classify_error(&err);
                span.record("otel.status_code", "ERROR");
                span.record("error.type", error_type);

                tracing::warn!(
                    parent: &span,
                    provider = %provider_name,
                    model = %req.model,
                    error.type = error_type,
                    error = %err,
                    "LLM call failed"
                );

                GEN_AI_ERROR_COUNT.add(
                    1,
                    &[
                        provider_kv,
                        KeyValue::new("gen_ai.request.model", req.model.clone()),
                        KeyValue::new("error.type", error_type),
                    ],
                );

                Err(err)
            }
        }
    }
}

fn classify_error(err: &anyhow::Error) -> &'static str {
    let msg = err.to_string().to_lowercase();
    if msg.contains("rate limit")
        || msg.contains("429")
        || msg.contains("quota")
        || msg.contains("resource_exhausted")
    {
        "rate_limit"
    } else if msg.contains("timeout") || msg.contains("timed out") || msg.contains("deadline") {
        "timeout"
    } else if msg.contains("401")
        || msg.contains("403")
        || msg.contains("auth")
        || msg.contains("api key")
        || msg.contains("permission_denied")
    {
        "auth_error"
    } else if msg.contains("400") || msg.contains("422") || msg.contains("invalid") {
        "invalid_request"
    } else if msg.contains("500")
        || msg.contains("502")
        || msg.contains("503")
        || msg.contains("server")
    {
        "server_error"
    } else if msg.contains("connect")
        || msg.contains("dns")
        || msg.contains("network")
        || msg.contains("reset")
    {
        "network_error"
    } else {
        "unknown_error"
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        s.char_indices()
            .take_while(|&(i, c)| i + c.len_utf8() <= max)
            .map(|(_, c)| c)
            .collect()
    }
}
