use opentelemetry::KeyValue;
use serde::Deserialize;
use serde_json::Value;

use super::model::AnalysisResult;
use super::prompt::{SYSTEM_PROMPT, build_prompt, truncate_batch};
use super::reply::{AnalysisOutcome, parse_reply};
use crate::config::Config;
use crate::error::AppError;
use crate::llm::{GenerateRequest, LlmClient};
use crate::telemetry::metrics::{ANALYSIS_BATCH_SIZE, ANALYSIS_OUTCOMES};

const INVALID_RFCS: &str = "Please provide an array of RFCs";

#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub max_rfcs: usize,
}

impl AnalysisSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.llm_model.clone(),
            temperature: config.llm_temperature,
            max_tokens: config.llm_max_tokens,
            max_rfcs: config.analysis_max_rfcs.max(1),
        }
    }
}

/// Extracts the `rfcs` list from a request body. Anything other than a
/// non-empty array of strings is rejected.
pub fn validate_rfcs(body: &Value) -> Result<Vec<String>, AppError> {
    let items = body
        .get("rfcs")
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
        .ok_or_else(|| AppError::Validation(INVALID_RFCS.to_string()))?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| AppError::Validation(format!("{INVALID_RFCS} (strings only)")))
        })
        .collect()
}

/// Sends the first `max_rfcs` identifiers for classification in a single
/// provider call. A reply that is not JSON is an `Unparsed` outcome, not an
/// error; only a failed call is.
#[tracing::instrument(
    name = "analysis classify_rfcs",
    skip(llm_client, settings, rfcs),
    fields(
        analysis.requested = rfcs.len(),
        analysis.sent,
        analysis.model = %settings.model,
        analysis.outcome,
        analysis.flagged,
        analysis.highest_tier,
        analysis.compliance_score,
    )
)]
pub async fn analyze_rfcs(
    llm_client: &LlmClient,
    settings: &AnalysisSettings,
    rfcs: &[String],
) -> Result<AnalysisOutcome, AppError> {
    if rfcs.is_empty() {
        return Err(AppError::Validation(INVALID_RFCS.to_string()));
    }

    let batch = truncate_batch(rfcs, settings.max_rfcs);
    let span = tracing::Span::current();
    span.record("analysis.sent", batch.len());
    ANALYSIS_BATCH_SIZE.record(batch.len() as f64, &[]);

    if batch.len() < rfcs.len() {
        tracing::info!(
            requested = rfcs.len(),
            sent = batch.len(),
            "RFC batch truncated"
        );
    }

    let resp = llm_client
        .generate(&GenerateRequest {
            model: settings.model.clone(),
            system: SYSTEM_PROMPT.to_string(),
            prompt: build_prompt(batch),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            operation: "classify_rfcs".to_string(),
        })
        .await
        .map_err(|e| {
            record_outcome("failed", llm_client.provider_name());
            AppError::Upstream(e.to_string())
        })?;

    let outcome = parse_reply(&resp.content);
    span.record("analysis.outcome", outcome.label());
    record_outcome(outcome.label(), llm_client.provider_name());

    if let AnalysisOutcome::Parsed(value) = &outcome {
        inspect_result(value);
    }

    Ok(outcome)
}

fn record_outcome(outcome: &'static str, provider: &str) {
    ANALYSIS_OUTCOMES.add(
        1,
        &[
            KeyValue::new("analysis.outcome", outcome),
            KeyValue::new("gen_ai.provider.name", provider.to_string()),
        ],
    );
}

fn inspect_result(value: &Value) {
    let span = tracing::Span::current();
    match AnalysisResult::deserialize(value) {
        Ok(result) => {
            span.record("analysis.flagged", result.flagged_rfcs.len());
            if let Some(tier) = result.highest_tier() {
                span.record("analysis.highest_tier", tier.as_str());
            }
            if let Some(score) = result.compliance_score {
                span.record("analysis.compliance_score", score);
            }
            if !result.score_in_range() {
                tracing::warn!(
                    compliance_score = result.compliance_score,
                    "Compliance score outside 0-100"
                );
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "Analysis reply does not follow the requested schema");
        }
    }
}
