use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use opentelemetry::trace::TraceContextExt;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::reports::{ReportError, ReportKind};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Report error: {source}")]
    Report {
        kind: ReportKind,
        #[source]
        source: ReportError,
    },

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Unparsable analysis reply")]
    UnparsableAnalysis { raw_response: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Report {
                source: ReportError::NotFound { .. } | ReportError::Unavailable { .. },
                ..
            } => StatusCode::NOT_FOUND,
            AppError::Report { .. } | AppError::Upstream(_) | AppError::UnparsableAnalysis { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn body(&self) -> Value {
        match self {
            AppError::Validation(msg) => json!({
                "error": "Invalid input",
                "message": msg,
            }),
            AppError::Report {
                kind,
                source: ReportError::NotFound { .. } | ReportError::Unavailable { .. },
            } => json!({
                "found": false,
                "message": format!("No {} report found", describe(*kind)),
            }),
            AppError::Report { kind, source } => {
                tracing::error!(error = %source, report.kind = %kind, "Report load failed");
                json!({
                    "error": load_failure_label(*kind),
                    "message": source.to_string(),
                })
            }
            AppError::Upstream(msg) => {
                tracing::error!(error = %msg, "Analysis provider call failed");
                json!({
                    "error": "Analysis failed",
                    "message": msg,
                })
            }
            AppError::UnparsableAnalysis { raw_response } => {
                tracing::warn!(
                    raw_len = raw_response.len(),
                    "Analysis reply is not valid JSON, returning raw text"
                );
                json!({
                    "success": false,
                    "error": "Failed to parse AI response",
                    "raw_response": raw_response,
                })
            }
        }
    }
}

fn describe(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::General => "extracted data",
        ReportKind::Anomalies => "anomaly",
        ReportKind::Payroll => "payroll",
    }
}

fn load_failure_label(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::General => "Failed to load data",
        ReportKind::Anomalies => "Failed to load anomaly data",
        ReportKind::Payroll => "Failed to load payroll data",
    }
}

fn get_trace_id() -> Option<String> {
    let span = Span::current();
    let context = span.context();
    let span_ref = context.span();
    let span_context = span_ref.span_context();

    if span_context.is_valid() {
        Some(span_context.trace_id().to_string())
    } else {
        None
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = self.body();

        if let (Some(trace_id), Some(obj)) = (get_trace_id(), body.as_object_mut()) {
            obj.insert("trace_id".to_string(), Value::String(trace_id));
        }

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
