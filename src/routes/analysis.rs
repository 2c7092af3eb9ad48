use axum::{Json, body::Bytes, extract::State};
use serde_json::{Value, json};

use super::timestamp;
use crate::AppState;
use crate::analysis::{AnalysisOutcome, analyze_rfcs, validate_rfcs};
use crate::error::{AppError, AppResult};

/// The body is parsed regardless of `Content-Type`; the dashboard's fetch
/// calls do not always set it.
pub async fn analyze_efos(State(state): State<AppState>, body: Bytes) -> AppResult<Json<Value>> {
    let body: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("Request body is not valid JSON: {e}")))?;
    let rfcs = validate_rfcs(&body)?;

    match analyze_rfcs(&state.llm_client, &state.analysis, &rfcs).await? {
        AnalysisOutcome::Parsed(analysis) => Ok(Json(json!({
            "success": true,
            "analysis": analysis,
            "timestamp": timestamp(),
        }))),
        AnalysisOutcome::Unparsed { raw_response } => {
            Err(AppError::UnparsableAnalysis { raw_response })
        }
    }
}
