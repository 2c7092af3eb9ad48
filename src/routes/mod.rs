pub mod analysis;
pub mod companies;
pub mod health;
pub mod reports;

use axum::{
    Router,
    routing::{get, post},
};
use chrono::{SecondsFormat, Utc};

use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/companies", get(companies::list_companies))
        .route("/api/data", get(reports::get_data))
        .route("/api/anomalies", get(reports::get_anomalies))
        .route("/api/payroll", get(reports::get_payroll))
        .route("/api/analyze-efos", post(analysis::analyze_efos))
        .with_state(state)
}

/// Response timestamp, RFC 3339 in UTC with millisecond precision.
pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
