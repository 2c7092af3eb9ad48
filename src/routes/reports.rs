use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use super::timestamp;
use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::reports::{Company, ReportKind};

#[derive(Debug, Default, Deserialize)]
pub struct CompanyQuery {
    pub company: Option<String>,
}

async fn load(state: &AppState, query: &CompanyQuery, kind: ReportKind) -> AppResult<Value> {
    let company = Company::resolve(query.company.as_deref());
    tracing::debug!(
        selector = query.company.as_deref().unwrap_or(""),
        company = company.slug(),
        report.kind = %kind,
        "Resolved report selector"
    );

    state
        .reports
        .load(company, kind)
        .await
        .map_err(|source| AppError::Report { kind, source })
}

pub async fn get_data(
    State(state): State<AppState>,
    Query(query): Query<CompanyQuery>,
) -> AppResult<Json<Value>> {
    let data = load(&state, &query, ReportKind::General).await?;

    Ok(Json(json!({
        "success": true,
        "data": data,
        "timestamp": timestamp(),
    })))
}

pub async fn get_anomalies(
    State(state): State<AppState>,
    Query(query): Query<CompanyQuery>,
) -> AppResult<Json<Value>> {
    let data = load(&state, &query, ReportKind::Anomalies).await?;

    Ok(Json(json!({
        "success": true,
        "data": data,
        "timestamp": timestamp(),
    })))
}

/// Payroll audits only exist for some companies; for the rest this is an
/// ordinary answer, not a 404.
pub async fn get_payroll(
    State(state): State<AppState>,
    Query(query): Query<CompanyQuery>,
) -> AppResult<Json<Value>> {
    let company = Company::resolve(query.company.as_deref());
    if !company.publishes(ReportKind::Payroll) {
        return Ok(Json(json!({
            "hasPayroll": false,
            "message": "No payroll data for this company",
        })));
    }

    let data = load(&state, &query, ReportKind::Payroll).await?;

    Ok(Json(json!({
        "success": true,
        "hasPayroll": true,
        "data": data,
        "timestamp": timestamp(),
    })))
}
