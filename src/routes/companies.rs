use axum::{Json, extract::State};
use serde::Serialize;

use crate::AppState;
use crate::reports::{Company, ReportKind};

#[derive(Debug, Serialize)]
pub struct CompanySummary {
    pub id: Company,
    pub name: &'static str,
    pub rfc: &'static str,
    pub path: &'static str,
    pub reports: ReportAvailability,
}

/// Per kind: `None` when the company has no such report, otherwise whether
/// the file is currently on disk.
#[derive(Debug, Serialize)]
pub struct ReportAvailability {
    pub general: Option<bool>,
    pub anomalies: Option<bool>,
    pub payroll: Option<bool>,
}

pub async fn list_companies(State(state): State<AppState>) -> Json<Vec<CompanySummary>> {
    let mut companies = Vec::with_capacity(Company::ALL.len());

    for company in Company::ALL {
        companies.push(CompanySummary {
            id: company,
            name: company.display_name(),
            rfc: company.rfc(),
            path: company.dashboard_path(),
            reports: ReportAvailability {
                general: available(&state, company, ReportKind::General).await,
                anomalies: available(&state, company, ReportKind::Anomalies).await,
                payroll: available(&state, company, ReportKind::Payroll).await,
            },
        });
    }

    Json(companies)
}

async fn available(state: &AppState, company: Company, kind: ReportKind) -> Option<bool> {
    let path = state.reports.path_for(company, kind)?;
    Some(tokio::fs::try_exists(&path).await.unwrap_or(false))
}
