mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{Reply, TestApp, write_file};

const MAJOBA: &str = "ctTransportes_Majoba_SA_De_CV-20251027-1050";

fn elizondo_general() -> Value {
    json!({
        "company": {"name": "TRANSPORTES ELIZONDO JIMENEZ", "rfc": "TEJ2304191I0"},
        "extraction_date": "2025-10-24T17:50:00",
        "statistics": {
            "total_rfcs": 3,
            "total_invoices": 1482,
            "total_amount": 18234567.89,
            "avg_amount": 12304.03
        },
        "rfcs": ["AAA010101AAA", "XEXX010101000", "GOMJ800101AB1"],
        "monthly_totals": {"2024-01": 1520344.1, "2024-02": 1387211.0}
    })
}

fn majoba_payroll() -> Value {
    json!({
        "company": {"name": "Transportes Majoba S.A. De C.V.", "rfc": "TMA1402281S3"},
        "total_employees_detected": 42,
        "sample_employees": ["PERL900202CD2", "SAMJ750505EF3"],
        "risk_findings": {
            "total_risks": 2,
            "breakdown": {"asimilados": 1, "outsourcing": 1},
            "evidence": [
                {"keyword": "asimilados", "context": "PAGO ASIMILADOS A SALARIOS QNA 14"},
                {"keyword": "outsourcing", "context": "SERVICIOS DE PERSONAL OUTSOURCING"}
            ]
        }
    })
}

#[tokio::test]
async fn test_data_returns_document_unchanged() {
    let doc = elizondo_general();
    let app = TestApp::with_files(
        Reply::Text("{}".to_string()),
        &[("data_elizondo_extracted.json", &doc.to_string())],
    );

    let (status, body) = app.get("/api/data").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], doc);
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_anomalies_missing_file_is_404() {
    let app = TestApp::new(Reply::Text("{}".to_string()));

    let (status, body) = app.get("/api/anomalies").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["found"], false);
    assert_eq!(body["message"], "No anomaly report found");
}

#[tokio::test]
async fn test_anomalies_invalid_json_is_500() {
    let app = TestApp::with_files(
        Reply::Text("{}".to_string()),
        &[("anomaly_report_elizondo.json", "{\"benford_analysis\": ")],
    );

    let (status, body) = app.get("/api/anomalies").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to load anomaly data");
    assert!(body["message"].as_str().unwrap().contains("not valid JSON"));
}

#[tokio::test]
async fn test_data_wrong_shape_is_500() {
    let app = TestApp::with_files(
        Reply::Text("{}".to_string()),
        &[("data_elizondo_extracted.json", "\"just a string\"")],
    );

    let (status, body) = app.get("/api/data").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to load data");
}

#[tokio::test]
async fn test_anomalies_accepts_placeholder_sections() {
    let doc = json!({
        "benford_analysis": {
            "status": "Analyzed",
            "risk_score": "MEDIUM",
            "suspicious_digits": [1, 7],
            "details": {"1": {"actual": 24.9, "expected": 30.1, "deviation": 5.2}}
        },
        "round_numbers": {"count": 37, "percentage": 2.5, "risk_level": "LOW"},
        "suspicious_concepts": []
    });
    let app = TestApp::with_files(
        Reply::Text("{}".to_string()),
        &[("anomaly_report_elizondo.json", &doc.to_string())],
    );

    let (status, body) = app.get("/api/anomalies").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], doc);
}

#[tokio::test]
async fn test_report_keeps_file_key_order() {
    let file = r#"{"suspicious_concepts":{"total_found":8,"top_keywords":{"efectivo":5,"ajuste":3},"samples":[]},"benford_analysis":{"status":"Analyzed"}}"#;
    let app = TestApp::with_files(
        Reply::Text("{}".to_string()),
        &[("anomaly_report_elizondo.json", file)],
    );

    let (status, body) = app.get_text("/api/anomalies").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(&format!(r#""data":{file}"#)), "{body}");
}

#[tokio::test]
async fn test_payroll_breakdown_keeps_first_keyword_first() {
    let file = r#"{"risk_findings":{"total_risks":4,"breakdown":{"outsourcing":3,"asimilados":1}}}"#;
    let app = TestApp::with_files(
        Reply::Text("{}".to_string()),
        &[("payroll_report_majoba.json", file)],
    );

    let (_, body) = app.get_text(&format!("/api/payroll?company={MAJOBA}")).await;

    assert!(
        body.contains(r#""breakdown":{"outsourcing":3,"asimilados":1}"#),
        "{body}"
    );
}

#[tokio::test]
async fn test_company_selector_picks_majoba_files() {
    let majoba = json!({"company": {"name": "Transportes Majoba S.A. De C.V."}, "rfcs": []});
    let app = TestApp::with_files(
        Reply::Text("{}".to_string()),
        &[
            ("data_elizondo_extracted.json", &elizondo_general().to_string()),
            ("data_majoba_extracted.json", &majoba.to_string()),
        ],
    );

    let (status, body) = app.get(&format!("/api/data?company={MAJOBA}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], majoba);
}

#[tokio::test]
async fn test_unknown_selector_falls_back_to_default() {
    let doc = elizondo_general();
    let app = TestApp::with_files(
        Reply::Text("{}".to_string()),
        &[("data_elizondo_extracted.json", &doc.to_string())],
    );

    let (status, body) = app.get("/api/data?company=someone-else").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], doc);
}

#[tokio::test]
async fn test_payroll_for_majoba() {
    let doc = majoba_payroll();
    let app = TestApp::with_files(
        Reply::Text("{}".to_string()),
        &[("payroll_report_majoba.json", &doc.to_string())],
    );

    let (status, body) = app.get(&format!("/api/payroll?company={MAJOBA}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["hasPayroll"], true);
    assert_eq!(body["data"], doc);
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_payroll_absent_for_default_company() {
    let app = TestApp::new(Reply::Text("{}".to_string()));

    let (status, body) = app.get("/api/payroll").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"hasPayroll": false, "message": "No payroll data for this company"})
    );
}

#[tokio::test]
async fn test_payroll_missing_file_for_majoba_is_404() {
    let app = TestApp::new(Reply::Text("{}".to_string()));

    let (status, body) = app.get(&format!("/api/payroll?company={MAJOBA}")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["found"], false);
    assert_eq!(body["message"], "No payroll report found");
}

#[tokio::test]
async fn test_report_reread_on_every_request() {
    let app = TestApp::with_files(
        Reply::Text("{}".to_string()),
        &[("data_elizondo_extracted.json", r#"{"rfcs": ["AAA010101AAA"]}"#)],
    );

    let (_, first) = app.get("/api/data").await;
    assert_eq!(first["data"]["rfcs"], json!(["AAA010101AAA"]));

    write_file(
        app.dir.path(),
        "data_elizondo_extracted.json",
        r#"{"rfcs": ["XEXX010101000"]}"#,
    );

    let (_, second) = app.get("/api/data").await;
    assert_eq!(second["data"]["rfcs"], json!(["XEXX010101000"]));
}

#[tokio::test]
async fn test_companies_lists_registry_and_availability() {
    let app = TestApp::with_files(
        Reply::Text("{}".to_string()),
        &[
            ("data_elizondo_extracted.json", "{}"),
            ("payroll_report_majoba.json", "{}"),
        ],
    );

    let (status, body) = app.get("/api/companies").await;

    assert_eq!(status, StatusCode::OK);
    let companies = body.as_array().unwrap();
    assert_eq!(companies.len(), 2);

    let elizondo = &companies[0];
    assert_eq!(elizondo["id"], "elizondo");
    assert_eq!(elizondo["rfc"], "TEJ2304191I0");
    assert_eq!(
        elizondo["reports"],
        json!({"general": true, "anomalies": false, "payroll": null})
    );

    let majoba = &companies[1];
    assert_eq!(majoba["id"], "majoba");
    assert_eq!(majoba["path"], MAJOBA);
    assert_eq!(
        majoba["reports"],
        json!({"general": false, "anomalies": false, "payroll": true})
    );
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new(Reply::Text("{}".to_string()));

    let (status, body) = app.get("/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "audit-dashboard");
    assert_eq!(body["llm_provider"], "scripted");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new(Reply::Text("{}".to_string()));

    let (status, _) = app.get("/api/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
