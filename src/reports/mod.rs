pub mod models;
pub mod registry;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use opentelemetry::KeyValue;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::telemetry::metrics::REPORT_LOADS;

pub use registry::Company;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    General,
    Anomalies,
    Payroll,
}

impl ReportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::General => "general",
            ReportKind::Anomalies => "anomalies",
            ReportKind::Payroll => "payroll",
        }
    }

    fn validate(self, doc: &Value) -> Result<(), serde_json::Error> {
        match self {
            ReportKind::General => check_shape::<models::GeneralReport>(doc),
            ReportKind::Anomalies => check_shape::<models::AnomalyReport>(doc),
            ReportKind::Payroll => check_shape::<models::PayrollReport>(doc),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn check_shape<T: DeserializeOwned>(doc: &Value) -> Result<(), serde_json::Error> {
    T::deserialize(doc).map(|_| ())
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("{company:?} has no {kind} report")]
    Unavailable { company: Company, kind: ReportKind },

    #[error("report file {} not found", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("{} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{} does not match the {kind} report layout: {source}", .path.display())]
    Shape {
        path: PathBuf,
        kind: ReportKind,
        source: serde_json::Error,
    },
}

impl ReportError {
    fn outcome(&self) -> &'static str {
        match self {
            ReportError::Unavailable { .. } => "unavailable",
            ReportError::NotFound { .. } => "not_found",
            ReportError::Io { .. } => "io_error",
            ReportError::Parse { .. } => "parse_error",
            ReportError::Shape { .. } => "shape_error",
        }
    }
}

/// Read-only access to the report files in one directory.
#[derive(Debug, Clone)]
pub struct ReportStore {
    root: PathBuf,
}

impl ReportStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, company: Company, kind: ReportKind) -> Option<PathBuf> {
        company.report_file(kind).map(|file| self.root.join(file))
    }

    /// Loads a report and returns the document exactly as parsed.
    #[tracing::instrument(
        name = "report load",
        skip(self),
        fields(
            report.company = company.slug(),
            report.kind = %kind,
            report.path,
            report.bytes,
        )
    )]
    pub async fn load(&self, company: Company, kind: ReportKind) -> Result<Value, ReportError> {
        let result = self.read_report(company, kind).await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(err) => err.outcome(),
        };
        REPORT_LOADS.add(
            1,
            &[
                KeyValue::new("report.kind", kind.as_str()),
                KeyValue::new("report.company", company.slug()),
                KeyValue::new("report.outcome", outcome),
            ],
        );

        result
    }

    async fn read_report(&self, company: Company, kind: ReportKind) -> Result<Value, ReportError> {
        let path = self
            .path_for(company, kind)
            .ok_or(ReportError::Unavailable { company, kind })?;

        let span = tracing::Span::current();
        span.record("report.path", tracing::field::display(path.display()));

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ReportError::NotFound { path });
            }
            Err(source) => return Err(ReportError::Io { path, source }),
        };
        span.record("report.bytes", raw.len());

        let doc: Value = match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(source) => return Err(ReportError::Parse { path, source }),
        };

        if let Err(source) = kind.validate(&doc) {
            return Err(ReportError::Shape { path, kind, source });
        }

        Ok(doc)
    }
}
