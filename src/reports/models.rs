//! Typed views over the report documents written by the extraction scripts.
//!
//! Every field is optional: the scripts evolve independently of this service
//! and older snapshots lack newer sections. A present field with the wrong
//! JSON type still fails deserialization, which is how malformed reports are
//! told apart from merely incomplete ones.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, de};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralReport {
    pub company: Option<CompanyInfo>,
    pub statistics: Option<ExtractionStatistics>,
    #[serde(default)]
    pub rfcs: Vec<String>,
    #[serde(default)]
    pub sample_amounts: Vec<f64>,
    #[serde(default)]
    pub sample_dates: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyInfo {
    pub name: Option<String>,
    pub rfc: Option<String>,
    pub extraction_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractionStatistics {
    pub total_rfcs: Option<u64>,
    pub total_amounts_sampled: Option<u64>,
    pub total_dates_found: Option<u64>,
    pub avg_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub min_amount: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnomalyReport {
    pub benford_analysis: Option<BenfordAnalysis>,
    pub round_numbers: Option<RoundNumbers>,
    #[serde(default, deserialize_with = "section_or_placeholder")]
    pub suspicious_concepts: Option<SuspiciousConcepts>,
}

/// The anomaly hunter seeds unfilled sections with `[]` and only replaces
/// them with an object once the pass has run.
fn section_or_placeholder<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Section<T> {
        Filled(T),
        Placeholder(Vec<de::IgnoredAny>),
    }

    match Option::<Section<T>>::deserialize(deserializer)? {
        Some(Section::Filled(section)) => Ok(Some(section)),
        Some(Section::Placeholder(items)) if items.is_empty() => Ok(None),
        Some(Section::Placeholder(_)) => Err(de::Error::custom(
            "expected an object or an empty placeholder list",
        )),
        None => Ok(None),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BenfordAnalysis {
    pub status: Option<String>,
    pub risk_score: Option<String>,
    #[serde(default)]
    pub suspicious_digits: Vec<u8>,
    #[serde(default)]
    pub details: BTreeMap<String, DigitDeviation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DigitDeviation {
    pub actual: Option<f64>,
    pub expected: Option<f64>,
    pub deviation: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoundNumbers {
    pub percentage: Option<f64>,
    pub count: Option<u64>,
    pub risk_level: Option<String>,
    pub observation: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuspiciousConcepts {
    pub total_found: Option<u64>,
    #[serde(default)]
    pub top_keywords: BTreeMap<String, u64>,
    #[serde(default)]
    pub samples: Vec<ConceptSample>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConceptSample {
    pub keyword: Option<String>,
    pub text: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayrollReport {
    pub total_employees_detected: Option<u64>,
    #[serde(default)]
    pub sample_employees: Vec<String>,
    pub risk_findings: Option<PayrollRiskFindings>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayrollRiskFindings {
    pub total_risks: Option<u64>,
    #[serde(default)]
    pub breakdown: BTreeMap<String, u64>,
    #[serde(default)]
    pub evidence: Vec<PayrollEvidence>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayrollEvidence {
    pub keyword: Option<String>,
    pub context: Option<String>,
}
