use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Ordinal risk level assigned to a flagged RFC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskTier {
    pub const ALL: [RiskTier; 4] = [
        RiskTier::Low,
        RiskTier::Medium,
        RiskTier::High,
        RiskTier::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
            RiskTier::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown risk tier {0:?}")]
pub struct UnknownTier(pub String);

impl FromStr for RiskTier {
    type Err = UnknownTier;

    /// Accepts the English labels the prompt asks for and the Spanish ones
    /// the model sometimes answers with.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LOW" | "BAJO" => Ok(RiskTier::Low),
            "MEDIUM" | "MEDIO" => Ok(RiskTier::Medium),
            "HIGH" | "ALTO" => Ok(RiskTier::High),
            "CRITICAL" | "CRÍTICO" | "CRITICO" => Ok(RiskTier::Critical),
            _ => Err(UnknownTier(s.to_string())),
        }
    }
}

impl TryFrom<String> for RiskTier {
    type Error = UnknownTier;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RiskSummary {
    #[serde(default)]
    pub low: u64,
    #[serde(default)]
    pub medium: u64,
    #[serde(default)]
    pub high: u64,
    #[serde(default)]
    pub critical: u64,
}

impl RiskSummary {
    pub fn count(&self, tier: RiskTier) -> u64 {
        match tier {
            RiskTier::Low => self.low,
            RiskTier::Medium => self.medium,
            RiskTier::High => self.high,
            RiskTier::Critical => self.critical,
        }
    }

    pub fn total(&self) -> u64 {
        RiskTier::ALL.iter().map(|t| self.count(*t)).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FlaggedRfc {
    pub rfc: String,
    pub risk_level: RiskTier,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub recommendation: String,
}

/// Typed reading of a classification reply. The HTTP response carries the
/// model's JSON untouched; this view only feeds span fields and sanity checks.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnalysisResult {
    pub total_rfcs_analyzed: Option<u64>,
    #[serde(default)]
    pub risk_summary: RiskSummary,
    #[serde(default)]
    pub flagged_rfcs: Vec<FlaggedRfc>,
    #[serde(default)]
    pub general_observations: String,
    pub compliance_score: Option<f64>,
}

impl AnalysisResult {
    pub fn highest_tier(&self) -> Option<RiskTier> {
        self.flagged_rfcs.iter().map(|f| f.risk_level).max()
    }

    pub fn score_in_range(&self) -> bool {
        self.compliance_score
            .is_none_or(|score| (0.0..=100.0).contains(&score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tier_parses_both_languages() {
        assert_eq!("BAJO".parse::<RiskTier>(), Ok(RiskTier::Low));
        assert_eq!("medium".parse::<RiskTier>(), Ok(RiskTier::Medium));
        assert_eq!("Alto".parse::<RiskTier>(), Ok(RiskTier::High));
        assert_eq!("CRÍTICO".parse::<RiskTier>(), Ok(RiskTier::Critical));
        assert_eq!("crítico".parse::<RiskTier>(), Ok(RiskTier::Critical));
        assert_eq!(" CRITICAL ".parse::<RiskTier>(), Ok(RiskTier::Critical));
        assert!("SEVERE".parse::<RiskTier>().is_err());
    }

    #[test]
    fn test_tiers_are_ordered() {
        assert!(RiskTier::Low < RiskTier::Medium);
        assert!(RiskTier::Medium < RiskTier::High);
        assert!(RiskTier::High < RiskTier::Critical);
    }

    #[test]
    fn test_analysis_result_from_reply() {
        let reply = json!({
            "total_rfcs_analyzed": 3,
            "risk_summary": {"low": 1, "medium": 1, "high": 0, "critical": 1},
            "flagged_rfcs": [
                {"rfc": "AAA010101AAA", "risk_level": "MEDIUM", "reason": "Alta frecuencia", "recommendation": "Verificar CFDI"},
                {"rfc": "XEXX010101000", "risk_level": "CRITICAL", "reason": "RFC genérico", "recommendation": "Revisar lista 69-B"}
            ],
            "general_observations": "Concentración en pocos proveedores",
            "compliance_score": 72
        });
        let result: AnalysisResult = serde_json::from_value(reply).unwrap();
        assert_eq!(result.total_rfcs_analyzed, Some(3));
        assert_eq!(result.risk_summary.total(), 3);
        assert_eq!(result.risk_summary.count(RiskTier::Critical), 1);
        assert_eq!(result.highest_tier(), Some(RiskTier::Critical));
        assert!(result.score_in_range());
    }

    #[test]
    fn test_analysis_result_out_of_range_score() {
        let result: AnalysisResult =
            serde_json::from_value(json!({"compliance_score": 140})).unwrap();
        assert!(!result.score_in_range());
        assert_eq!(result.highest_tier(), None);
    }

    #[test]
    fn test_unknown_tier_rejects_reply() {
        let reply = json!({"flagged_rfcs": [{"rfc": "AAA010101AAA", "risk_level": "SEVERE"}]});
        assert!(serde_json::from_value::<AnalysisResult>(reply).is_err());
    }
}
