use serde::Serialize;

use super::ReportKind;

/// Companies with pre-generated audit reports on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Company {
    Elizondo,
    Majoba,
}

impl Company {
    pub const ALL: [Company; 2] = [Company::Elizondo, Company::Majoba];

    /// Selectors that match no known company load this one.
    pub const DEFAULT: Company = Company::Elizondo;

    /// Resolves a dashboard selector (usually the backup folder name) to a
    /// company by substring match on its fragment.
    pub fn resolve(selector: Option<&str>) -> Company {
        selector
            .and_then(|s| {
                Self::ALL
                    .into_iter()
                    .find(|company| s.contains(company.selector_fragment()))
            })
            .unwrap_or(Self::DEFAULT)
    }

    pub fn selector_fragment(self) -> &'static str {
        match self {
            Company::Elizondo => "ELIZONDO",
            Company::Majoba => "Majoba",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Company::Elizondo => "TRANSPORTES ELIZONDO JIMENEZ",
            Company::Majoba => "Transportes Majoba S.A. De C.V.",
        }
    }

    pub fn rfc(self) -> &'static str {
        match self {
            Company::Elizondo => "TEJ2304191I0",
            Company::Majoba => "TMA1402281S3",
        }
    }

    /// Dashboard route segment, the name of the source backup folder.
    pub fn dashboard_path(self) -> &'static str {
        match self {
            Company::Elizondo => "ctTRANSPORTES_ELIZONDO_2024-20251024-1750",
            Company::Majoba => "ctTransportes_Majoba_SA_De_CV-20251027-1050",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Company::Elizondo => "elizondo",
            Company::Majoba => "majoba",
        }
    }

    /// File name of the company's report of `kind`, or `None` when the
    /// extraction pipeline does not produce that kind for it.
    pub fn report_file(self, kind: ReportKind) -> Option<&'static str> {
        match (self, kind) {
            (Company::Elizondo, ReportKind::General) => Some("data_elizondo_extracted.json"),
            (Company::Elizondo, ReportKind::Anomalies) => Some("anomaly_report_elizondo.json"),
            (Company::Elizondo, ReportKind::Payroll) => None,
            (Company::Majoba, ReportKind::General) => Some("data_majoba_extracted.json"),
            (Company::Majoba, ReportKind::Anomalies) => Some("anomaly_report_majoba.json"),
            (Company::Majoba, ReportKind::Payroll) => Some("payroll_report_majoba.json"),
        }
    }

    pub fn publishes(self, kind: ReportKind) -> bool {
        self.report_file(kind).is_some()
    }
}
