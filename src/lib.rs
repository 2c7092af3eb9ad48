pub mod analysis;
pub mod config;
pub mod error;
pub mod llm;
pub mod reports;
pub mod routes;
pub mod telemetry;

use std::sync::Arc;

pub use config::Config;

use analysis::AnalysisSettings;
use llm::LlmClient;
use reports::ReportStore;

#[derive(Clone)]
pub struct AppState {
    pub reports: ReportStore,
    pub llm_client: Arc<LlmClient>,
    pub analysis: AnalysisSettings,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            reports: ReportStore::new(config.reports_dir.clone()),
            llm_client: Arc::new(LlmClient::new(llm::provider_from_config(config))),
            analysis: AnalysisSettings::from_config(config),
        }
    }
}
