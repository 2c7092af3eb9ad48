pub mod model;
pub mod prompt;
pub mod relay;
pub mod reply;

pub use model::{AnalysisResult, RiskTier};
pub use relay::{AnalysisSettings, analyze_rfcs, validate_rfcs};
pub use reply::AnalysisOutcome;
