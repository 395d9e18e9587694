//! Carbon server: HTTP boundary over the carbon engine.
mod app;
mod cli;
mod response;
mod settings;

pub use app::{router, serve, AnalyzeParams, AppState};
pub use cli::Cli;
pub use response::{ApiError, ErrorBody, ImpactComparison, ReportBody};
pub use settings::{
    FetchSection, LighthouseSection, ModelSection, ProjectionSection, Settings, SettingsError,
    TierSection,
};
