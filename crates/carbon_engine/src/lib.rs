//! Carbon engine: fetching, external collaborators and the analysis pipeline.
mod analyzer;
mod audit;
mod fetch;
mod recommend;
mod types;

pub use analyzer::{AnalysisError, AnalysisOutcome, Analyzer};
pub use audit::{
    summarize_lighthouse, AccessibilitySummary, AuditEngine, AuditIssues, AuditReport,
    BestPracticesSummary, LighthouseAuditor, LighthouseSettings, PerformanceSummary, SeoSummary,
};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use recommend::{
    build_prompt, split_narrative, CompletionRecommendations, CompletionSettings,
    RecommendationContext, RecommendationSource, StaticRecommendations,
    UnavailableRecommendations,
};
pub use types::{Collaborator, CollaboratorError, FailureKind, FetchError};
