use std::sync::Arc;

use carbon_core::{
    assemble, project, validate_target_url, EmissionsModel, ProjectionConstants,
    Recommendations, Report, ReportFigures, TierThresholds, ValidationError,
};
use carbon_logging::{carbon_info, carbon_warn};

use crate::fetch::Fetcher;
use crate::recommend::{RecommendationContext, RecommendationSource};
use crate::{CollaboratorError, FetchError};

/// Result of a request whose fetch and estimation succeeded.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Complete(Report),
    /// The estimation is intact but the recommendation collaborator failed.
    Degraded {
        report: Report,
        cause: CollaboratorError,
    },
}

impl AnalysisOutcome {
    pub fn report(&self) -> &Report {
        match self {
            AnalysisOutcome::Complete(report) => report,
            AnalysisOutcome::Degraded { report, .. } => report,
        }
    }

    pub fn into_report(self) -> Report {
        match self {
            AnalysisOutcome::Complete(report) => report,
            AnalysisOutcome::Degraded { report, .. } => report,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
}

/// Read-only context shared by every request: fetcher, model and constants.
#[derive(Clone)]
pub struct Analyzer {
    fetcher: Arc<dyn Fetcher>,
    model: Arc<dyn EmissionsModel>,
    constants: ProjectionConstants,
    thresholds: TierThresholds,
}

impl Analyzer {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        model: Arc<dyn EmissionsModel>,
        constants: ProjectionConstants,
        thresholds: TierThresholds,
    ) -> Self {
        Self {
            fetcher,
            model,
            constants,
            thresholds,
        }
    }

    pub async fn analyze(
        &self,
        raw_url: Option<&str>,
        is_green_hosted: bool,
        recommendations: &dyn RecommendationSource,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let url = validate_target_url(raw_url)?;
        carbon_info!("Fetching: {}", url);

        let mut fetch = self.fetcher.fetch(url.as_str()).await.inspect_err(|err| {
            carbon_warn!("Error fetching URL {}: {}", url, err);
        })?;
        // Echo the caller's URL; `final_url` holds the normalized, post-redirect form.
        fetch.url = raw_url.map(str::trim).unwrap_or_default().to_string();

        let emissions = self.model.estimate(fetch.byte_length, is_green_hosted);
        let projection = project(emissions.grams_co2_per_load, &self.constants);
        let tier = self.thresholds.classify(emissions.grams_co2_per_load);

        // Assemble first so the recommendation prompt sees the same figures the caller does.
        let mut report = assemble(
            fetch,
            emissions,
            projection,
            tier,
            Recommendations::Available(Vec::new()),
        );
        let context = RecommendationContext::new(url.as_str(), &ReportFigures::from_report(&report));

        match recommendations.recommend(&context).await {
            Ok(items) => {
                report.recommendations = Recommendations::Available(items);
                Ok(AnalysisOutcome::Complete(report))
            }
            Err(cause) => {
                carbon_warn!("Recommendations unavailable for {}: {}", url, cause);
                report.recommendations = Recommendations::Unavailable {
                    reason: cause.to_string(),
                };
                Ok(AnalysisOutcome::Degraded { report, cause })
            }
        }
    }
}
