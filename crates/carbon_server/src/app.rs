use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use carbon_core::validate_target_url;
use carbon_engine::{
    AnalysisOutcome, Analyzer, AuditEngine, AuditReport, CompletionRecommendations,
    LighthouseAuditor, RecommendationSource, ReqwestFetcher, StaticRecommendations,
    UnavailableRecommendations,
};
use carbon_logging::{carbon_info, carbon_warn};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;

use crate::cli::Cli;
use crate::response::{ApiError, ReportBody};
use crate::settings::{Settings, SettingsError};

/// Everything a request handler needs. Built once, read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Analyzer,
    pub assume_green_hosting: bool,
    pub static_recommendations: Arc<dyn RecommendationSource>,
    pub narrative_recommendations: Arc<dyn RecommendationSource>,
    pub auditor: Arc<dyn AuditEngine>,
}

impl AppState {
    pub fn from_config(cli: &Cli, settings: &Settings) -> Result<Self, SettingsError> {
        let analyzer = Analyzer::new(
            Arc::new(ReqwestFetcher::new(settings.fetch_settings()?)),
            Arc::new(settings.emissions_model()?),
            settings.projection_constants()?,
            settings.tier_thresholds()?,
        );

        let narrative_recommendations: Arc<dyn RecommendationSource> =
            match cli.completion_settings() {
                Some(completion) => match CompletionRecommendations::new(completion) {
                    Ok(source) => Arc::new(source),
                    Err(err) => {
                        carbon_warn!("Narrative recommendations disabled: {}", err);
                        Arc::new(UnavailableRecommendations::new(err.message))
                    }
                },
                None => Arc::new(UnavailableRecommendations::new(
                    "no API credential configured",
                )),
            };

        let mut lighthouse = settings.lighthouse_settings()?;
        if let Some(binary) = &cli.lighthouse_bin {
            lighthouse.binary = binary.clone();
        }

        Ok(Self {
            analyzer,
            assume_green_hosting: settings.assume_green_hosting,
            static_recommendations: Arc::new(StaticRecommendations),
            narrative_recommendations,
            auditor: Arc::new(LighthouseAuditor::new(lighthouse)),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    pub url: Option<String>,
    pub green: Option<bool>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/co2", get(co2))
        .route("/ai-sustainability", get(ai_sustainability))
        .route("/lighthouse", get(lighthouse))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves until `shutdown` is cancelled.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
}

fn parse_params(
    query: Result<Query<AnalyzeParams>, QueryRejection>,
) -> Result<AnalyzeParams, ApiError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ApiError::BadQuery(rejection.body_text()))
}

async fn analyze_with(
    state: &AppState,
    params: AnalyzeParams,
    recommendations: &dyn RecommendationSource,
) -> Result<Json<ReportBody>, ApiError> {
    let green = params.green.unwrap_or(state.assume_green_hosting);
    let outcome = state
        .analyzer
        .analyze(params.url.as_deref(), green, recommendations)
        .await?;
    if let AnalysisOutcome::Degraded { cause, .. } = &outcome {
        carbon_info!("Returning report without recommendations: {}", cause);
    }
    Ok(Json(ReportBody::from_report(outcome.report())))
}

async fn co2(
    State(state): State<AppState>,
    query: Result<Query<AnalyzeParams>, QueryRejection>,
) -> Result<Json<ReportBody>, ApiError> {
    let params = parse_params(query)?;
    analyze_with(&state, params, state.static_recommendations.as_ref()).await
}

async fn ai_sustainability(
    State(state): State<AppState>,
    query: Result<Query<AnalyzeParams>, QueryRejection>,
) -> Result<Json<ReportBody>, ApiError> {
    let params = parse_params(query)?;
    analyze_with(&state, params, state.narrative_recommendations.as_ref()).await
}

async fn lighthouse(
    State(state): State<AppState>,
    query: Result<Query<AnalyzeParams>, QueryRejection>,
) -> Result<Json<AuditReport>, ApiError> {
    let params = parse_params(query)?;
    let url = validate_target_url(params.url.as_deref())?;
    let report = state
        .auditor
        .audit(url.as_str())
        .await
        .map_err(ApiError::Audit)?;
    Ok(Json(report))
}
