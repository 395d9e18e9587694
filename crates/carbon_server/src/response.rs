use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use carbon_core::{Report, ReportFigures, ValidationError};
use carbon_engine::{AnalysisError, CollaboratorError, FetchError};
use carbon_logging::carbon_error;
use serde::Serialize;

const FETCH_FAILED: &str = "Failed to fetch the website or calculate CO2.";
const AUDIT_FAILED: &str = "Failed to run Lighthouse audit.";
const BAD_QUERY: &str = "Invalid query parameters.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactComparison {
    pub car_km_equivalent: String,
    pub trees_required: String,
}

/// JSON body of a successful estimation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBody {
    pub url: String,
    pub resource_size: String,
    pub page_load_time: String,
    pub co2_emissions: String,
    pub energy_consumption: String,
    #[serde(rename = "estimatedAnnualCO2")]
    pub estimated_annual_co2: String,
    pub impact_comparison: ImpactComparison,
    pub efficiency_score: &'static str,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations_unavailable: Option<String>,
}

impl ReportBody {
    pub fn from_report(report: &Report) -> Self {
        let figures = ReportFigures::from_report(report);
        Self {
            url: report.fetch.url.clone(),
            resource_size: figures.resource_size,
            page_load_time: figures.page_load_time,
            co2_emissions: figures.co2_emissions,
            energy_consumption: figures.energy_consumption,
            estimated_annual_co2: figures.estimated_annual_co2,
            impact_comparison: ImpactComparison {
                car_km_equivalent: figures.car_km_equivalent,
                trees_required: figures.trees_required,
            },
            efficiency_score: figures.efficiency_score,
            recommendations: report.recommendations.items().to_vec(),
            recommendations_unavailable: report
                .recommendations
                .unavailable_reason()
                .map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationError),
    BadQuery(String),
    Fetch(FetchError),
    Audit(CollaboratorError),
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Validation(err) => ApiError::Validation(err),
            AnalysisError::Fetch(err) => ApiError::Fetch(err),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl ApiError {
    fn status_and_body(&self) -> (StatusCode, ErrorBody) {
        match self {
            ApiError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: err.to_string(),
                    details: err.details().map(str::to_string),
                },
            ),
            ApiError::BadQuery(details) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: BAD_QUERY.to_string(),
                    details: Some(details.clone()),
                },
            ),
            ApiError::Fetch(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: FETCH_FAILED.to_string(),
                    details: Some(err.to_string()),
                },
            ),
            ApiError::Audit(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: AUDIT_FAILED.to_string(),
                    details: Some(err.message.clone()),
                },
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        if status.is_server_error() {
            carbon_error!("{}: {:?}", body.error, body.details);
        }
        (status, Json(body)).into_response()
    }
}
