use crate::projection::ImpactProjection;
use crate::tier::EfficiencyTier;

/// What the fetcher measured for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult {
    pub url: String,
    pub final_url: String,
    pub byte_length: u64,
    /// Wall-clock duration of the fetch. Informational only.
    pub elapsed_millis: f64,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    /// Hex SHA-256 of the body. Informational only.
    pub digest: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionEstimate {
    pub grams_co2_per_load: f64,
    pub is_green_hosted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendations {
    Available(Vec<String>),
    Unavailable { reason: String },
}

impl Recommendations {
    pub fn items(&self) -> &[String] {
        match self {
            Recommendations::Available(items) => items,
            Recommendations::Unavailable { .. } => &[],
        }
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            Recommendations::Available(_) => None,
            Recommendations::Unavailable { reason } => Some(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub fetch: FetchResult,
    pub emissions: EmissionEstimate,
    pub projection: ImpactProjection,
    pub tier: EfficiencyTier,
    pub recommendations: Recommendations,
}

pub fn assemble(
    fetch: FetchResult,
    emissions: EmissionEstimate,
    projection: ImpactProjection,
    tier: EfficiencyTier,
    recommendations: Recommendations,
) -> Report {
    Report {
        fetch,
        emissions,
        projection,
        tier,
        recommendations,
    }
}
