//! Carbon core: pure emissions model, impact projection and tier classification.
mod error;
mod format;
mod model;
mod projection;
mod report;
mod tier;
mod validate;

pub use error::{ConfigError, ValidationError};
pub use format::{fixed, ReportFigures};
pub use model::{EmissionsModel, ModelCoefficients, SustainableWebDesign};
pub use projection::{project, ImpactProjection, ProjectionConstants};
pub use report::{assemble, EmissionEstimate, FetchResult, Recommendations, Report};
pub use tier::{EfficiencyTier, TierThresholds};
pub use validate::validate_target_url;
