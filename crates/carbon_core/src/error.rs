use thiserror::Error;

/// Rejected request input. Surfaced verbatim to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing URL parameter.")]
    MissingUrl,
    #[error("Invalid URL parameter.")]
    InvalidUrl { reason: String },
}

impl ValidationError {
    /// Extra detail for the caller, when there is any beyond the message.
    pub fn details(&self) -> Option<&str> {
        match self {
            ValidationError::MissingUrl => None,
            ValidationError::InvalidUrl { reason } => Some(reason),
        }
    }
}

/// Invalid configuration value, detected once at startup.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a finite number greater than zero (got {value})")]
    NotPositive { name: &'static str, value: f64 },
    #[error("{name} must be a finite, non-negative number (got {value})")]
    Negative { name: &'static str, value: f64 },
    #[error("renewable grid intensity ({renewable}) must not exceed the grid intensity ({grid})")]
    GreenAboveGrid { renewable: f64, grid: f64 },
    #[error("tier thresholds must be strictly increasing (got {thresholds:?})")]
    UnorderedThresholds { thresholds: [f64; 3] },
}

pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::Negative { name, value })
    }
}
