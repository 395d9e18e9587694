//! Optional RON settings file carrying the model and projection constants.
//!
//! Every field has a default, so an empty file (or none at all) yields the
//! stock configuration. Values are validated into core types once at startup.
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use carbon_core::{
    ConfigError, ModelCoefficients, ProjectionConstants, SustainableWebDesign, TierThresholds,
};
use carbon_engine::{FetchSettings, LighthouseSettings, DEFAULT_USER_AGENT};
use carbon_logging::carbon_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings from {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid settings: {0}")]
    Invalid(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub assume_green_hosting: bool,
    pub fetch: FetchSection,
    pub model: ModelSection,
    pub projection: ProjectionSection,
    pub tiers: TierSection,
    pub lighthouse: LighthouseSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSection {
    pub timeout_ms: u64,
    pub connect_timeout_ms: u64,
    pub max_redirects: usize,
    pub max_bytes: u64,
    pub user_agent: String,
}

impl Default for FetchSection {
    fn default() -> Self {
        let stock = FetchSettings::default();
        Self {
            timeout_ms: stock.request_timeout.as_millis() as u64,
            connect_timeout_ms: stock.connect_timeout.as_millis() as u64,
            max_redirects: stock.redirect_limit,
            max_bytes: stock.max_bytes,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSection {
    pub kwh_per_gigabyte: f64,
    pub data_center_share: f64,
    pub network_share: f64,
    pub consumer_device_share: f64,
    pub production_share: f64,
    pub grid_intensity: f64,
    pub renewable_intensity: f64,
}

impl Default for ModelSection {
    fn default() -> Self {
        let c = ModelCoefficients::default();
        Self {
            kwh_per_gigabyte: c.kwh_per_gigabyte,
            data_center_share: c.data_center_share,
            network_share: c.network_share,
            consumer_device_share: c.consumer_device_share,
            production_share: c.production_share,
            grid_intensity: c.grid_intensity,
            renewable_intensity: c.renewable_intensity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSection {
    pub assumed_daily_visits: f64,
    pub avg_car_grams_per_km: f64,
    pub grams_absorbed_per_tree_per_year: f64,
    pub kwh_per_gram: f64,
}

impl Default for ProjectionSection {
    fn default() -> Self {
        let p = ProjectionConstants::default();
        Self {
            assumed_daily_visits: p.assumed_daily_visits(),
            avg_car_grams_per_km: p.avg_car_grams_per_km(),
            grams_absorbed_per_tree_per_year: p.grams_absorbed_per_tree_per_year(),
            kwh_per_gram: p.kwh_per_gram(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierSection {
    /// Upper bounds (exclusive) of the three lowest tiers, in grams.
    pub thresholds: [f64; 3],
}

impl Default for TierSection {
    fn default() -> Self {
        Self {
            thresholds: TierThresholds::default().bounds(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LighthouseSection {
    pub binary: PathBuf,
    pub timeout_secs: u64,
    pub chrome_flags: String,
    pub shutdown_grace_ms: u64,
}

impl Default for LighthouseSection {
    fn default() -> Self {
        let stock = LighthouseSettings::default();
        Self {
            binary: stock.binary,
            timeout_secs: stock.timeout.as_secs(),
            chrome_flags: stock.chrome_flags,
            shutdown_grace_ms: stock.shutdown_grace.as_millis() as u64,
        }
    }
}

impl Settings {
    /// Reads `path` when given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_ron(&content).map_err(|message| SettingsError::Parse {
            path: path.to_path_buf(),
            message,
        })?;
        carbon_info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    pub fn from_ron(content: &str) -> Result<Self, String> {
        ron::from_str(content).map_err(|err| err.to_string())
    }

    pub fn to_ron(&self) -> Result<String, String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new()).map_err(|err| err.to_string())
    }

    pub fn fetch_settings(&self) -> Result<FetchSettings, SettingsError> {
        let f = &self.fetch;
        Ok(FetchSettings {
            connect_timeout: Duration::from_millis(positive(
                "connect_timeout_ms",
                f.connect_timeout_ms,
            )?),
            request_timeout: Duration::from_millis(positive("timeout_ms", f.timeout_ms)?),
            redirect_limit: f.max_redirects,
            max_bytes: positive("max_bytes", f.max_bytes)?,
            user_agent: f.user_agent.clone(),
        })
    }

    pub fn emissions_model(&self) -> Result<SustainableWebDesign, SettingsError> {
        let m = &self.model;
        Ok(SustainableWebDesign::new(ModelCoefficients {
            kwh_per_gigabyte: m.kwh_per_gigabyte,
            data_center_share: m.data_center_share,
            network_share: m.network_share,
            consumer_device_share: m.consumer_device_share,
            production_share: m.production_share,
            grid_intensity: m.grid_intensity,
            renewable_intensity: m.renewable_intensity,
        })?)
    }

    pub fn projection_constants(&self) -> Result<ProjectionConstants, SettingsError> {
        let p = &self.projection;
        Ok(ProjectionConstants::new(
            p.assumed_daily_visits,
            p.avg_car_grams_per_km,
            p.grams_absorbed_per_tree_per_year,
            p.kwh_per_gram,
        )?)
    }

    pub fn tier_thresholds(&self) -> Result<TierThresholds, SettingsError> {
        Ok(TierThresholds::new(self.tiers.thresholds)?)
    }

    pub fn lighthouse_settings(&self) -> Result<LighthouseSettings, SettingsError> {
        let l = &self.lighthouse;
        Ok(LighthouseSettings {
            binary: l.binary.clone(),
            timeout: Duration::from_secs(positive("timeout_secs", l.timeout_secs)?),
            chrome_flags: l.chrome_flags.clone(),
            shutdown_grace: Duration::from_millis(l.shutdown_grace_ms),
        })
    }
}

fn positive(name: &'static str, value: u64) -> Result<u64, ConfigError> {
    if value == 0 {
        return Err(ConfigError::NotPositive {
            name,
            value: value as f64,
        });
    }
    Ok(value)
}
