use crate::error::{require_non_negative, ConfigError};
use crate::report::EmissionEstimate;

const BYTES_PER_GIGABYTE: f64 = 1_000_000_000.0;

/// Maps transferred bytes to grams of CO2 for a single load.
///
/// Implementations must be deterministic, non-decreasing in `byte_length`, and
/// never report more for green hosting than for regular hosting.
pub trait EmissionsModel: Send + Sync {
    fn grams_per_load(&self, byte_length: u64, is_green_hosted: bool) -> f64;

    fn estimate(&self, byte_length: u64, is_green_hosted: bool) -> EmissionEstimate {
        EmissionEstimate {
            grams_co2_per_load: self.grams_per_load(byte_length, is_green_hosted),
            is_green_hosted,
        }
    }
}

/// Coefficient table for the Sustainable Web Design model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelCoefficients {
    pub kwh_per_gigabyte: f64,
    pub data_center_share: f64,
    pub network_share: f64,
    pub consumer_device_share: f64,
    pub production_share: f64,
    /// Grams of CO2 per kWh on the average grid.
    pub grid_intensity: f64,
    /// Grams of CO2 per kWh for renewable-powered data centres.
    pub renewable_intensity: f64,
}

impl Default for ModelCoefficients {
    fn default() -> Self {
        Self {
            kwh_per_gigabyte: 0.81,
            data_center_share: 0.15,
            network_share: 0.14,
            consumer_device_share: 0.52,
            production_share: 0.19,
            grid_intensity: 442.0,
            renewable_intensity: 50.0,
        }
    }
}

/// Byte-based model: energy is split across segments and only the data
/// centre segment benefits from green hosting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SustainableWebDesign {
    coefficients: ModelCoefficients,
}

impl SustainableWebDesign {
    pub fn new(coefficients: ModelCoefficients) -> Result<Self, ConfigError> {
        let c = &coefficients;
        require_non_negative("kwh_per_gigabyte", c.kwh_per_gigabyte)?;
        require_non_negative("data_center_share", c.data_center_share)?;
        require_non_negative("network_share", c.network_share)?;
        require_non_negative("consumer_device_share", c.consumer_device_share)?;
        require_non_negative("production_share", c.production_share)?;
        require_non_negative("grid_intensity", c.grid_intensity)?;
        require_non_negative("renewable_intensity", c.renewable_intensity)?;
        if c.renewable_intensity > c.grid_intensity {
            return Err(ConfigError::GreenAboveGrid {
                renewable: c.renewable_intensity,
                grid: c.grid_intensity,
            });
        }
        Ok(Self { coefficients })
    }
}

impl EmissionsModel for SustainableWebDesign {
    fn grams_per_load(&self, byte_length: u64, is_green_hosted: bool) -> f64 {
        let c = &self.coefficients;
        let energy_kwh = byte_length as f64 * c.kwh_per_gigabyte / BYTES_PER_GIGABYTE;

        let data_center_intensity = if is_green_hosted {
            c.renewable_intensity
        } else {
            c.grid_intensity
        };

        let data_center = energy_kwh * c.data_center_share * data_center_intensity;
        let network = energy_kwh * c.network_share * c.grid_intensity;
        let device = energy_kwh * c.consumer_device_share * c.grid_intensity;
        let production = energy_kwh * c.production_share * c.grid_intensity;

        data_center + network + device + production
    }
}
