use crate::error::{require_positive, ConfigError};

const DAYS_PER_YEAR: f64 = 365.0;

/// Constants used to restate a single-load emission.
///
/// Every value is validated strictly positive on construction, so projecting
/// never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConstants {
    assumed_daily_visits: f64,
    avg_car_grams_per_km: f64,
    grams_absorbed_per_tree_per_year: f64,
    kwh_per_gram: f64,
}

impl ProjectionConstants {
    pub fn new(
        assumed_daily_visits: f64,
        avg_car_grams_per_km: f64,
        grams_absorbed_per_tree_per_year: f64,
        kwh_per_gram: f64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            assumed_daily_visits: require_positive("assumed_daily_visits", assumed_daily_visits)?,
            avg_car_grams_per_km: require_positive("avg_car_grams_per_km", avg_car_grams_per_km)?,
            grams_absorbed_per_tree_per_year: require_positive(
                "grams_absorbed_per_tree_per_year",
                grams_absorbed_per_tree_per_year,
            )?,
            kwh_per_gram: require_positive("kwh_per_gram", kwh_per_gram)?,
        })
    }

    pub fn assumed_daily_visits(&self) -> f64 {
        self.assumed_daily_visits
    }

    pub fn avg_car_grams_per_km(&self) -> f64 {
        self.avg_car_grams_per_km
    }

    pub fn grams_absorbed_per_tree_per_year(&self) -> f64 {
        self.grams_absorbed_per_tree_per_year
    }

    pub fn kwh_per_gram(&self) -> f64 {
        self.kwh_per_gram
    }
}

impl Default for ProjectionConstants {
    fn default() -> Self {
        Self {
            assumed_daily_visits: 1000.0,
            avg_car_grams_per_km: 120.0,
            grams_absorbed_per_tree_per_year: 21_000.0,
            kwh_per_gram: 0.0003,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactProjection {
    pub annual_grams: f64,
    pub car_km_equivalent: f64,
    pub trees_required_per_year: f64,
    pub energy_kwh: f64,
}

pub fn project(grams_co2_per_load: f64, constants: &ProjectionConstants) -> ImpactProjection {
    let annual_grams = grams_co2_per_load * constants.assumed_daily_visits * DAYS_PER_YEAR;
    ImpactProjection {
        annual_grams,
        car_km_equivalent: grams_co2_per_load / constants.avg_car_grams_per_km,
        trees_required_per_year: annual_grams / constants.grams_absorbed_per_tree_per_year,
        energy_kwh: grams_co2_per_load * constants.kwh_per_gram,
    }
}
