use crate::report::Report;

const BYTES_PER_KILOBYTE: f64 = 1024.0;

/// Formats `value` with exactly `decimals` digits after the point.
pub fn fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Display strings for every figure of a report, units included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFigures {
    pub resource_size: String,
    pub page_load_time: String,
    pub co2_emissions: String,
    pub energy_consumption: String,
    pub estimated_annual_co2: String,
    pub car_km_equivalent: String,
    pub trees_required: String,
    pub efficiency_score: &'static str,
}

impl ReportFigures {
    pub fn from_report(report: &Report) -> Self {
        let kilobytes = report.fetch.byte_length as f64 / BYTES_PER_KILOBYTE;
        let seconds = report.fetch.elapsed_millis / 1000.0;
        let projection = &report.projection;
        Self {
            resource_size: format!("{} KB", fixed(kilobytes, 2)),
            page_load_time: format!("{} sec", fixed(seconds, 2)),
            co2_emissions: format!("{} g", fixed(report.emissions.grams_co2_per_load, 4)),
            energy_consumption: format!("{} kWh", fixed(projection.energy_kwh, 6)),
            estimated_annual_co2: format!("{} g", fixed(projection.annual_grams, 2)),
            car_km_equivalent: format!("{} km driven", fixed(projection.car_km_equivalent, 2)),
            trees_required: format!(
                "{} trees/year to offset",
                fixed(projection.trees_required_per_year, 4)
            ),
            efficiency_score: report.tier.label(),
        }
    }
}
