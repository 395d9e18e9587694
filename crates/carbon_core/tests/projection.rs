use carbon_core::{project, ConfigError, ProjectionConstants};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

proptest! {
    #[test]
    fn annual_grams_is_a_thousand_daily_visits_for_a_year(g in 0.0f64..1_000.0) {
        let projection = project(g, &ProjectionConstants::default());
        prop_assert_eq!(projection.annual_grams, g * 1000.0 * 365.0);
    }

    #[test]
    fn car_and_tree_equivalents_follow_annual_grams(g in 0.0f64..1_000.0) {
        let projection = project(g, &ProjectionConstants::default());
        prop_assert_eq!(projection.car_km_equivalent, g / 120.0);
        prop_assert_eq!(projection.trees_required_per_year, projection.annual_grams / 21000.0);
        prop_assert_eq!(projection.energy_kwh, g * 0.0003);
    }
}

#[test]
fn zero_emissions_project_to_zero() {
    let projection = project(0.0, &ProjectionConstants::default());
    assert_eq!(projection.annual_grams, 0.0);
    assert_eq!(projection.car_km_equivalent, 0.0);
    assert_eq!(projection.trees_required_per_year, 0.0);
    assert_eq!(projection.energy_kwh, 0.0);
}

#[test]
fn custom_constants_are_used() {
    let constants = ProjectionConstants::new(10.0, 100.0, 3650.0, 0.001).unwrap();
    let projection = project(2.0, &constants);
    assert_eq!(projection.annual_grams, 7300.0);
    assert_eq!(projection.car_km_equivalent, 0.02);
    assert_eq!(projection.trees_required_per_year, 2.0);
    assert_eq!(projection.energy_kwh, 0.002);
}

#[test]
fn zero_divisor_is_rejected_at_construction() {
    assert_eq!(
        ProjectionConstants::new(1000.0, 0.0, 21000.0, 0.0003),
        Err(ConfigError::NotPositive {
            name: "avg_car_grams_per_km",
            value: 0.0
        })
    );
    assert!(ProjectionConstants::new(1000.0, 120.0, f64::INFINITY, 0.0003).is_err());
    assert!(ProjectionConstants::new(-5.0, 120.0, 21000.0, 0.0003).is_err());
}

#[test]
fn defaults_match_documented_values() {
    let constants = ProjectionConstants::default();
    assert_eq!(constants.assumed_daily_visits(), 1000.0);
    assert_eq!(constants.avg_car_grams_per_km(), 120.0);
    assert_eq!(constants.grams_absorbed_per_tree_per_year(), 21000.0);
    assert_eq!(constants.kwh_per_gram(), 0.0003);
}
