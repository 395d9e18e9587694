use carbon_core::{EmissionsModel, ModelCoefficients, SustainableWebDesign};
use proptest::prelude::*;

fn model() -> SustainableWebDesign {
    SustainableWebDesign::default()
}

proptest! {
    #[test]
    fn more_bytes_never_means_less_carbon(a in 0u64..10_000_000_000, b in 0u64..10_000_000_000, green in any::<bool>()) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(model().grams_per_load(low, green) <= model().grams_per_load(high, green));
    }

    #[test]
    fn green_hosting_never_costs_more(bytes in any::<u64>()) {
        let m = model();
        prop_assert!(m.grams_per_load(bytes, true) <= m.grams_per_load(bytes, false));
    }

    #[test]
    fn estimate_is_bit_identical_across_calls(bytes in any::<u64>(), green in any::<bool>()) {
        let m = model();
        let first = m.estimate(bytes, green);
        let second = m.estimate(bytes, green);
        prop_assert_eq!(first.grams_co2_per_load.to_bits(), second.grams_co2_per_load.to_bits());
        prop_assert_eq!(first.is_green_hosted, green);
    }

    #[test]
    fn estimates_are_never_negative(bytes in any::<u64>(), green in any::<bool>()) {
        prop_assert!(model().grams_per_load(bytes, green) >= 0.0);
    }
}

#[test]
fn empty_payload_emits_nothing() {
    assert_eq!(model().grams_per_load(0, false), 0.0);
    assert_eq!(model().grams_per_load(0, true), 0.0);
}

#[test]
fn equal_intensities_make_green_hosting_neutral() {
    let coefficients = ModelCoefficients {
        renewable_intensity: 442.0,
        ..ModelCoefficients::default()
    };
    let m = SustainableWebDesign::new(coefficients).unwrap();
    assert_eq!(m.grams_per_load(512_000, true), m.grams_per_load(512_000, false));
}

#[test]
fn half_megabyte_page_is_in_expected_range() {
    // 512000 bytes at 0.81 kWh/GB and 442 g/kWh.
    let grams = model().grams_per_load(512_000, false);
    assert!((grams - 0.18330624).abs() < 1e-9, "got {grams}");
}
