use carbon_core::{ConfigError, EfficiencyTier, TierThresholds};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn boundary_value_belongs_to_the_upper_tier() {
    let thresholds = TierThresholds::default();
    assert_eq!(thresholds.classify(0.49), EfficiencyTier::Tier1);
    assert_eq!(thresholds.classify(0.5), EfficiencyTier::Tier2);
    assert_eq!(thresholds.classify(0.99), EfficiencyTier::Tier2);
    assert_eq!(thresholds.classify(1.0), EfficiencyTier::Tier3);
    assert_eq!(thresholds.classify(2.0), EfficiencyTier::Tier4);
    assert_eq!(thresholds.classify(0.0), EfficiencyTier::Tier1);
    assert_eq!(thresholds.classify(1e12), EfficiencyTier::Tier4);
}

#[test]
fn labels_follow_tier_order() {
    let labels: Vec<_> = EfficiencyTier::ALL.iter().map(|t| t.label()).collect();
    assert_eq!(
        labels,
        vec![
            "Average (Could Improve)",
            "Below average (Must Improve)",
            "Poor (High Emissions)",
            "Very Poor (Very High Emissions)",
        ]
    );
    assert!(EfficiencyTier::Tier1 < EfficiencyTier::Tier4);
}

#[test]
fn intervals_partition_the_non_negative_line() {
    let thresholds = TierThresholds::default();
    let intervals: Vec<_> = EfficiencyTier::ALL
        .iter()
        .map(|&tier| thresholds.interval(tier))
        .collect();

    assert_eq!(intervals[0].0, 0.0);
    for pair in intervals.windows(2) {
        assert_eq!(pair[0].1, Some(pair[1].0), "gap or overlap between tiers");
    }
    assert_eq!(intervals[3].1, None);
}

#[test]
fn thresholds_must_increase() {
    assert_eq!(
        TierThresholds::new([1.0, 0.5, 2.0]),
        Err(ConfigError::UnorderedThresholds {
            thresholds: [1.0, 0.5, 2.0]
        })
    );
    assert!(TierThresholds::new([0.5, 0.5, 2.0]).is_err());
    assert!(TierThresholds::new([0.0, 0.5, 2.0]).is_err());
    assert!(TierThresholds::new([0.25, 0.75, 3.0]).is_ok());
}

proptest! {
    #[test]
    fn classification_lands_inside_its_interval(g in 0.0f64..100.0) {
        let thresholds = TierThresholds::default();
        let tier = thresholds.classify(g);
        let (low, high) = thresholds.interval(tier);
        prop_assert!(g >= low);
        if let Some(high) = high {
            prop_assert!(g < high);
        }
    }

    #[test]
    fn tiers_are_ordered_like_emissions(a in 0.0f64..100.0, b in 0.0f64..100.0) {
        let thresholds = TierThresholds::default();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(thresholds.classify(low) <= thresholds.classify(high));
    }
}
