use crate::error::{require_positive, ConfigError};

/// Qualitative bucket for a single-load emission, lowest emissions first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EfficiencyTier {
    Tier1,
    Tier2,
    Tier3,
    Tier4,
}

impl EfficiencyTier {
    pub const ALL: [EfficiencyTier; 4] = [
        EfficiencyTier::Tier1,
        EfficiencyTier::Tier2,
        EfficiencyTier::Tier3,
        EfficiencyTier::Tier4,
    ];

    // TODO: review the label scale; nothing currently maps to a "Good" rating.
    pub fn label(self) -> &'static str {
        match self {
            EfficiencyTier::Tier1 => "Average (Could Improve)",
            EfficiencyTier::Tier2 => "Below average (Must Improve)",
            EfficiencyTier::Tier3 => "Poor (High Emissions)",
            EfficiencyTier::Tier4 => "Very Poor (Very High Emissions)",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Upper bounds (exclusive) of the first three tiers, in grams per load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierThresholds {
    bounds: [f64; 3],
}

impl TierThresholds {
    pub fn new(bounds: [f64; 3]) -> Result<Self, ConfigError> {
        for (name, value) in ["tier1_upper", "tier2_upper", "tier3_upper"]
            .into_iter()
            .zip(bounds)
        {
            require_positive(name, value)?;
        }
        if !(bounds[0] < bounds[1] && bounds[1] < bounds[2]) {
            return Err(ConfigError::UnorderedThresholds { thresholds: bounds });
        }
        Ok(Self { bounds })
    }

    pub fn bounds(&self) -> [f64; 3] {
        self.bounds
    }

    /// Boundary values fall into the upper of the two adjacent tiers.
    pub fn classify(&self, grams_co2_per_load: f64) -> EfficiencyTier {
        self.bounds
            .iter()
            .position(|&upper| grams_co2_per_load < upper)
            .map(|index| EfficiencyTier::ALL[index])
            .unwrap_or(EfficiencyTier::Tier4)
    }

    /// Half-open interval `[low, high)` covered by `tier`; `None` means unbounded.
    pub fn interval(&self, tier: EfficiencyTier) -> (f64, Option<f64>) {
        let index = tier.index();
        let low = if index == 0 { 0.0 } else { self.bounds[index - 1] };
        (low, self.bounds.get(index).copied())
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            bounds: [0.5, 1.0, 2.0],
        }
    }
}
