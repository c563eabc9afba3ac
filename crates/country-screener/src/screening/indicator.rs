use crate::factbook::GdpYears;
use serde::{Deserialize, Serialize};

/// The five fact-sheet fields that thresholds, rankings, and ceilings are
/// keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Population,
    GdpGrowthPrimary,
    GdpGrowthSecondary,
    CreditRating,
    NaturalResources,
}

impl Indicator {
    pub const COUNT: usize = 5;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::Population,
            Self::GdpGrowthPrimary,
            Self::GdpGrowthSecondary,
            Self::CreditRating,
            Self::NaturalResources,
        ]
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Population => "population",
            Self::GdpGrowthPrimary => "gdp_growth_primary",
            Self::GdpGrowthSecondary => "gdp_growth_secondary",
            Self::CreditRating => "credit_rating",
            Self::NaturalResources => "natural_resources",
        }
    }

    /// Human-readable name; GDP fields carry their configured year.
    pub fn label(self, years: GdpYears) -> String {
        match self {
            Self::Population => "population".to_string(),
            Self::GdpGrowthPrimary => format!("real GDP growth {}", years.primary),
            Self::GdpGrowthSecondary => format!("real GDP growth {}", years.secondary),
            Self::CreditRating => "Fitch credit rating".to_string(),
            Self::NaturalResources => "natural resources".to_string(),
        }
    }
}
