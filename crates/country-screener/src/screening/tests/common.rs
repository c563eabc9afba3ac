use std::collections::BTreeSet;

use crate::factbook::{ExtractedIndicators, IndicatorSnapshot};
use crate::rating::{CreditStanding, FitchRating};
use crate::screening::{NormalizationCeilings, Rankings, Thresholds};

pub(super) fn resources(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// Population 40M, both GDP years 3.0%, BBB, wants gas or gold.
pub(super) fn thresholds() -> Thresholds {
    Thresholds {
        population: 40_000_000,
        gdp_growth_primary: 3.0,
        gdp_growth_secondary: 3.0,
        credit_rating: FitchRating::Bbb,
        resources: resources(&["gas", "gold"]),
    }
}

/// Population 5, GDP primary 4, GDP secondary 3, rating 2, resources 1.
pub(super) fn rankings() -> Rankings {
    Rankings::new([1, 2, 3, 4, 5]).expect("valid permutation")
}

/// Ceilings chosen so the population example normalizes to exactly 0.8.
pub(super) fn round_ceilings() -> NormalizationCeilings {
    NormalizationCeilings {
        population: 100_000_000.0,
        ..NormalizationCeilings::STANDARD
    }
}

pub(super) fn alpha() -> IndicatorSnapshot {
    IndicatorSnapshot::new(
        "Alpha",
        ExtractedIndicators {
            population: Some(50_000_000),
            gdp_growth_primary: Some(4.2),
            gdp_growth_secondary: Some(3.1),
            credit_standing: CreditStanding::Rated(FitchRating::A),
            natural_resources: resources(&["oil", "gas"]),
        },
    )
}

/// Fails every predicate of [`thresholds`].
pub(super) fn laggard(name: &str) -> IndicatorSnapshot {
    IndicatorSnapshot::new(
        name,
        ExtractedIndicators {
            population: Some(1_000),
            gdp_growth_primary: Some(-3.0),
            gdp_growth_secondary: None,
            credit_standing: CreditStanding::Rated(FitchRating::Bbb),
            natural_resources: resources(&["timber"]),
        },
    )
}

pub(super) fn empty(name: &str) -> IndicatorSnapshot {
    IndicatorSnapshot::new(name, ExtractedIndicators::default())
}
