use super::lookup::extract_with;
use super::record::CountryRecord;
use crate::rating::{CreditStanding, FitchRating};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

const POPULATION_PATH: [&str; 3] = ["People and Society", "Population", "total"];
const GDP_GROWTH_SECTION: [&str; 2] = ["Economy", "Real GDP growth rate"];
const GDP_GROWTH_KEY_PREFIX: &str = "Real GDP growth rate";
const FITCH_RATING_PATH: [&str; 3] = ["Economy", "Credit ratings", "Fitch rating"];
const NATURAL_RESOURCES_PATH: [&str; 2] = ["Geography", "Natural resources"];

/// The two fact-sheet years whose real GDP growth is screened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GdpYears {
    pub primary: u16,
    pub secondary: u16,
}

impl Default for GdpYears {
    fn default() -> Self {
        Self {
            primary: 2023,
            secondary: 2022,
        }
    }
}

/// Typed view of the five screened fields of one record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractedIndicators {
    pub population: Option<u64>,
    pub gdp_growth_primary: Option<f64>,
    pub gdp_growth_secondary: Option<f64>,
    pub credit_standing: CreditStanding,
    pub natural_resources: BTreeSet<String>,
}

/// Extracted indicators paired with the record they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub country: String,
    pub indicators: ExtractedIndicators,
}

impl IndicatorSnapshot {
    pub fn new(country: impl Into<String>, indicators: ExtractedIndicators) -> Self {
        Self {
            country: country.into(),
            indicators,
        }
    }
}

/// Field extractors, parameterized by the configured GDP years.
#[derive(Debug, Clone)]
pub struct IndicatorExtractor {
    years: GdpYears,
}

impl IndicatorExtractor {
    pub fn new(years: GdpYears) -> Self {
        Self { years }
    }

    pub fn years(&self) -> GdpYears {
        self.years
    }

    pub fn population(&self, record: &CountryRecord) -> Option<u64> {
        extract_with(record, &POPULATION_PATH, "population", parse_population)
    }

    /// Real GDP growth, in percent, for an arbitrary fact-sheet year.
    pub fn gdp_growth(&self, record: &CountryRecord, year: u16) -> Option<f64> {
        let key = format!("{GDP_GROWTH_KEY_PREFIX} {year}");
        let [category, section] = GDP_GROWTH_SECTION;
        extract_with(
            record,
            &[category, section, key.as_str()],
            "gdp_growth",
            parse_growth_rate,
        )
    }

    pub fn gdp_growth_primary(&self, record: &CountryRecord) -> Option<f64> {
        self.gdp_growth(record, self.years.primary)
    }

    pub fn gdp_growth_secondary(&self, record: &CountryRecord) -> Option<f64> {
        self.gdp_growth(record, self.years.secondary)
    }

    pub fn credit_standing(&self, record: &CountryRecord) -> CreditStanding {
        extract_with(record, &FITCH_RATING_PATH, "fitch_rating", |text| {
            Some(parse_rating_token(text))
        })
        .unwrap_or_default()
    }

    pub fn natural_resources(&self, record: &CountryRecord) -> BTreeSet<String> {
        extract_with(record, &NATURAL_RESOURCES_PATH, "natural_resources", |text| {
            Some(split_resources(text))
        })
        .unwrap_or_default()
    }

    pub fn extract(&self, record: &CountryRecord) -> ExtractedIndicators {
        ExtractedIndicators {
            population: self.population(record),
            gdp_growth_primary: self.gdp_growth_primary(record),
            gdp_growth_secondary: self.gdp_growth_secondary(record),
            credit_standing: self.credit_standing(record),
            natural_resources: self.natural_resources(record),
        }
    }

    pub fn snapshot(&self, record: &CountryRecord) -> IndicatorSnapshot {
        IndicatorSnapshot::new(record.id(), self.extract(record))
    }

    pub fn snapshots(&self, records: &[CountryRecord]) -> Vec<IndicatorSnapshot> {
        let snapshots: Vec<_> = records.iter().map(|record| self.snapshot(record)).collect();
        debug!(count = snapshots.len(), years = ?self.years, "extracted indicator snapshots");
        snapshots
    }
}

impl Default for IndicatorExtractor {
    fn default() -> Self {
        Self::new(GdpYears::default())
    }
}

fn parse_population(text: &str) -> Option<u64> {
    text.replace(',', "").trim().parse().ok()
}

/// `"3.1% (2023 est.)"` → `3.1`. Non-finite values are rejected.
fn parse_growth_rate(text: &str) -> Option<f64> {
    let cleaned = text.replace(',', "");
    let before_percent = cleaned.split('%').next()?.trim();
    before_percent
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// `"A+ (2021)"` → `Rated(A+)`; anything unrecognized is below the scale.
fn parse_rating_token(text: &str) -> CreditStanding {
    text.split_whitespace()
        .next()
        .map(str::to_ascii_uppercase)
        .and_then(|token| FitchRating::from_label(&token))
        .map(CreditStanding::Rated)
        .unwrap_or_default()
}

/// Splits a comma-separated resource list into trimmed, lowercase, non-empty
/// entries. Used for both fact-sheet text and user input.
pub fn split_resources(text: &str) -> BTreeSet<String> {
    text.split(',')
        .map(|piece| piece.trim().to_lowercase())
        .filter(|piece| !piece.is_empty())
        .collect()
}
