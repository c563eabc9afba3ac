use super::indicator::Indicator;
use crate::factbook::extract::split_resources;
use crate::rating::{FitchRating, UnknownRating};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Configuration problems that abort a run before any record is processed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CriteriaError {
    #[error("invalid population threshold '{0}': expected a whole number")]
    InvalidPopulation(String),
    #[error("invalid {indicator} threshold '{value}': expected a finite number")]
    InvalidGrowth {
        indicator: &'static str,
        value: String,
    },
    #[error(transparent)]
    UnknownRating(#[from] UnknownRating),
    #[error("invalid rank '{value}' for {indicator}: expected a whole number from 1 to 5")]
    InvalidRank {
        indicator: &'static str,
        value: String,
    },
    #[error("rank {rank} is assigned to both {first} and {second}")]
    DuplicateRank {
        rank: u8,
        first: &'static str,
        second: &'static str,
    },
    #[error("expected {expected} ranks, got {actual}")]
    RankCount { expected: usize, actual: usize },
}

/// Raw threshold answers as typed by the user, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThresholdInput {
    pub population: String,
    pub gdp_growth_primary: String,
    pub gdp_growth_secondary: String,
    pub credit_rating: String,
    pub resources: String,
}

/// Per-indicator comparison values for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Signed so that a negative threshold lets every present population through.
    pub population: i64,
    pub gdp_growth_primary: f64,
    pub gdp_growth_secondary: f64,
    pub credit_rating: FitchRating,
    pub resources: BTreeSet<String>,
}

impl Thresholds {
    pub fn from_input(input: &ThresholdInput) -> Result<Self, CriteriaError> {
        Ok(Self {
            population: parse_population_threshold(&input.population)?,
            gdp_growth_primary: parse_growth_threshold(
                Indicator::GdpGrowthPrimary,
                &input.gdp_growth_primary,
            )?,
            gdp_growth_secondary: parse_growth_threshold(
                Indicator::GdpGrowthSecondary,
                &input.gdp_growth_secondary,
            )?,
            credit_rating: input.credit_rating.parse()?,
            resources: split_resources(&input.resources),
        })
    }

    /// Strict `population > threshold`, compared without overflow.
    pub fn population_exceeds(&self, population: u64) -> bool {
        i128::from(population) > i128::from(self.population)
    }

    /// Desired resources the given set shares with this threshold.
    pub fn matched_resources(&self, available: &BTreeSet<String>) -> BTreeSet<String> {
        self.resources.intersection(available).cloned().collect()
    }
}

/// Accepts thousands separators, e.g. `40,000,000`.
pub fn parse_population_threshold(raw: &str) -> Result<i64, CriteriaError> {
    raw.trim()
        .replace(',', "")
        .parse()
        .map_err(|_| CriteriaError::InvalidPopulation(raw.trim().to_string()))
}

pub fn parse_growth_threshold(indicator: Indicator, raw: &str) -> Result<f64, CriteriaError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CriteriaError::InvalidGrowth {
            indicator: indicator.key(),
            value: raw.trim().to_string(),
        })
}
