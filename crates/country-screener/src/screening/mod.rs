//! Threshold filtering and weighted scoring over extracted indicators.

pub mod filter;
pub mod indicator;
pub mod scoring;
pub mod thresholds;
pub mod weights;

#[cfg(test)]
mod tests;

pub use filter::{intersect_all, CountryMatch, CriterionTally, FilterEngine, FilterOutcome};
pub use indicator::Indicator;
pub use scoring::{NormalizationCeilings, ScoreComponent, ScoreResult, ScoringEngine};
pub use thresholds::{CriteriaError, ThresholdInput, Thresholds};
pub use weights::Rankings;
