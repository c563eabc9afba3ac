use super::indicator::Indicator;
use super::thresholds::Thresholds;
use super::weights::Rankings;
use crate::factbook::{ExtractedIndicators, IndicatorSnapshot};
use serde::Serialize;
use tracing::{debug, info};

/// Per-indicator maxima used to scale raw values into `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizationCeilings {
    pub population: f64,
    pub gdp_growth_primary: f64,
    pub gdp_growth_secondary: f64,
    pub credit_rating: f64,
    pub natural_resources: f64,
}

impl NormalizationCeilings {
    pub const STANDARD: Self = Self {
        population: 1_409_128_296.0,
        gdp_growth_primary: 5.0,
        gdp_growth_secondary: 5.0,
        credit_rating: 17.0,
        natural_resources: 50.0,
    };

    pub fn ceiling(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::Population => self.population,
            Indicator::GdpGrowthPrimary => self.gdp_growth_primary,
            Indicator::GdpGrowthSecondary => self.gdp_growth_secondary,
            Indicator::CreditRating => self.credit_rating,
            Indicator::NaturalResources => self.natural_resources,
        }
    }
}

impl Default for NormalizationCeilings {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Discrete contribution of one indicator to a country's score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub indicator: Indicator,
    pub weight: u8,
    /// `None` when the indicator was absent or did not clear its threshold.
    pub normalized: Option<f64>,
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub country: String,
    /// Weighted score on a 0–100 scale.
    pub score: f64,
    pub components: Vec<ScoreComponent>,
}

/// Normalized weighted-sum scoring.
///
/// An indicator only contributes when it clears the same threshold the filter
/// applies; otherwise its term is zero. Countries are never dropped.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    thresholds: Thresholds,
    rankings: Rankings,
    ceilings: NormalizationCeilings,
}

impl ScoringEngine {
    pub fn new(thresholds: Thresholds, rankings: Rankings) -> Self {
        Self {
            thresholds,
            rankings,
            ceilings: NormalizationCeilings::STANDARD,
        }
    }

    pub fn with_ceilings(mut self, ceilings: NormalizationCeilings) -> Self {
        self.ceilings = ceilings;
        self
    }

    pub fn score(&self, snapshot: &IndicatorSnapshot) -> ScoreResult {
        let mut weighted_total = 0.0;
        let mut components = Vec::with_capacity(Indicator::COUNT);

        for (indicator, weight) in self.rankings.weights() {
            let normalized = self
                .qualifying_value(indicator, &snapshot.indicators)
                .map(|raw| normalize(raw, self.ceilings.ceiling(indicator)));
            let contribution = normalized.map_or(0.0, |value| f64::from(weight) * value);
            weighted_total += contribution;

            components.push(ScoreComponent {
                indicator,
                weight,
                normalized,
                contribution,
            });
        }

        let score = weighted_total / f64::from(self.rankings.total_weight()) * 100.0;
        debug!(country = %snapshot.country, score, "country scored");

        ScoreResult {
            country: snapshot.country.clone(),
            score,
            components,
        }
    }

    /// Scores every snapshot and orders them by descending score. Ties keep
    /// their input order.
    pub fn rank(&self, snapshots: &[IndicatorSnapshot]) -> Vec<ScoreResult> {
        let mut results: Vec<ScoreResult> =
            snapshots.iter().map(|snapshot| self.score(snapshot)).collect();
        results.sort_by(|left, right| right.score.total_cmp(&left.score));

        info!(countries = results.len(), "scoring complete");
        results
    }

    /// Raw value to normalize, or `None` when the indicator's predicate fails.
    fn qualifying_value(
        &self,
        indicator: Indicator,
        indicators: &ExtractedIndicators,
    ) -> Option<f64> {
        let thresholds = &self.thresholds;
        match indicator {
            Indicator::Population => indicators
                .population
                .filter(|value| thresholds.population_exceeds(*value))
                .map(|value| value as f64),
            Indicator::GdpGrowthPrimary => indicators
                .gdp_growth_primary
                .filter(|value| *value > thresholds.gdp_growth_primary),
            Indicator::GdpGrowthSecondary => indicators
                .gdp_growth_secondary
                .filter(|value| *value > thresholds.gdp_growth_secondary),
            Indicator::CreditRating => {
                let standing = indicators.credit_standing;
                standing
                    .exceeds(thresholds.credit_rating)
                    .then(|| f64::from(standing.rank()))
            }
            Indicator::NaturalResources => {
                let matched = thresholds.matched_resources(&indicators.natural_resources);
                (!matched.is_empty()).then(|| matched.len() as f64)
            }
        }
    }
}

/// `raw / ceiling`, capped to `[0, 1]`. The lower bound matters when a
/// negative growth threshold lets a negative value through.
fn normalize(raw: f64, ceiling: f64) -> f64 {
    (raw / ceiling).clamp(0.0, 1.0)
}
