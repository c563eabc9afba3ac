use super::indicator::Indicator;
use super::thresholds::Thresholds;
use crate::factbook::{ExtractedIndicators, IndicatorSnapshot};
use crate::rating::FitchRating;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, info};

/// A country that cleared every threshold, with the values that cleared them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryMatch {
    pub country: String,
    pub population: u64,
    pub gdp_growth_primary: f64,
    pub gdp_growth_secondary: f64,
    pub credit_rating: FitchRating,
    pub matched_resources: BTreeSet<String>,
}

/// How many countries cleared a single criterion on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CriterionTally {
    pub indicator: Indicator,
    pub passed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOutcome {
    pub matches: Vec<CountryMatch>,
    pub tallies: Vec<CriterionTally>,
}

impl FilterOutcome {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.matches.iter().map(|entry| entry.country.as_str())
    }
}

/// Keeps only the countries that strictly exceed every threshold.
///
/// Each criterion is evaluated on its own over the whole snapshot list and the
/// passing sets are intersected afterwards. Absent values never pass.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    thresholds: Thresholds,
}

impl FilterEngine {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn run(&self, snapshots: &[IndicatorSnapshot]) -> FilterOutcome {
        let thresholds = &self.thresholds;

        let population = passing(snapshots, |indicators| {
            indicators
                .population
                .filter(|value| thresholds.population_exceeds(*value))
        });
        let gdp_primary = passing(snapshots, |indicators| {
            indicators
                .gdp_growth_primary
                .filter(|value| *value > thresholds.gdp_growth_primary)
        });
        let gdp_secondary = passing(snapshots, |indicators| {
            indicators
                .gdp_growth_secondary
                .filter(|value| *value > thresholds.gdp_growth_secondary)
        });
        let rating = passing(snapshots, |indicators| {
            let standing = indicators.credit_standing;
            standing
                .rating()
                .filter(|_| standing.exceeds(thresholds.credit_rating))
        });
        let resources = passing(snapshots, |indicators| {
            let matched = thresholds.matched_resources(&indicators.natural_resources);
            (!matched.is_empty()).then_some(matched)
        });

        let tallies = vec![
            tally(Indicator::Population, population.len()),
            tally(Indicator::GdpGrowthPrimary, gdp_primary.len()),
            tally(Indicator::GdpGrowthSecondary, gdp_secondary.len()),
            tally(Indicator::CreditRating, rating.len()),
            tally(Indicator::NaturalResources, resources.len()),
        ];

        let common = intersect_all(&[
            key_set(&population),
            key_set(&gdp_primary),
            key_set(&gdp_secondary),
            key_set(&rating),
            key_set(&resources),
        ]);

        let matches: Vec<CountryMatch> = snapshots
            .iter()
            .map(|snapshot| snapshot.country.as_str())
            .filter(|country| common.contains(country))
            .filter_map(|country| {
                Some(CountryMatch {
                    country: country.to_string(),
                    population: *population.get(country)?,
                    gdp_growth_primary: *gdp_primary.get(country)?,
                    gdp_growth_secondary: *gdp_secondary.get(country)?,
                    credit_rating: *rating.get(country)?,
                    matched_resources: resources.get(country)?.clone(),
                })
            })
            .collect();

        info!(
            countries = snapshots.len(),
            matches = matches.len(),
            "threshold filter complete"
        );

        FilterOutcome { matches, tallies }
    }
}

/// Identifiers present in every set. Order of `sets` does not matter.
pub fn intersect_all<'a>(sets: &[HashSet<&'a str>]) -> HashSet<&'a str> {
    let Some((first, rest)) = sets.split_first() else {
        return HashSet::new();
    };

    first
        .iter()
        .copied()
        .filter(|id| rest.iter().all(|set| set.contains(id)))
        .collect()
}

fn passing<'a, T, F>(snapshots: &'a [IndicatorSnapshot], check: F) -> HashMap<&'a str, T>
where
    F: Fn(&ExtractedIndicators) -> Option<T>,
{
    snapshots
        .iter()
        .filter_map(|snapshot| {
            check(&snapshot.indicators).map(|value| (snapshot.country.as_str(), value))
        })
        .collect()
}

fn key_set<'a, T>(passed: &HashMap<&'a str, T>) -> HashSet<&'a str> {
    passed.keys().copied().collect()
}

fn tally(indicator: Indicator, passed: usize) -> CriterionTally {
    debug!(criterion = indicator.key(), passed, "criterion evaluated");
    CriterionTally { indicator, passed }
}
