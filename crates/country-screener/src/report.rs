use crate::factbook::IndicatorSnapshot;
use crate::screening::{FilterOutcome, ScoreResult};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;

/// Flat, spreadsheet-friendly view of a filter match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRow {
    pub country: String,
    pub population: u64,
    pub gdp_growth_primary: f64,
    pub gdp_growth_secondary: f64,
    pub credit_rating: &'static str,
    pub credit_rank: u8,
    pub matched_resources: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRow {
    pub position: usize,
    pub country: String,
    pub score: f64,
}

/// Extracted indicators as one row; absent values become empty cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotRow {
    pub country: String,
    pub population: Option<u64>,
    pub gdp_growth_primary: Option<f64>,
    pub gdp_growth_secondary: Option<f64>,
    pub credit_rating: Option<&'static str>,
    pub credit_rank: u8,
    pub natural_resources: String,
}

pub fn match_rows(outcome: &FilterOutcome) -> Vec<MatchRow> {
    outcome
        .matches
        .iter()
        .map(|entry| MatchRow {
            country: entry.country.clone(),
            population: entry.population,
            gdp_growth_primary: entry.gdp_growth_primary,
            gdp_growth_secondary: entry.gdp_growth_secondary,
            credit_rating: entry.credit_rating.label(),
            credit_rank: entry.credit_rating.rank(),
            matched_resources: join_resources(&entry.matched_resources),
        })
        .collect()
}

pub fn snapshot_rows(snapshots: &[IndicatorSnapshot]) -> Vec<SnapshotRow> {
    snapshots
        .iter()
        .map(|snapshot| {
            let indicators = &snapshot.indicators;
            SnapshotRow {
                country: snapshot.country.clone(),
                population: indicators.population,
                gdp_growth_primary: indicators.gdp_growth_primary,
                gdp_growth_secondary: indicators.gdp_growth_secondary,
                credit_rating: indicators.credit_standing.rating().map(|rating| rating.label()),
                credit_rank: indicators.credit_standing.rank(),
                natural_resources: join_resources(&indicators.natural_resources),
            }
        })
        .collect()
}

/// Positions are 1-based; scores are rounded to two decimals.
pub fn score_rows(results: &[ScoreResult]) -> Vec<ScoreRow> {
    results
        .iter()
        .enumerate()
        .map(|(index, result)| ScoreRow {
            position: index + 1,
            country: result.country.clone(),
            score: (result.score * 100.0).round() / 100.0,
        })
        .collect()
}

fn join_resources(resources: &BTreeSet<String>) -> String {
    resources
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn write_csv<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factbook::ExtractedIndicators;
    use crate::rating::{CreditStanding, FitchRating};
    use crate::screening::CountryMatch;

    fn outcome() -> FilterOutcome {
        FilterOutcome {
            matches: vec![CountryMatch {
                country: "Alpha".to_string(),
                population: 50_000_000,
                gdp_growth_primary: 4.2,
                gdp_growth_secondary: 3.1,
                credit_rating: FitchRating::A,
                matched_resources: ["gas", "gold"].iter().map(|r| r.to_string()).collect(),
            }],
            tallies: Vec::new(),
        }
    }

    #[test]
    fn match_rows_flatten_rating_and_resources() {
        let rows = match_rows(&outcome());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].credit_rating, "A");
        assert_eq!(rows[0].credit_rank, 13);
        assert_eq!(rows[0].matched_resources, "gas; gold");
    }

    #[test]
    fn csv_output_has_header_and_rows() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &match_rows(&outcome())).expect("csv written");
        let text = String::from_utf8(buffer).expect("utf8");

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("country,population,gdp_growth_primary,gdp_growth_secondary,credit_rating,credit_rank,matched_resources")
        );
        assert_eq!(lines.next(), Some("Alpha,50000000,4.2,3.1,A,13,gas; gold"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn score_rows_round_and_number_positions() {
        let results = vec![
            ScoreResult {
                country: "Alpha".to_string(),
                score: 26.666_666,
                components: Vec::new(),
            },
            ScoreResult {
                country: "Beta".to_string(),
                score: 0.0,
                components: Vec::new(),
            },
        ];
        let rows = score_rows(&results);
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[0].score, 26.67);
        assert_eq!(rows[1].position, 2);
        assert_eq!(rows[1].country, "Beta");
    }

    #[test]
    fn snapshot_rows_leave_absent_values_empty() {
        let snapshots = vec![
            IndicatorSnapshot::new(
                "Alpha",
                ExtractedIndicators {
                    population: Some(50_000_000),
                    gdp_growth_primary: Some(4.2),
                    gdp_growth_secondary: None,
                    credit_standing: CreditStanding::Rated(FitchRating::A),
                    natural_resources: ["oil", "gas"].iter().map(|r| r.to_string()).collect(),
                },
            ),
            IndicatorSnapshot::new("Gamma", ExtractedIndicators::default()),
        ];

        let mut buffer = Vec::new();
        write_csv(&mut buffer, &snapshot_rows(&snapshots)).expect("csv written");
        let text = String::from_utf8(buffer).expect("utf8");

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "Alpha,50000000,4.2,,A,13,gas; oil");
        assert_eq!(lines[2], "Gamma,,,,,0,");
    }
}
