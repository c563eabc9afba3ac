use crate::cli::OutputFormat;
use country_screener::error::AppError;
use country_screener::factbook::{GdpYears, IndicatorSnapshot};
use country_screener::report::{match_rows, score_rows, snapshot_rows, write_csv};
use country_screener::screening::{
    CountryMatch, CriterionTally, FilterOutcome, ScoreResult, Thresholds,
};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::io::{self, Write};

pub(crate) const NO_MATCHES: &str = "No countries meet all the criteria.";

#[derive(Serialize)]
struct FilterReport<'a> {
    gdp_years: GdpYears,
    thresholds: &'a Thresholds,
    matches: &'a [CountryMatch],
    tallies: &'a [CriterionTally],
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

pub(crate) fn filter_report<W: Write>(
    out: &mut W,
    outcome: &FilterOutcome,
    thresholds: &Thresholds,
    years: GdpYears,
    format: OutputFormat,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => write_json(
            out,
            &FilterReport {
                gdp_years: years,
                thresholds,
                matches: &outcome.matches,
                tallies: &outcome.tallies,
                message: outcome.is_empty().then_some(NO_MATCHES),
            },
        ),
        OutputFormat::Csv if !outcome.is_empty() => Ok(write_csv(out, &match_rows(outcome))?),
        // An empty match set still gets the explicit message, never a bare header.
        OutputFormat::Csv | OutputFormat::Table => {
            Ok(filter_table(out, outcome, thresholds, years)?)
        }
    }
}

fn filter_table<W: Write>(
    out: &mut W,
    outcome: &FilterOutcome,
    thresholds: &Thresholds,
    years: GdpYears,
) -> io::Result<()> {
    if outcome.is_empty() {
        return writeln!(out, "{NO_MATCHES}");
    }

    writeln!(
        out,
        "Countries meeting all criteria (population > {}, {} GDP growth > {}%, {} GDP growth > {}%, Fitch rating > {}, natural resources: {}):",
        thresholds.population,
        years.primary,
        thresholds.gdp_growth_primary,
        years.secondary,
        thresholds.gdp_growth_secondary,
        thresholds.credit_rating,
        list_or(&thresholds.resources, "none"),
    )?;
    for entry in &outcome.matches {
        writeln!(
            out,
            "{}: Population = {}, {} GDP Growth = {}%, {} GDP Growth = {}%, Fitch Credit rating = {} (rank {}), Natural Resources = {}",
            entry.country,
            entry.population,
            years.primary,
            entry.gdp_growth_primary,
            years.secondary,
            entry.gdp_growth_secondary,
            entry.credit_rating,
            entry.credit_rating.rank(),
            list_or(&entry.matched_resources, "none"),
        )?;
    }
    Ok(())
}

pub(crate) fn score_report<W: Write>(
    out: &mut W,
    results: &[ScoreResult],
    format: OutputFormat,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => write_json(out, results),
        OutputFormat::Csv => Ok(write_csv(out, &score_rows(results))?),
        OutputFormat::Table => {
            writeln!(out, "Countries ranked by score:")?;
            for (position, result) in results.iter().enumerate() {
                writeln!(
                    out,
                    "{}. {}: Score = {:.2}",
                    position + 1,
                    result.country,
                    result.score
                )?;
            }
            Ok(())
        }
    }
}

pub(crate) fn indicator_report<W: Write>(
    out: &mut W,
    snapshots: &[IndicatorSnapshot],
    years: GdpYears,
    format: OutputFormat,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => write_json(out, snapshots),
        OutputFormat::Csv => Ok(write_csv(out, &snapshot_rows(snapshots))?),
        OutputFormat::Table => {
            for snapshot in snapshots {
                let indicators = &snapshot.indicators;
                writeln!(
                    out,
                    "{}: population = {}, real GDP growth {} = {}, real GDP growth {} = {}, Fitch credit rating = {}, natural resources = {}",
                    snapshot.country,
                    or_missing(indicators.population),
                    years.primary,
                    or_missing(indicators.gdp_growth_primary.map(|value| format!("{value}%"))),
                    years.secondary,
                    or_missing(indicators.gdp_growth_secondary.map(|value| format!("{value}%"))),
                    indicators.credit_standing,
                    list_or(&indicators.natural_resources, "none"),
                )?;
            }
            Ok(())
        }
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn or_missing<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "n/a".to_string(), |value| value.to_string())
}

fn list_or(items: &BTreeSet<String>, empty: &str) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    items.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
