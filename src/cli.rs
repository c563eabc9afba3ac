use crate::prompt::Prompter;
use crate::render;
use clap::{Args, Parser, Subcommand, ValueEnum};
use country_screener::config::{AppConfig, DataConfig};
use country_screener::error::AppError;
use country_screener::factbook::{DirectorySource, GdpYears, IndicatorExtractor, RecordSource};
use country_screener::screening::{FilterEngine, Rankings, ScoringEngine, Thresholds};
use country_screener::telemetry;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "country-screener",
    about = "Filter and score countries from per-country fact-sheet records",
    version
)]
pub(crate) struct Cli {
    #[command(flatten)]
    data: DataArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the countries that strictly exceed every threshold
    Filter(ThresholdArgs),
    /// Rank every country by weighted, normalized score
    Score(ScoreArgs),
    /// Show the indicators extracted from each record
    Indicators(IndicatorArgs),
}

#[derive(Args, Debug, Default)]
struct DataArgs {
    /// Directory of per-country JSON fact sheets (overrides SCREENER_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Year of the first real GDP growth field (overrides SCREENER_GDP_PRIMARY_YEAR)
    #[arg(long, global = true)]
    gdp_primary_year: Option<u16>,
    /// Year of the second real GDP growth field (overrides SCREENER_GDP_SECONDARY_YEAR)
    #[arg(long, global = true)]
    gdp_secondary_year: Option<u16>,
    /// Output format for the report on stdout
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl DataArgs {
    /// Applies flag overrides. An environment year is only validated when no
    /// flag replaces it.
    fn resolve(&self, data: DataConfig) -> Result<(PathBuf, GdpYears), AppError> {
        let directory = self.data_dir.clone().unwrap_or(data.directory);
        let primary = match self.gdp_primary_year {
            Some(year) => year,
            None => data.primary_year.resolve()?,
        };
        let secondary = match self.gdp_secondary_year {
            Some(year) => year,
            None => data.secondary_year.resolve()?,
        };
        Ok((directory, GdpYears { primary, secondary }))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Threshold values; anything omitted is asked for on stdin.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct ThresholdArgs {
    /// Population threshold, e.g. 40000000 or 40,000,000
    #[arg(long)]
    pub(crate) population: Option<String>,
    /// Real GDP growth threshold (%) for the primary year
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) gdp_primary: Option<String>,
    /// Real GDP growth threshold (%) for the secondary year
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) gdp_secondary: Option<String>,
    /// Fitch rating label the country must exceed, e.g. BBB
    #[arg(long)]
    pub(crate) rating: Option<String>,
    /// Comma-separated natural resources, e.g. "gas, gold"
    #[arg(long)]
    pub(crate) resources: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
struct ScoreArgs {
    #[command(flatten)]
    thresholds: ThresholdArgs,
    /// Ranks for population, GDP primary, GDP secondary, rating, resources (1 = most important)
    #[arg(long)]
    ranks: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
struct IndicatorArgs {
    /// Only show the record with this identifier
    #[arg(long)]
    country: Option<String>,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stderr());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    execute(cli, config.data, &mut prompter, &mut out)
}

fn execute<R: BufRead, P: Write, W: Write>(
    cli: Cli,
    config: DataConfig,
    prompter: &mut Prompter<R, P>,
    out: &mut W,
) -> Result<(), AppError> {
    let (directory, years) = cli.data.resolve(config)?;
    let format = cli.data.format;
    let extractor = IndicatorExtractor::new(years);
    let source = DirectorySource::new(directory);

    match cli.command {
        Command::Filter(args) => run_filter(args, &source, &extractor, format, prompter, out),
        Command::Score(args) => run_score(args, &source, &extractor, format, prompter, out),
        Command::Indicators(args) => run_indicators(args, &source, &extractor, format, out),
    }
}

/// Criteria are validated before any record is read.
fn collect_thresholds<R: BufRead, P: Write>(
    args: ThresholdArgs,
    years: GdpYears,
    prompter: &mut Prompter<R, P>,
) -> Result<Thresholds, AppError> {
    let input = prompter.threshold_input(args, years)?;
    Ok(Thresholds::from_input(&input)?)
}

fn run_filter<R: BufRead, P: Write, W: Write>(
    args: ThresholdArgs,
    source: &dyn RecordSource,
    extractor: &IndicatorExtractor,
    format: OutputFormat,
    prompter: &mut Prompter<R, P>,
    out: &mut W,
) -> Result<(), AppError> {
    let years = extractor.years();
    let engine = FilterEngine::new(collect_thresholds(args, years, prompter)?);

    let records = source.load()?;
    info!(records = records.len(), "fact sheets loaded");
    let outcome = engine.run(&extractor.snapshots(&records));

    render::filter_report(out, &outcome, engine.thresholds(), years, format)
}

fn run_score<R: BufRead, P: Write, W: Write>(
    args: ScoreArgs,
    source: &dyn RecordSource,
    extractor: &IndicatorExtractor,
    format: OutputFormat,
    prompter: &mut Prompter<R, P>,
    out: &mut W,
) -> Result<(), AppError> {
    let years = extractor.years();
    let rankings = match args.ranks {
        Some(raw) => Rankings::parse_list(&raw)?,
        None => prompter.rankings(years)?,
    };
    let thresholds = collect_thresholds(args.thresholds, years, prompter)?;
    let engine = ScoringEngine::new(thresholds, rankings);

    let records = source.load()?;
    info!(records = records.len(), "fact sheets loaded");
    let ranked = engine.rank(&extractor.snapshots(&records));

    render::score_report(out, &ranked, format)
}

fn run_indicators<W: Write>(
    args: IndicatorArgs,
    source: &dyn RecordSource,
    extractor: &IndicatorExtractor,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), AppError> {
    let mut records = source.load()?;
    if let Some(country) = &args.country {
        records.retain(|record| record.id() == country.as_str());
        if records.is_empty() {
            warn!(country = %country, "no record with that identifier");
            // Machine formats still get an empty, parseable document.
            if format == OutputFormat::Table {
                writeln!(out, "No record named '{country}'.")?;
                return Ok(());
            }
        }
    }

    render::indicator_report(out, &extractor.snapshots(&records), extractor.years(), format)
}
