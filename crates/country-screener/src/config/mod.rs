use crate::factbook::GdpYears;
use std::env;
use std::fmt;
use std::path::PathBuf;

const DATA_DIR_VAR: &str = "SCREENER_DATA_DIR";
const PRIMARY_YEAR_VAR: &str = "SCREENER_GDP_PRIMARY_YEAR";
const SECONDARY_YEAR_VAR: &str = "SCREENER_GDP_SECONDARY_YEAR";
const LOG_LEVEL_VAR: &str = "SCREENER_LOG_LEVEL";

const DEFAULT_DATA_DIR: &str = "CIA Factbook";
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Top-level configuration for a screening run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data: DataConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let directory = env::var(DATA_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

        let defaults = GdpYears::default();
        let log_level = env::var(LOG_LEVEL_VAR).unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            data: DataConfig {
                directory,
                primary_year: YearSetting::from_env(PRIMARY_YEAR_VAR, defaults.primary),
                secondary_year: YearSetting::from_env(SECONDARY_YEAR_VAR, defaults.secondary),
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where fact sheets live and which GDP years to read from them.
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub directory: PathBuf,
    pub primary_year: YearSetting,
    pub secondary_year: YearSetting,
}

impl DataConfig {
    /// Default years, nothing read from the environment.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        let defaults = GdpYears::default();
        Self {
            directory: directory.into(),
            primary_year: YearSetting::new(PRIMARY_YEAR_VAR, None, defaults.primary),
            secondary_year: YearSetting::new(SECONDARY_YEAR_VAR, None, defaults.secondary),
        }
    }

    pub fn gdp_years(&self) -> Result<GdpYears, ConfigError> {
        Ok(GdpYears {
            primary: self.primary_year.resolve()?,
            secondary: self.secondary_year.resolve()?,
        })
    }
}

/// A GDP year as configured in the environment. The raw value is only
/// validated when resolved, so a command-line override can replace a bad one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearSetting {
    variable: &'static str,
    raw: Option<String>,
    default: u16,
}

impl YearSetting {
    pub fn new(variable: &'static str, raw: Option<String>, default: u16) -> Self {
        Self {
            variable,
            raw,
            default,
        }
    }

    fn from_env(variable: &'static str, default: u16) -> Self {
        Self::new(variable, env::var(variable).ok(), default)
    }

    pub fn resolve(&self) -> Result<u16, ConfigError> {
        match &self.raw {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidYear {
                    variable: self.variable,
                    value: value.clone(),
                }),
            None => Ok(self.default),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidYear {
        variable: &'static str,
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidYear { variable, value } => {
                write!(f, "{variable} must be a calendar year, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
