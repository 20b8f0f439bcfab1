//! Run configuration resolved once at startup from the environment.
//!
//! `main` loads `.env` through `dotenv` before calling [`Config::from_env`].

use crate::error::RoutesError;
use colored::Colorize;
use std::path::PathBuf;

/// Number of insertions between two aggregator flushes.
pub const AGGREGATE_BATCH_SIZE: usize = 300;

pub const DEFAULT_REGISTRY_FILE: &str = "delegated-apnic-latest";
pub const DEFAULT_REGISTRY: &str = "apnic";
pub const DEFAULT_COUNTRY: &str = "cn";

pub const ENV_REGISTRY_FILE: &str = "CHNROUTES_REGISTRY_FILE";
pub const ENV_REGISTRY: &str = "CHNROUTES_REGISTRY";
pub const ENV_COUNTRY: &str = "CHNROUTES_COUNTRY";
pub const ENV_AGGREGATE: &str = "CHNROUTES_AGGREGATE";
pub const ENV_CUSTOM_ROUTES: &str = "CHNROUTES_CUSTOM_ROUTES";
pub const ENV_OUTPUT: &str = "CHNROUTES_OUTPUT";

/// Format of the network listing written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the already downloaded delegation file.
    pub registry_file: PathBuf,
    /// Registry name matched in the first field, e.g. `apnic`.
    pub registry: String,
    /// Two letter country code, e.g. `cn`.
    pub country: String,
    /// Whether the aggregator runs. Already resolved against the build.
    pub aggregate: bool,
    /// Extra CIDR routes appended after the supplementary list.
    pub custom_routes: Vec<String>,
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            registry_file: PathBuf::from(DEFAULT_REGISTRY_FILE),
            registry: DEFAULT_REGISTRY.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            aggregate: false,
            custom_routes: vec![],
            output: OutputFormat::Csv,
        }
    }
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Config, RoutesError> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, RoutesError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Config::default();

        let aggregate = match get(ENV_AGGREGATE) {
            Some(value) => parse_bool(ENV_AGGREGATE, &value)?,
            None => false,
        };
        let output = match get(ENV_OUTPUT) {
            Some(value) => parse_output(&value)?,
            None => defaults.output,
        };
        let custom_routes = get(ENV_CUSTOM_ROUTES)
            .map(|routes| {
                routes
                    .split(',')
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let config = Config {
            registry_file: get(ENV_REGISTRY_FILE)
                .map(PathBuf::from)
                .unwrap_or(defaults.registry_file),
            registry: get(ENV_REGISTRY)
                .map(|r| r.to_lowercase())
                .unwrap_or(defaults.registry),
            country: get(ENV_COUNTRY)
                .map(|c| c.to_lowercase())
                .unwrap_or(defaults.country),
            aggregate: resolve_aggregate(aggregate),
            custom_routes,
            output,
        };
        log::debug!("config={:?}", config);
        Ok(config)
    }
}

/// Whether this build carries the aggregator.
pub fn aggregation_available() -> bool {
    cfg!(feature = "aggregate")
}

/// Turn aggregation off, with a warning, when the build lacks it.
pub fn resolve_aggregate(requested: bool) -> bool {
    resolve_aggregate_with(requested, aggregation_available())
}

fn resolve_aggregate_with(requested: bool, available: bool) -> bool {
    if requested && !available {
        log::warn!(
            "{} Route aggregation is not built in (feature 'aggregate'), continuing without it",
            "WARN".on_red()
        );
        return false;
    }
    requested
}

fn parse_bool(key: &str, value: &str) -> Result<bool, RoutesError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(RoutesError::Config {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_output(value: &str) -> Result<OutputFormat, RoutesError> {
    match value.to_lowercase().as_str() {
        "csv" => Ok(OutputFormat::Csv),
        "json" => Ok(OutputFormat::Json),
        _ => Err(RoutesError::Config {
            key: ENV_OUTPUT.to_string(),
            value: value.to_string(),
        }),
    }
}
