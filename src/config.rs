//! # Configuration Module
//!
//! Environment configuration for the `nutrients` binary: which fallback stages
//! are enabled and how logs are written. Values come from the process
//! environment, after loading a `.env` file if one is present.

use crate::parse_options::ParseOptions;
use anyhow::{anyhow, Context, Result};
use std::env;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

// Environment variables read by the binary
pub const KEYWORD_FALLBACK_VAR: &str = "NUTRIENTS_KEYWORD_FALLBACK";
pub const FLEXIBLE_FALLBACK_VAR: &str = "NUTRIENTS_FLEXIBLE_FALLBACK";
pub const LOG_FORMAT_VAR: &str = "NUTRIENTS_LOG_FORMAT";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow!("Unknown log format: {other}")),
        }
    }
}

/// Configuration of the `nutrients` binary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Options passed to the parsing pipeline
    pub parse: ParseOptions,
    /// Log output format
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from `.env` and the process environment
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nutrients::config::{AppConfig, LogFormat};
    ///
    /// let config = AppConfig::from_lookup(|key| match key {
    ///     "NUTRIENTS_KEYWORD_FALLBACK" => Some("off".to_string()),
    ///     "NUTRIENTS_LOG_FORMAT" => Some("json".to_string()),
    ///     _ => None,
    /// })?;
    ///
    /// assert!(!config.parse.enable_keyword_fallback);
    /// assert!(config.parse.enable_flexible_fallback);
    /// assert_eq!(config.log_format, LogFormat::Json);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ParseOptions::default();
        let flag = |var: &str, default: bool| -> Result<bool> {
            match lookup(var) {
                Some(value) => parse_bool(&value).with_context(|| format!("Invalid value for {var}")),
                None => Ok(default),
            }
        };

        let parse = ParseOptions {
            enable_flexible_fallback: flag(FLEXIBLE_FALLBACK_VAR, defaults.enable_flexible_fallback)?,
            enable_keyword_fallback: flag(KEYWORD_FALLBACK_VAR, defaults.enable_keyword_fallback)?,
        };

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(value) => value
                .parse::<LogFormat>()
                .with_context(|| format!("Invalid value for {LOG_FORMAT_VAR}"))?,
            None => LogFormat::default(),
        };

        Ok(Self { parse, log_format })
    }
}

/// Parse a boolean flag such as `true`, `0`, `yes` or `off`
pub fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("Expected a boolean, got '{other}'")),
    }
}

/// Install the global tracing subscriber
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Records emitted
/// through the `log` facade are forwarded to the same subscriber. Logs go to
/// stderr so that stdout only carries parsed output.
pub fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|err| anyhow!("Failed to initialize logging: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.parse.enable_keyword_fallback);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_flags() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (FLEXIBLE_FALLBACK_VAR, "No"),
            (KEYWORD_FALLBACK_VAR, " 1 "),
        ]))
        .unwrap();
        assert!(!config.parse.enable_flexible_fallback);
        assert!(config.parse.enable_keyword_fallback);
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = AppConfig::from_lookup(lookup_from(&[(KEYWORD_FALLBACK_VAR, "maybe")])).unwrap_err();
        assert!(err.to_string().contains(KEYWORD_FALLBACK_VAR));

        let err = AppConfig::from_lookup(lookup_from(&[(LOG_FORMAT_VAR, "xml")])).unwrap_err();
        assert!(err.to_string().contains(LOG_FORMAT_VAR));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("TRUE").unwrap());
        assert!(parse_bool("on").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(parse_bool("").is_err());
    }

    #[test]
    fn test_log_format() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("yaml".parse::<LogFormat>().is_err());
    }
}
