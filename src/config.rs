//! Environment-driven configuration
//!
//! Every setting is optional. Values are read through a key lookup function so
//! callers (and tests) can supply their own source instead of the process
//! environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `API_TIMEOUT` | `10` (seconds) |
//! | `DEBUG` | `false` |
//! | `LOG_LEVEL` | `INFO` |
//! | `DATE_FORMAT` | `YYYY-MM-DD` |
//! | `MAX_LOOKBACK_DAYS` | `3` (at most 31) |
//! | `PRIMARY_API_URL` | jsDelivr CDN mirror |
//! | `FALLBACK_API_URL` | raw GitHub mirror |
//! | `EXCHANGE_RATE_API_KEY` | unset |
//! | `GOLD_API_KEY` | unset |

use crate::data::chain::MAX_LOOKBACK_LIMIT;
use crate::error::{InsightsError, Result};
use chrono::NaiveDate;
use log::LevelFilter;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_PRIMARY_URL: &str =
    "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@{date}/v1/currencies/{base}.json";
pub const DEFAULT_FALLBACK_URL: &str =
    "https://raw.githubusercontent.com/fawazahmed0/currency-api/1/{date}/currencies/{base}.json";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOOKBACK_DAYS: u32 = 3;

/// Log verbosity accepted by `LOG_LEVEL`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            other => Err(InsightsError::ConfigError(format!(
                "LOG_LEVEL must be one of DEBUG, INFO, WARNING, ERROR (got '{}')",
                other
            ))),
        }
    }

    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

/// Accepted input pattern for dates, built from `YYYY`, `MM` and `DD` tokens.
///
/// Request keys are always `YYYY-MM-DD`; this only governs what the user types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    chrono_format: String,
}

impl DateFormat {
    pub fn parse(pattern: &str) -> Result<Self> {
        let pattern = pattern.trim();
        let mut chrono_format = String::with_capacity(pattern.len());
        let mut rest = pattern;
        let (mut year, mut month, mut day) = (false, false, false);

        while !rest.is_empty() {
            if let Some(tail) = rest.strip_prefix("YYYY") {
                chrono_format.push_str("%Y");
                year = true;
                rest = tail;
            } else if let Some(tail) = rest.strip_prefix("MM") {
                chrono_format.push_str("%m");
                month = true;
                rest = tail;
            } else if let Some(tail) = rest.strip_prefix("DD") {
                chrono_format.push_str("%d");
                day = true;
                rest = tail;
            } else {
                let mut chars = rest.chars();
                let ch = chars.next().unwrap_or_default();
                if ch.is_ascii_alphanumeric() || ch == '%' {
                    return Err(InsightsError::ConfigError(format!(
                        "DATE_FORMAT '{}' contains unsupported token at '{}'",
                        pattern, rest
                    )));
                }
                chrono_format.push(ch);
                rest = chars.as_str();
            }
        }

        if !(year && month && day) {
            return Err(InsightsError::ConfigError(format!(
                "DATE_FORMAT '{}' must contain YYYY, MM and DD",
                pattern
            )));
        }

        Ok(Self {
            pattern: pattern.to_string(),
            chrono_format,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Parse a user-supplied date with this pattern
    pub fn parse_date(&self, input: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(input, &self.chrono_format).map_err(|e| {
            InsightsError::InvalidDate {
                input: input.to_string(),
                reason: format!("expected {}: {}", self.pattern, e),
            }
        })
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            pattern: "YYYY-MM-DD".to_string(),
            chrono_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// Runtime configuration
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub api_timeout: Duration,
    pub debug: bool,
    pub log_level: LogLevel,
    pub date_format: DateFormat,
    pub max_lookback_days: u32,
    pub primary_url: String,
    pub fallback_url: String,
    pub exchange_rate_api_key: Option<String>,
    pub gold_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            debug: false,
            log_level: LogLevel::Info,
            date_format: DateFormat::default(),
            max_lookback_days: DEFAULT_LOOKBACK_DAYS,
            primary_url: DEFAULT_PRIMARY_URL.to_string(),
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
            exchange_rate_api_key: None,
            gold_api_key: None,
        }
    }
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from the process environment, keeping defaults for bad values
    pub fn from_env_lenient() -> (Self, Vec<InsightsError>) {
        Self::from_lookup_lenient(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; blank values count as unset.
    ///
    /// Fails on the first invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (config, errors) = Self::from_lookup_lenient(lookup);
        match errors.into_iter().next() {
            Some(e) => Err(e),
            None => Ok(config),
        }
    }

    /// Load from an arbitrary key lookup, applying every valid value.
    ///
    /// Each invalid value leaves that setting at its default and is returned
    /// alongside the config.
    pub fn from_lookup_lenient<F>(lookup: F) -> (Self, Vec<InsightsError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Config::default();
        let mut errors = Vec::new();

        fn apply<T>(slot: &mut T, parsed: Result<T>, errors: &mut Vec<InsightsError>) {
            match parsed {
                Ok(value) => *slot = value,
                Err(e) => errors.push(e),
            }
        }

        if let Some(value) = get("API_TIMEOUT") {
            apply(&mut config.api_timeout, parse_timeout(&value), &mut errors);
        }
        if let Some(value) = get("DEBUG") {
            apply(&mut config.debug, parse_bool("DEBUG", &value), &mut errors);
        }
        if let Some(value) = get("LOG_LEVEL") {
            apply(&mut config.log_level, LogLevel::parse(&value), &mut errors);
        }
        if let Some(value) = get("DATE_FORMAT") {
            apply(&mut config.date_format, DateFormat::parse(&value), &mut errors);
        }
        if let Some(value) = get("MAX_LOOKBACK_DAYS") {
            apply(&mut config.max_lookback_days, parse_lookback(&value), &mut errors);
        }
        if let Some(value) = get("PRIMARY_API_URL") {
            apply(
                &mut config.primary_url,
                validate_url_template("PRIMARY_API_URL", value),
                &mut errors,
            );
        }
        if let Some(value) = get("FALLBACK_API_URL") {
            apply(
                &mut config.fallback_url,
                validate_url_template("FALLBACK_API_URL", value),
                &mut errors,
            );
        }

        config.exchange_rate_api_key = get("EXCHANGE_RATE_API_KEY");
        config.gold_api_key = get("GOLD_API_KEY");

        (config, errors)
    }

    /// Effective log filter; `DEBUG=true` wins over `LOG_LEVEL`
    pub fn level_filter(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::Debug
        } else {
            self.log_level.to_level_filter()
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "<redacted>");
        f.debug_struct("Config")
            .field("api_timeout", &self.api_timeout)
            .field("debug", &self.debug)
            .field("log_level", &self.log_level)
            .field("date_format", &self.date_format.pattern())
            .field("max_lookback_days", &self.max_lookback_days)
            .field("primary_url", &self.primary_url)
            .field("fallback_url", &self.fallback_url)
            .field("exchange_rate_api_key", &redact(&self.exchange_rate_api_key))
            .field("gold_api_key", &redact(&self.gold_api_key))
            .finish()
    }
}

fn parse_timeout(value: &str) -> Result<Duration> {
    let secs: u64 = value.parse().map_err(|_| {
        InsightsError::ConfigError(format!(
            "API_TIMEOUT must be a whole number of seconds (got '{}')",
            value
        ))
    })?;
    if secs == 0 {
        return Err(InsightsError::ConfigError(
            "API_TIMEOUT must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

fn parse_lookback(value: &str) -> Result<u32> {
    let days: u32 = value.parse().map_err(|_| {
        InsightsError::ConfigError(format!(
            "MAX_LOOKBACK_DAYS must be a non-negative integer (got '{}')",
            value
        ))
    })?;
    if days > MAX_LOOKBACK_LIMIT {
        return Err(InsightsError::ConfigError(format!(
            "MAX_LOOKBACK_DAYS must be at most {} (got {})",
            MAX_LOOKBACK_LIMIT, days
        )));
    }
    Ok(days)
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(InsightsError::ConfigError(format!(
            "{} must be a boolean (got '{}')",
            key, value
        ))),
    }
}

fn validate_url_template(key: &str, value: String) -> Result<String> {
    if !value.contains("{date}") || !value.contains("{base}") {
        return Err(InsightsError::ConfigError(format!(
            "{} must contain {{date}} and {{base}} placeholders",
            key
        )));
    }
    Ok(value)
}
