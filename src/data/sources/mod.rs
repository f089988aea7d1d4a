//! External data source integrations
//!
//! Both datasets come from the free currency API, published on two mirrors:
//! - Primary: jsDelivr CDN
//! - Fallback: raw GitHub content
//!
//! A source turns `(base currency, date)` into a [`RateTable`] or a classified
//! error: [`InsightsError::NoDataForDate`] when the mirror has nothing for that
//! day, a transient error for anything else.

pub mod currency_api;

pub use currency_api::{CurrencyApiSource, Mirror};

use crate::currency::Currency;
use crate::error::{InsightsError, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::future::Future;

/// Trait for external rate sources
pub trait RateTableSource: Send + Sync {
    /// Fetch the table of `base` quoted in every other currency for `date`
    fn fetch_table(
        &self,
        base: Currency,
        date: NaiveDate,
    ) -> impl Future<Output = Result<RateTable>> + Send;

    /// Get the source name
    fn name(&self) -> &str;
}

/// One currency's quotes for one day
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    pub base: Currency,
    /// Day the data belongs to, as reported by the source
    pub date: NaiveDate,
    entries: HashMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct RawTable {
    #[serde(default)]
    date: Option<String>,
    #[serde(flatten)]
    tables: HashMap<String, serde_json::Value>,
}

impl RateTable {
    pub fn new(base: Currency, date: NaiveDate, entries: HashMap<String, f64>) -> Self {
        Self {
            base,
            date,
            entries,
        }
    }

    /// Parse a currency API body such as `{"date": "2024-01-15", "usd": {"eur": 0.91}}`.
    ///
    /// The body's own `date` wins over `requested` when present and valid.
    /// A body without the `base` table is a parse error.
    pub fn parse(body: &str, base: Currency, requested: NaiveDate) -> Result<Self> {
        let raw: RawTable = serde_json::from_str(body)
            .map_err(|e| InsightsError::ParseError(format!("invalid rate table: {}", e)))?;

        let date = raw
            .date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .unwrap_or(requested);

        let table = raw
            .tables
            .get(base.api_key())
            .and_then(|v| v.as_object())
            .ok_or_else(|| {
                InsightsError::ParseError(format!(
                    "rate table has no '{}' object",
                    base.api_key()
                ))
            })?;

        let entries = table
            .iter()
            .filter_map(|(code, value)| value.as_f64().map(|rate| (code.to_lowercase(), rate)))
            .filter(|(_, rate)| rate.is_finite())
            .collect();

        Ok(Self::new(base, date, entries))
    }

    /// Quote of one unit of `base` in `currency`
    pub fn rate(&self, currency: Currency) -> Option<f64> {
        self.entries.get(currency.api_key()).copied()
    }
}
