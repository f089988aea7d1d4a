//! Exchange rates for the reported currency set, quoted per one USD

use super::chain::FallbackChain;
use super::http::HttpClient;
use super::sources::{CurrencyApiSource, Mirror, RateTable};
use super::FetchStatus;
use crate::config::Config;
use crate::currency::Currency;
use crate::date_input::DateQuery;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

const DATASET: &str = "exchange rates";

/// Rates for EUR, GBP and JPY against USD; `None` renders as "N/A"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeRateResult {
    base: Currency,
    rates: BTreeMap<Currency, Option<f64>>,
    sourced_date: Option<NaiveDate>,
    status: FetchStatus,
    source: Option<Mirror>,
}

impl ExchangeRateResult {
    /// A successful fetch; currencies missing from `rates` become `None`
    pub fn available(
        rates: BTreeMap<Currency, Option<f64>>,
        sourced_date: NaiveDate,
        source: Mirror,
    ) -> Self {
        let rates = Currency::REPORTED
            .iter()
            .map(|c| (*c, rates.get(c).copied().flatten()))
            .collect();
        Self {
            base: Currency::USD,
            rates,
            sourced_date: Some(sourced_date),
            status: FetchStatus::Ok,
            source: Some(source),
        }
    }

    /// Every fallback exhausted
    pub fn unavailable() -> Self {
        Self {
            base: Currency::USD,
            rates: Currency::REPORTED.iter().map(|c| (*c, None)).collect(),
            sourced_date: None,
            status: FetchStatus::Unavailable,
            source: None,
        }
    }

    pub fn base(&self) -> Currency {
        self.base
    }

    pub fn rate(&self, currency: Currency) -> Option<f64> {
        self.rates.get(&currency).copied().flatten()
    }

    /// Reported currencies in display order with their rates
    pub fn rates(&self) -> impl Iterator<Item = (Currency, Option<f64>)> + '_ {
        Currency::REPORTED
            .into_iter()
            .map(move |c| (c, self.rate(c)))
    }

    pub fn sourced_date(&self) -> Option<NaiveDate> {
        self.sourced_date
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn source(&self) -> Option<Mirror> {
        self.source
    }
}

fn reported_rates(table: &RateTable) -> Option<BTreeMap<Currency, Option<f64>>> {
    let rates: BTreeMap<Currency, Option<f64>> = Currency::REPORTED
        .iter()
        .map(|c| (*c, table.rate(*c)))
        .collect();
    if rates.values().all(Option::is_none) {
        None
    } else {
        Some(rates)
    }
}

/// Fetches the USD table through the fallback chain
pub struct ExchangeRateFetcher<C> {
    sources: Vec<CurrencyApiSource<C>>,
    chain: FallbackChain,
}

impl<C: HttpClient> ExchangeRateFetcher<C> {
    pub fn new(sources: Vec<CurrencyApiSource<C>>, chain: FallbackChain) -> Self {
        Self { sources, chain }
    }

    pub fn from_config(client: Arc<C>, config: &Config) -> Self {
        Self::new(
            CurrencyApiSource::mirrors(client, config, config.exchange_rate_api_key.clone()),
            FallbackChain::new(config.max_lookback_days),
        )
    }

    /// Never fails: exhaustion yields an `unavailable` result
    pub async fn fetch(&self, query: &DateQuery) -> ExchangeRateResult {
        let resolved = self
            .chain
            .resolve(
                DATASET,
                &self.sources,
                Currency::USD,
                query.date(),
                reported_rates,
            )
            .await;

        match resolved {
            Ok(found) => {
                let source = self.sources[found.source_index].mirror();
                log::info!(
                    "Fetched {} for {} from {} source (data date {})",
                    DATASET,
                    query,
                    source,
                    found.sourced_date
                );
                ExchangeRateResult::available(found.value, found.sourced_date, source)
            }
            Err(e) => {
                log::warn!("{}", e);
                ExchangeRateResult::unavailable()
            }
        }
    }
}
