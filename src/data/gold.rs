//! Gold price per troy ounce in USD

use super::chain::FallbackChain;
use super::http::HttpClient;
use super::sources::{CurrencyApiSource, Mirror, RateTable};
use super::FetchStatus;
use crate::config::Config;
use crate::currency::Currency;
use crate::date_input::DateQuery;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

const DATASET: &str = "gold price";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoldPriceResult {
    price_per_ounce: Option<f64>,
    currency: Currency,
    sourced_date: Option<NaiveDate>,
    status: FetchStatus,
    source: Option<Mirror>,
}

impl GoldPriceResult {
    pub fn available(price_per_ounce: f64, sourced_date: NaiveDate, source: Mirror) -> Self {
        Self {
            price_per_ounce: Some(price_per_ounce),
            currency: Currency::USD,
            sourced_date: Some(sourced_date),
            status: FetchStatus::Ok,
            source: Some(source),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            price_per_ounce: None,
            currency: Currency::USD,
            sourced_date: None,
            status: FetchStatus::Unavailable,
            source: None,
        }
    }

    pub fn price_per_ounce(&self) -> Option<f64> {
        self.price_per_ounce
    }

    pub fn currency(&self) -> Currency {
        self.currency
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

// The XAU table quotes one ounce in every currency; a zero price is a hole in
// the data, not a price.
fn usd_per_ounce(table: &RateTable) -> Option<f64> {
    table.rate(Currency::USD).filter(|price| *price > 0.0)
}

/// Fetches the XAU table through the fallback chain
pub struct GoldPriceFetcher<C> {
    sources: Vec<CurrencyApiSource<C>>,
    chain: FallbackChain,
}

impl<C: HttpClient> GoldPriceFetcher<C> {
    pub fn new(sources: Vec<CurrencyApiSource<C>>, chain: FallbackChain) -> Self {
        Self { sources, chain }
    }

    pub fn from_config(client: Arc<C>, config: &Config) -> Self {
        Self::new(
            CurrencyApiSource::mirrors(client, config, config.gold_api_key.clone()),
            FallbackChain::new(config.max_lookback_days),
        )
    }

    /// Never fails: exhaustion yields an `unavailable` result
    pub async fn fetch(&self, query: &DateQuery) -> GoldPriceResult {
        let resolved = self
            .chain
            .resolve(
                DATASET,
                &self.sources,
                Currency::XAU,
                query.date(),
                usd_per_ounce,
            )
            .await;

        match resolved {
            Ok(found) => {
                let source = self.sources[found.source_index].mirror();
                if found.sourced_date != query.date() {
                    log::info!(
                        "Using nearest available {} date {} for {}",
                        DATASET,
                        found.sourced_date,
                        query
                    );
                }
                GoldPriceResult::available(found.value, found.sourced_date, source)
            }
            Err(e) => {
                log::warn!("{}", e);
                GoldPriceResult::unavailable()
            }
        }
    }
}
