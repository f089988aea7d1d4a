//! Market data fetching
//!
//! - **http**: transport trait and the reqwest client
//! - **sources**: currency API mirrors and rate-table parsing
//! - **chain**: primary → fallback → nearest-date strategy chain
//! - **exchange_rates** / **gold**: the two dataset fetchers

pub mod chain;
pub mod exchange_rates;
pub mod gold;
pub mod http;
pub mod sources;

pub use chain::{FallbackChain, Resolved, Step};
pub use exchange_rates::{ExchangeRateFetcher, ExchangeRateResult};
pub use gold::{GoldPriceFetcher, GoldPriceResult};
pub use http::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};

use serde::Serialize;
use std::fmt;

/// Whether a dataset made it into the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    Ok,
    Unavailable,
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStatus::Ok => write!(f, "ok"),
            FetchStatus::Unavailable => write!(f, "unavailable"),
        }
    }
}
