//! Report compilation
//!
//! Pure functions: the same inputs always build the same report, and nothing
//! here can fail. Unavailable datasets pass through for the presenter.

use crate::currency::Currency;
use crate::data::{ExchangeRateResult, GoldPriceResult};
use crate::date_input::DateQuery;
use serde::Serialize;

/// Everything known about one date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    date: DateQuery,
    exchange_rates: ExchangeRateResult,
    gold_price: GoldPriceResult,
}

impl Report {
    pub fn date(&self) -> &DateQuery {
        &self.date
    }

    pub fn exchange_rates(&self) -> &ExchangeRateResult {
        &self.exchange_rates
    }

    pub fn gold_price(&self) -> &GoldPriceResult {
        &self.gold_price
    }

    /// True when every dataset was sourced from exactly the requested date
    pub fn is_exact(&self) -> bool {
        let requested = Some(self.date.date());
        self.exchange_rates.sourced_date() == requested
            && self.gold_price.sourced_date() == requested
    }
}

/// Join the two fetch results into a report
pub fn compile_report(
    date: DateQuery,
    exchange_rates: ExchangeRateResult,
    gold_price: GoldPriceResult,
) -> Report {
    Report {
        date,
        exchange_rates,
        gold_price,
    }
}

/// Percentage change from `old` to `new`; `None` when either side is missing
/// or `old` is zero
pub fn percent_change(old: Option<f64>, new: Option<f64>) -> Option<f64> {
    match (old, new) {
        (Some(old), Some(new)) if old != 0.0 => Some((new - old) / old * 100.0),
        _ => None,
    }
}

/// Two reports side by side
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    start: Report,
    end: Report,
}

impl Comparison {
    pub fn start(&self) -> &Report {
        &self.start
    }

    pub fn end(&self) -> &Report {
        &self.end
    }

    pub fn rate_change(&self, currency: Currency) -> Option<f64> {
        percent_change(
            self.start.exchange_rates.rate(currency),
            self.end.exchange_rates.rate(currency),
        )
    }

    pub fn gold_change(&self) -> Option<f64> {
        percent_change(
            self.start.gold_price.price_per_ounce(),
            self.end.gold_price.price_per_ounce(),
        )
    }
}

pub fn compile_comparison(start: Report, end: Report) -> Comparison {
    Comparison { start, end }
}
