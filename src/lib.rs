//! # Virtual Businessman
//!
//! Historical exchange rates (EUR, GBP, JPY per USD) and the gold price per
//! ounce for a chosen date, fetched concurrently and printed as one report.
//!
//! Each dataset goes through the same strategy chain: primary mirror, fallback
//! mirror, then the nearest earlier date with data. A dataset that cannot be
//! found shows as `N/A`; it never aborts the run.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use virtual_businessman::prelude::*;
//!
//! # async fn demo() -> virtual_businessman::error::Result<()> {
//! let config = Config::from_env()?;
//! let client = Arc::new(ReqwestHttpClient::new(config.api_timeout)?);
//! let workflow = InsightsWorkflow::from_config(client, &config);
//!
//! let date = DateQuery::new(chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
//! let report = workflow.gather(date).await;
//! print!("{}", render_report(&report));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod currency;
pub mod data;
pub mod date_input;
pub mod error;
pub mod logging;
pub mod presenter;
pub mod report;
pub mod workflow;

pub mod prelude {
    //! Commonly used types and functions
    pub use crate::config::{Config, DateFormat, LogLevel};
    pub use crate::currency::Currency;
    pub use crate::data::{
        ExchangeRateFetcher, ExchangeRateResult, FetchStatus, GoldPriceFetcher, GoldPriceResult,
        HttpClient, ReqwestHttpClient,
    };
    pub use crate::date_input::{prompt_for_date, resolve_date_input, DateQuery};
    pub use crate::error::{InsightsError, Result};
    pub use crate::presenter::{render_comparison, render_report};
    pub use crate::report::{compile_comparison, compile_report, Comparison, Report};
    pub use crate::workflow::{InsightsWorkflow, OutputFormat, WorkflowStage};
}
