//! Free currency API (no API key required)
//!
//! Daily snapshots are addressed by date in the URL path; a day the API never
//! published answers 404.

use super::{RateTable, RateTableSource};
use crate::config::Config;
use crate::currency::Currency;
use crate::data::http::{HttpClient, HttpRequest};
use crate::date_input::KEY_FORMAT;
use crate::error::{InsightsError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Which hosting of the API a source points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mirror {
    Primary,
    Fallback,
}

impl Mirror {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mirror::Primary => "primary",
            Mirror::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Mirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mirror of the currency API
pub struct CurrencyApiSource<C> {
    mirror: Mirror,
    url_template: String,
    api_key: Option<String>,
    client: Arc<C>,
}

impl<C: HttpClient> CurrencyApiSource<C> {
    /// Create a source from a URL template with `{date}` and `{base}` placeholders
    pub fn new(
        mirror: Mirror,
        url_template: impl Into<String>,
        api_key: Option<String>,
        client: Arc<C>,
    ) -> Self {
        Self {
            mirror,
            url_template: url_template.into(),
            api_key,
            client,
        }
    }

    /// Primary then fallback mirror, as configured
    pub fn mirrors(client: Arc<C>, config: &Config, api_key: Option<String>) -> Vec<Self> {
        vec![
            Self::new(
                Mirror::Primary,
                config.primary_url.clone(),
                api_key.clone(),
                Arc::clone(&client),
            ),
            Self::new(Mirror::Fallback, config.fallback_url.clone(), api_key, client),
        ]
    }

    pub fn mirror(&self) -> Mirror {
        self.mirror
    }

    /// Build the request URL for one table and day
    pub fn endpoint(&self, base: Currency, date: NaiveDate) -> String {
        self.url_template
            .replace("{date}", &date.format(KEY_FORMAT).to_string())
            .replace("{base}", base.api_key())
    }

    async fn fetch(&self, base: Currency, date: NaiveDate) -> Result<RateTable> {
        let url = self.endpoint(base, date);
        log::debug!("Requesting {} table for {} from {}", base, date, url);

        let request = HttpRequest::get(url).with_bearer_token(self.api_key.as_deref());
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| match e {
                InsightsError::TransientFetch { message, .. } => InsightsError::TransientFetch {
                    source_name: self.mirror.to_string(),
                    message,
                },
                other => other,
            })?;

        if response.status == 404 {
            return Err(InsightsError::NoDataForDate {
                source_name: self.mirror.to_string(),
                date,
            });
        }

        if !response.is_success() {
            return Err(InsightsError::TransientFetch {
                source_name: self.mirror.to_string(),
                message: format!("upstream returned status {}", response.status),
            });
        }

        RateTable::parse(&response.body, base, date)
    }
}

impl<C: HttpClient> RateTableSource for CurrencyApiSource<C> {
    fn fetch_table(
        &self,
        base: Currency,
        date: NaiveDate,
    ) -> impl Future<Output = Result<RateTable>> + Send {
        self.fetch(base, date)
    }

    fn name(&self) -> &str {
        self.mirror.as_str()
    }
}
