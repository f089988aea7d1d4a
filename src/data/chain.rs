//! Primary → fallback → nearest-date strategy chain
//!
//! The chain is a flat, ordered list of `(source, date)` steps: every source on
//! the requested date, then every source on each earlier day up to the lookback
//! bound. Steps run in order until one yields a value.
//!
//! Walking back a day only makes sense when some source answered "no data" for
//! the current day. If every failure on a day was transient (network, timeout,
//! bad payload) the sources are down, not missing the date, and the chain ends.

use super::sources::{RateTable, RateTableSource};
use crate::currency::Currency;
use crate::date_input::DateQuery;
use crate::error::{InsightsError, Result};
use chrono::NaiveDate;
use std::iter;

/// One strategy in the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub source_index: usize,
    pub date: NaiveDate,
    /// Days before the requested date
    pub lookback: u32,
}

/// A value found by the chain and where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub sourced_date: NaiveDate,
    pub source_index: usize,
    pub attempts: usize,
}

/// Upper bound on how many days the chain may walk back
pub const MAX_LOOKBACK_LIMIT: u32 = 31;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackChain {
    max_lookback_days: u32,
}

impl FallbackChain {
    /// `max_lookback_days` is clamped to [`MAX_LOOKBACK_LIMIT`]
    pub fn new(max_lookback_days: u32) -> Self {
        Self {
            max_lookback_days: max_lookback_days.min(MAX_LOOKBACK_LIMIT),
        }
    }

    /// The ordered steps for `source_count` sources, produced lazily
    pub fn plan(&self, requested: NaiveDate, source_count: usize) -> impl Iterator<Item = Step> {
        let days = iter::successors(Some((0u32, DateQuery::new(requested))), |(lookback, day)| {
            day.previous_day().map(|previous| (lookback + 1, previous))
        })
        .take(self.max_lookback_days as usize + 1);

        days.flat_map(move |(lookback, day)| {
            (0..source_count).map(move |source_index| Step {
                source_index,
                date: day.date(),
                lookback,
            })
        })
    }

    /// Run the chain, extracting a value from each table until one has it.
    ///
    /// `extract` returning `None` means the table lacks the wanted values and
    /// counts as "no data" for that step.
    pub async fn resolve<S, T, F>(
        &self,
        dataset: &str,
        sources: &[S],
        base: Currency,
        requested: NaiveDate,
        extract: F,
    ) -> Result<Resolved<T>>
    where
        S: RateTableSource,
        F: Fn(&RateTable) -> Option<T>,
    {
        let mut attempts = 0;
        let mut current_date: Option<NaiveDate> = None;
        let mut saw_no_data = false;

        for step in self.plan(requested, sources.len()) {
            if current_date != Some(step.date) {
                if current_date.is_some() && !saw_no_data {
                    log::warn!(
                        "All sources failed transiently for {}; not searching earlier dates",
                        dataset
                    );
                    break;
                }
                current_date = Some(step.date);
                saw_no_data = false;
                if step.lookback > 0 {
                    log::info!(
                        "No {} for {}, trying nearest earlier date {}",
                        dataset,
                        requested,
                        step.date
                    );
                }
            }

            let source = &sources[step.source_index];
            attempts += 1;

            match source.fetch_table(base, step.date).await {
                Ok(table) => match extract(&table) {
                    Some(value) => {
                        log::debug!(
                            "Resolved {} from {} source for {} after {} attempt(s)",
                            dataset,
                            source.name(),
                            table.date,
                            attempts
                        );
                        return Ok(Resolved {
                            value,
                            sourced_date: table.date,
                            source_index: step.source_index,
                            attempts,
                        });
                    }
                    None => {
                        saw_no_data = true;
                        log::debug!(
                            "{} source has a table for {} but no {}",
                            source.name(),
                            step.date,
                            dataset
                        );
                    }
                },
                Err(e) if e.is_no_data() => {
                    saw_no_data = true;
                    log::debug!("{}", e);
                }
                Err(e) if e.is_transient() => {
                    log::warn!("Could not fetch {}: {}", dataset, e);
                }
                Err(e) => {
                    log::error!("Unexpected error fetching {}: {}", dataset, e);
                }
            }
        }

        Err(InsightsError::DataUnavailable {
            dataset: dataset.to_string(),
            requested,
            attempts,
        })
    }
}
