//! Date prompt and validation
//!
//! Input never fails: anything that does not parse becomes today's date and a
//! warning is logged.

use crate::config::DateFormat;
use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, BufRead, Write};

/// Request key format used by every data source
pub const KEY_FORMAT: &str = "%Y-%m-%d";

/// A concrete calendar date to report on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateQuery {
    date: NaiveDate,
}

impl DateQuery {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Today's date in the local timezone
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// `YYYY-MM-DD` form used in request paths
    pub fn key(&self) -> String {
        self.date.format(KEY_FORMAT).to_string()
    }

    /// The day before, used by the nearest-date walk
    pub fn previous_day(&self) -> Option<Self> {
        self.date.checked_sub_signed(Duration::days(1)).map(Self::new)
    }
}

impl From<NaiveDate> for DateQuery {
    fn from(date: NaiveDate) -> Self {
        Self::new(date)
    }
}

impl fmt::Display for DateQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Resolve raw user input to a date, substituting `today` on failure.
pub fn resolve_date_input(raw: &str, format: &DateFormat, today: NaiveDate) -> DateQuery {
    let trimmed = raw.trim();
    match format.parse_date(trimmed) {
        Ok(date) => DateQuery::new(date),
        Err(e) => {
            let fallback = DateQuery::new(today);
            log::warn!("{}; using today's date {}", e, fallback);
            fallback
        }
    }
}

/// Prompt once on `writer`, read one line from `reader` and resolve it.
///
/// End of input is treated like an empty answer.
pub fn prompt_for_date<R, W>(
    label: &str,
    reader: &mut R,
    writer: &mut W,
    format: &DateFormat,
    today: NaiveDate,
) -> io::Result<DateQuery>
where
    R: BufRead,
    W: Write,
{
    write!(writer, "Enter {} ({}): ", label, format)?;
    writer.flush()?;

    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(resolve_date_input(&line, format, today))
}
