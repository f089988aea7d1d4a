//! End-to-end run: prompt, fetch both datasets concurrently, compile, display
//!
//! ```text
//! AwaitingDate → Fetching (exchange rates ∥ gold price) → Compiling → Displaying → Done
//! ```
//!
//! Every path reaches `Done`. The only error a run can return is a failure to
//! read the prompt or write the report.

use crate::config::{Config, DateFormat};
use crate::data::{ExchangeRateFetcher, GoldPriceFetcher, HttpClient};
use crate::date_input::{prompt_for_date, DateQuery};
use crate::error::Result;
use crate::presenter;
use crate::report::{compile_comparison, compile_report, Comparison, Report};
use chrono::NaiveDate;
use std::fmt;
use std::io::{BufRead, Write};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStage {
    AwaitingDate,
    Fetching,
    Compiling,
    Displaying,
    Done,
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowStage::AwaitingDate => "awaiting date",
            WorkflowStage::Fetching => "fetching",
            WorkflowStage::Compiling => "compiling",
            WorkflowStage::Displaying => "displaying",
            WorkflowStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// How the finished report is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// JSON output must be the only thing on stdout
    pub fn prompts_on_stderr(self) -> bool {
        self == OutputFormat::Json
    }
}

fn enter(stage: WorkflowStage) {
    log::debug!("Workflow stage: {}", stage);
}

/// Owns one fetcher per dataset; cheap to build per run
pub struct InsightsWorkflow<C> {
    exchange_rates: ExchangeRateFetcher<C>,
    gold_price: GoldPriceFetcher<C>,
    date_format: DateFormat,
}

impl<C: HttpClient> InsightsWorkflow<C> {
    pub fn new(
        exchange_rates: ExchangeRateFetcher<C>,
        gold_price: GoldPriceFetcher<C>,
        date_format: DateFormat,
    ) -> Self {
        Self {
            exchange_rates,
            gold_price,
            date_format,
        }
    }

    pub fn from_config(client: Arc<C>, config: &Config) -> Self {
        Self::new(
            ExchangeRateFetcher::from_config(Arc::clone(&client), config),
            GoldPriceFetcher::from_config(client, config),
            config.date_format.clone(),
        )
    }

    pub fn date_format(&self) -> &DateFormat {
        &self.date_format
    }

    /// Fetch both datasets concurrently and compile once both are in
    pub async fn gather(&self, query: DateQuery) -> Report {
        enter(WorkflowStage::Fetching);
        let (rates, gold) = tokio::join!(
            self.exchange_rates.fetch(&query),
            self.gold_price.fetch(&query)
        );

        enter(WorkflowStage::Compiling);
        compile_report(query, rates, gold)
    }

    /// Gather two dates at once
    pub async fn compare(&self, start: DateQuery, end: DateQuery) -> Comparison {
        let (start, end) = tokio::join!(self.gather(start), self.gather(end));
        compile_comparison(start, end)
    }

    /// Prompt on `prompt`, read the date from `reader`, then gather and
    /// display on `writer`.
    ///
    /// Keeping the prompt apart from the report lets JSON output stay clean.
    pub async fn run<R, P, W>(
        &self,
        reader: &mut R,
        prompt: &mut P,
        writer: &mut W,
        today: NaiveDate,
        format: OutputFormat,
    ) -> Result<Report>
    where
        R: BufRead,
        P: Write,
        W: Write,
    {
        enter(WorkflowStage::AwaitingDate);
        let query = prompt_for_date("date", reader, prompt, &self.date_format, today)?;
        self.report_for(query, writer, format).await
    }

    /// Gather and display a date that is already known
    pub async fn report_for<W: Write>(
        &self,
        query: DateQuery,
        writer: &mut W,
        format: OutputFormat,
    ) -> Result<Report> {
        let report = self.gather(query).await;

        enter(WorkflowStage::Displaying);
        match format {
            OutputFormat::Text => presenter::display(&report, writer)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *writer, &report)?;
                writeln!(writer)?;
            }
        }

        enter(WorkflowStage::Done);
        Ok(report)
    }

    /// Gather and display two dates with changes between them
    pub async fn comparison_for<W: Write>(
        &self,
        start: DateQuery,
        end: DateQuery,
        writer: &mut W,
        format: OutputFormat,
    ) -> Result<Comparison> {
        let comparison = self.compare(start, end).await;

        enter(WorkflowStage::Displaying);
        match format {
            OutputFormat::Text => presenter::display_comparison(&comparison, writer)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *writer, &comparison)?;
                writeln!(writer)?;
            }
        }

        enter(WorkflowStage::Done);
        Ok(comparison)
    }
}
