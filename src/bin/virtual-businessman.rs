//! virtual-businessman CLI - historical exchange rates and gold price for a date
//!
//! ## Example Usage
//!
//! ```bash
//! # Prompt for a date
//! virtual-businessman
//!
//! # Skip the prompt
//! virtual-businessman --date 2024-01-15
//!
//! # Compare two dates as JSON
//! virtual-businessman --date 2024-01-02 --compare 2024-01-15 --json
//! ```

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use std::io::{self, Write};
use std::process;
use std::sync::Arc;
use virtual_businessman::config::Config;
use virtual_businessman::data::ReqwestHttpClient;
use virtual_businessman::date_input::{prompt_for_date, resolve_date_input, DateQuery};
use virtual_businessman::logging::init_logging;
use virtual_businessman::workflow::{InsightsWorkflow, OutputFormat};

/// Virtual Businessman: financial insights for a date
#[derive(Parser)]
#[command(name = "virtual-businessman")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Historical exchange rates and gold price for a date", long_about = None)]
struct Cli {
    /// Date to report on; prompts when omitted
    #[arg(short, long, value_name = "DATE")]
    date: Option<String>,

    /// Second date to compare against, with percentage changes
    #[arg(short, long, value_name = "DATE")]
    compare: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn banner<W: Write>(writer: &mut W) -> io::Result<()> {
    let rule = "=".repeat(60);
    writeln!(writer)?;
    writeln!(writer, "{}", rule)?;
    writeln!(
        writer,
        "{}",
        "Virtual Businessman - Financial Insights".cyan().bold()
    )?;
    writeln!(writer, "{}", rule)
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let client = Arc::new(ReqwestHttpClient::new(config.api_timeout)?);
    let workflow = InsightsWorkflow::from_config(client, &config);
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let today = DateQuery::today().date();

    let mut out = io::stdout();
    let mut input = io::stdin().lock();
    let mut prompt: Box<dyn Write> = if format.prompts_on_stderr() {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };

    if cli.date.is_none() && format == OutputFormat::Text {
        banner(&mut out).context("failed to write banner")?;
    }

    match (cli.date.as_deref(), cli.compare.as_deref()) {
        (None, None) => {
            workflow
                .run(&mut input, &mut prompt, &mut out, today, format)
                .await
                .context("failed to run report")?;
        }
        (Some(raw), None) => {
            let start = resolve_date_input(raw, workflow.date_format(), today);
            workflow
                .report_for(start, &mut out, format)
                .await
                .context("failed to write report")?;
        }
        (start, Some(compare)) => {
            let start = match start {
                Some(raw) => resolve_date_input(raw, workflow.date_format(), today),
                None => prompt_for_date("date", &mut input, &mut prompt, workflow.date_format(), today)
                    .context("failed to read date")?,
            };
            let end = resolve_date_input(compare, workflow.date_format(), today);
            workflow
                .comparison_for(start, end, &mut out, format)
                .await
                .context("failed to write comparison")?;
        }
    }

    if format == OutputFormat::Text {
        writeln!(out, "\nThank you for using Virtual Businessman!")?;
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let (config, config_errors) = Config::from_env_lenient();
    if let Err(e) = init_logging(&config) {
        eprintln!("{} {}", "Warning:".yellow(), e);
    }
    for e in &config_errors {
        log::warn!("{}; using the default for that setting", e);
    }

    if let Err(e) = run(cli, config).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
