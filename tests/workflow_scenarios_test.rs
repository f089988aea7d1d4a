//! End-to-end workflow scenarios against an in-memory HTTP client

mod common;

use common::*;
use std::future::Future;
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Barrier;
use virtual_businessman::config::Config;
use virtual_businessman::currency::Currency;
use virtual_businessman::data::sources::Mirror;
use virtual_businessman::data::{FetchStatus, HttpClient, HttpRequest, HttpResponse};
use virtual_businessman::date_input::DateQuery;
use virtual_businessman::error::Result;
use virtual_businessman::presenter::render_report;
use virtual_businessman::workflow::{InsightsWorkflow, OutputFormat};

#[tokio::test]
async fn test_exact_date_from_primary() {
    let client = RoutedHttpClient::new()
        .json(primary("2024-01-15", "usd"), usd_body("2024-01-15", 0.91, 0.79, 148.2))
        .json(primary("2024-01-15", "xau"), xau_body("2024-01-15", 2050.25));
    let (client, workflow) = workflow(client);

    let mut out = Vec::new();
    let report = workflow
        .report_for(DateQuery::new(date("2024-01-15")), &mut out, OutputFormat::Text)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Date: 2024-01-15"));
    assert!(text.contains("EUR: 0.9100"));
    assert!(text.contains("GBP: 0.7900"));
    assert!(text.contains("JPY: 148.2000"));
    assert!(text.contains("$2050.25 USD"));
    assert!(!text.contains("N/A"));
    assert!(!text.contains("nearest available date"));

    assert_eq!(report.exchange_rates().rate(Currency::JPY), Some(148.2));
    assert_eq!(report.gold_price().source(), Some(Mirror::Primary));
    assert!(report.is_exact());
    assert_eq!(client.requests().len(), 2);
}

#[tokio::test]
async fn test_non_trading_day_uses_nearest_gold_date() {
    let client = RoutedHttpClient::new()
        .json(primary("2023-02-05", "usd"), usd_body("2023-02-05", 0.93, 0.83, 131.2))
        .json(primary("2023-02-03", "xau"), xau_body("2023-02-03", 1865.5))
        .json(fallback("2023-02-03", "xau"), xau_body("2023-02-03", 1865.5));
    let (client, workflow) = workflow(client);

    let report = workflow.gather(DateQuery::new(date("2023-02-05"))).await;

    let gold = report.gold_price();
    assert_eq!(gold.status(), FetchStatus::Ok);
    assert_eq!(gold.price_per_ounce(), Some(1865.5));
    assert_eq!(gold.sourced_date(), Some(date("2023-02-03")));
    assert_eq!(report.exchange_rates().sourced_date(), Some(date("2023-02-05")));

    let text = render_report(&report);
    assert!(text.contains("Date: 2023-02-05"));
    assert!(text.contains("$1865.50 USD (nearest available date 2023-02-03)"));

    let requests = client.requests();
    assert!(requests.contains(&fallback("2023-02-05", "xau")));
    assert!(requests.contains(&fallback("2023-02-04", "xau")));
    assert!(!requests.contains(&fallback("2023-02-03", "xau")));
}

#[tokio::test]
async fn test_everything_down_still_reaches_done() {
    let client = RoutedHttpClient::new()
        .down(primary("2024-01-15", "usd"))
        .down(fallback("2024-01-15", "usd"))
        .status(primary("2024-01-15", "xau"), 500)
        .down(fallback("2024-01-15", "xau"));
    let (client, workflow) = workflow(client);

    let mut out = Vec::new();
    let report = workflow
        .report_for(DateQuery::new(date("2024-01-15")), &mut out, OutputFormat::Text)
        .await
        .unwrap();

    assert_eq!(report.exchange_rates().status(), FetchStatus::Unavailable);
    assert_eq!(report.gold_price().status(), FetchStatus::Unavailable);

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("EUR: N/A"));
    assert!(text.contains("GBP: N/A"));
    assert!(text.contains("JPY: N/A"));
    assert!(text.contains("  N/A\n"));
    // transient failures do not trigger the nearest-date walk
    assert_eq!(client.requests().len(), 4);
}

#[tokio::test]
async fn test_fallback_mirror_after_primary_failure() {
    let client = RoutedHttpClient::new()
        .json(primary("2024-01-15", "usd"), "not json".to_string())
        .json(fallback("2024-01-15", "usd"), usd_body("2024-01-15", 0.91, 0.79, 148.2))
        .down(primary("2024-01-15", "xau"))
        .json(fallback("2024-01-15", "xau"), xau_body("2024-01-15", 2050.25));
    let (_, workflow) = workflow(client);

    let report = workflow.gather(DateQuery::new(date("2024-01-15"))).await;

    assert_eq!(report.exchange_rates().source(), Some(Mirror::Fallback));
    assert_eq!(report.exchange_rates().rate(Currency::EUR), Some(0.91));
    assert_eq!(report.gold_price().source(), Some(Mirror::Fallback));
    assert_eq!(report.gold_price().price_per_ounce(), Some(2050.25));
}

#[tokio::test]
async fn test_interactive_run_with_empty_input_uses_today() {
    let today = date("2026-10-19");
    let client = RoutedHttpClient::new()
        .json(primary("2026-10-19", "usd"), usd_body("2026-10-19", 0.86, 0.75, 151.0))
        .json(primary("2026-10-19", "xau"), xau_body("2026-10-19", 2400.0));
    let (_, workflow) = workflow(client);

    let mut input = Cursor::new("\n");
    let mut prompt = Vec::new();
    let mut out = Vec::new();
    let report = workflow
        .run(&mut input, &mut prompt, &mut out, today, OutputFormat::Text)
        .await
        .unwrap();

    assert_eq!(report.date().date(), today);
    assert_eq!(String::from_utf8(prompt).unwrap(), "Enter date (YYYY-MM-DD): ");
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Date: 2026-10-19"));
    assert!(text.contains("$2400.00 USD"));
}

#[tokio::test]
async fn test_interactive_json_output_is_only_json() {
    let client = RoutedHttpClient::new()
        .json(primary("2024-01-15", "usd"), usd_body("2024-01-15", 0.91, 0.79, 148.2))
        .json(primary("2024-01-15", "xau"), xau_body("2024-01-15", 2050.25));
    let (_, workflow) = workflow(client);

    let mut input = Cursor::new("2024-01-15\n");
    let mut prompt = Vec::new();
    let mut out = Vec::new();
    workflow
        .run(&mut input, &mut prompt, &mut out, date("2026-10-19"), OutputFormat::Json)
        .await
        .unwrap();

    assert!(String::from_utf8(prompt).unwrap().starts_with("Enter date"));
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["date"], "2024-01-15");
    assert_eq!(json["gold_price"]["price_per_ounce"], 2050.25);
}

#[tokio::test]
async fn test_json_output() {
    let client = RoutedHttpClient::new()
        .json(primary("2024-01-15", "usd"), usd_body("2024-01-15", 0.91, 0.79, 148.2));
    let (_, workflow) = workflow(client);

    let mut out = Vec::new();
    workflow
        .report_for(DateQuery::new(date("2024-01-15")), &mut out, OutputFormat::Json)
        .await
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["date"], "2024-01-15");
    assert_eq!(json["exchange_rates"]["status"], "ok");
    assert_eq!(json["exchange_rates"]["rates"]["GBP"], 0.79);
    assert_eq!(json["gold_price"]["status"], "unavailable");
    assert!(json["gold_price"]["price_per_ounce"].is_null());
}

#[tokio::test]
async fn test_comparison_of_two_dates() {
    let client = RoutedHttpClient::new()
        .json(primary("2024-01-02", "usd"), usd_body("2024-01-02", 0.90, 0.78, 142.0))
        .json(primary("2024-01-02", "xau"), xau_body("2024-01-02", 2000.0))
        .json(primary("2024-01-15", "usd"), usd_body("2024-01-15", 0.91, 0.79, 148.2))
        .json(primary("2024-01-15", "xau"), xau_body("2024-01-15", 2050.25));
    let (_, workflow) = workflow(client);

    let mut out = Vec::new();
    let comparison = workflow
        .comparison_for(
            DateQuery::new(date("2024-01-02")),
            DateQuery::new(date("2024-01-15")),
            &mut out,
            OutputFormat::Text,
        )
        .await
        .unwrap();

    approx::assert_relative_eq!(comparison.gold_change().unwrap(), 2.5125, epsilon = 1e-9);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Dates: 2024-01-02 → 2024-01-15"));
    assert!(text.contains("EUR: +1.11%"));
    assert!(text.contains("Change (%): +2.51%"));
}

/// Holds the first request of each dataset until both are in flight
struct RendezvousClient {
    barrier: Barrier,
}

impl HttpClient for RendezvousClient {
    fn execute(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>> + Send {
        async move {
            self.barrier.wait().await;
            let body = if request.url.ends_with("usd.json") {
                usd_body("2024-01-15", 0.91, 0.79, 148.2)
            } else {
                xau_body("2024-01-15", 2050.25)
            };
            Ok(HttpResponse::ok_json(body))
        }
    }
}

#[tokio::test]
async fn test_fetchers_run_concurrently() {
    let client = Arc::new(RendezvousClient {
        barrier: Barrier::new(2),
    });
    let config: Config = test_config();
    let workflow = InsightsWorkflow::from_config(client, &config);

    // a sequential implementation would park forever on the barrier
    let report = tokio::time::timeout(
        Duration::from_secs(5),
        workflow.gather(DateQuery::new(date("2024-01-15"))),
    )
    .await
    .expect("both fetches should be in flight together");

    assert_eq!(report.exchange_rates().rate(Currency::EUR), Some(0.91));
    assert_eq!(report.gold_price().price_per_ounce(), Some(2050.25));
}
