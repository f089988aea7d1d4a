//! Shared fixtures: an in-memory HTTP client and currency API payloads

#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use virtual_businessman::config::Config;
use virtual_businessman::data::{HttpClient, HttpRequest, HttpResponse};
use virtual_businessman::error::{InsightsError, Result};
use virtual_businessman::workflow::InsightsWorkflow;

pub const PRIMARY: &str = "https://primary.test/{date}/{base}.json";
pub const FALLBACK: &str = "https://fallback.test/{date}/{base}.json";

#[derive(Debug, Clone)]
enum Route {
    Json(String),
    Status(u16),
    Down,
}

/// Serves canned bodies by exact URL; anything unrouted is a 404
#[derive(Debug, Default)]
pub struct RoutedHttpClient {
    routes: HashMap<String, Route>,
    requests: Mutex<Vec<String>>,
}

impl RoutedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(mut self, url: String, body: String) -> Self {
        self.routes.insert(url, Route::Json(body));
        self
    }

    pub fn status(mut self, url: String, status: u16) -> Self {
        self.routes.insert(url, Route::Status(status));
        self
    }

    /// Requests to `url` fail as if the connection timed out
    pub fn down(mut self, url: String) -> Self {
        self.routes.insert(url, Route::Down);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for RoutedHttpClient {
    fn execute(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>> + Send {
        self.requests.lock().unwrap().push(request.url.clone());
        let response = match self.routes.get(&request.url) {
            Some(Route::Json(body)) => Ok(HttpResponse::ok_json(body.clone())),
            Some(Route::Status(status)) => Ok(HttpResponse {
                status: *status,
                body: String::new(),
            }),
            Some(Route::Down) => Err(InsightsError::TransientFetch {
                source_name: request.url.clone(),
                message: "request timeout".to_string(),
            }),
            None => Ok(HttpResponse::not_found()),
        };
        async move { response }
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn primary(date: &str, base: &str) -> String {
    PRIMARY.replace("{date}", date).replace("{base}", base)
}

pub fn fallback(date: &str, base: &str) -> String {
    FALLBACK.replace("{date}", date).replace("{base}", base)
}

pub fn usd_body(date: &str, eur: f64, gbp: f64, jpy: f64) -> String {
    format!(
        r#"{{"date":"{}","usd":{{"eur":{},"gbp":{},"jpy":{},"chf":0.86}}}}"#,
        date, eur, gbp, jpy
    )
}

pub fn xau_body(date: &str, usd: f64) -> String {
    format!(r#"{{"date":"{}","xau":{{"usd":{},"eur":1880.1}}}}"#, date, usd)
}

pub fn test_config() -> Config {
    let vars: HashMap<&str, &str> = [
        ("PRIMARY_API_URL", PRIMARY),
        ("FALLBACK_API_URL", FALLBACK),
        ("MAX_LOOKBACK_DAYS", "3"),
    ]
    .into_iter()
    .collect();
    Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap()
}

pub fn workflow(client: RoutedHttpClient) -> (Arc<RoutedHttpClient>, InsightsWorkflow<RoutedHttpClient>) {
    let client = Arc::new(client);
    let workflow = InsightsWorkflow::from_config(Arc::clone(&client), &test_config());
    (client, workflow)
}
