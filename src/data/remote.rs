//! Remote listings feed: a JSON endpoint serving daily market records.

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{DataOrigin, DataPoint};

/// Environment variable naming the feed endpoint (also read from `.env`).
pub const ENDPOINT_ENV: &str = "LISTING_DASH_URL";

const USER_AGENT: &str = concat!("listing-dash/", env!("CARGO_PKG_VERSION"));
const FETCH_TIMEOUT_SECS: u64 = 30;

/// A failed load attempt, typed so the caller decides the fallback.
///
/// Neither variant is surfaced to the user as a visible failure; the load
/// boundary logs it and substitutes the synthetic dataset.
#[derive(Debug, Clone)]
pub enum LoadError {
    /// Transport failure or non-success HTTP status (includes "no endpoint
    /// configured", which is a fetch failure from the caller's perspective).
    Fetch(String),
    /// The response arrived but is empty or not the expected record array.
    MalformedPayload(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Fetch(msg) => write!(f, "fetch failed: {msg}"),
            LoadError::MalformedPayload(msg) => write!(f, "malformed payload: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Wire shape of one record as served by the feed.
#[derive(Debug, Deserialize)]
struct ListingRecord {
    date: String,
    active_listings: i64,
    avg_price_per_sqft: f64,
    data_source: String,
}

/// Blocking client for the listings feed.
pub struct ListingsClient {
    client: Client,
    endpoint: Option<String>,
}

impl ListingsClient {
    /// Build a client. `endpoint = None` falls back to `LISTING_DASH_URL`
    /// from the environment (or `.env`); a still-missing endpoint is reported
    /// as a `Fetch` error at call time, not here, so the caller's fallback
    /// path stays uniform.
    pub fn new(endpoint: Option<String>) -> Self {
        dotenvy::dotenv().ok();
        let endpoint = endpoint.or_else(|| std::env::var(ENDPOINT_ENV).ok());
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, endpoint }
    }

    /// A client with no endpoint at all. Every fetch fails with a `Fetch`
    /// error, which exercises the synthetic-fallback path without network
    /// access.
    pub fn offline() -> Self {
        Self {
            client: Client::new(),
            endpoint: None,
        }
    }

    /// Fetch and validate the full dataset.
    pub fn fetch_dataset(&self) -> Result<Vec<DataPoint>, LoadError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or_else(|| LoadError::Fetch(format!("no endpoint configured ({ENDPOINT_ENV})")))?;

        let resp = self
            .client
            .get(endpoint)
            .send()
            .map_err(|e| LoadError::Fetch(format!("request error: {e}")))?;

        if !resp.status().is_success() {
            return Err(LoadError::Fetch(format!("status {}", resp.status())));
        }

        let records: Vec<ListingRecord> = resp
            .json()
            .map_err(|e| LoadError::MalformedPayload(format!("not a record array: {e}")))?;

        dataset_from_records(records)
    }
}

/// Validate wire records into the dataset invariant: non-empty, ascending by
/// date, no duplicate dates.
fn dataset_from_records(records: Vec<ListingRecord>) -> Result<Vec<DataPoint>, LoadError> {
    if records.is_empty() {
        return Err(LoadError::MalformedPayload("empty record array".to_string()));
    }

    let mut points = Vec::with_capacity(records.len());
    for rec in &records {
        let date = NaiveDate::parse_from_str(&rec.date, "%Y-%m-%d")
            .map_err(|e| LoadError::MalformedPayload(format!("bad date '{}': {e}", rec.date)))?;

        if rec.active_listings < 0 {
            return Err(LoadError::MalformedPayload(format!(
                "negative listing count {} on {}",
                rec.active_listings, rec.date
            )));
        }
        if !(rec.avg_price_per_sqft.is_finite() && rec.avg_price_per_sqft >= 0.0) {
            return Err(LoadError::MalformedPayload(format!(
                "invalid price {} on {}",
                rec.avg_price_per_sqft, rec.date
            )));
        }

        let origin = parse_origin(&rec.data_source)
            .ok_or_else(|| LoadError::MalformedPayload(format!("unknown data_source '{}'", rec.data_source)))?;

        points.push(DataPoint {
            date,
            active_count: rec.active_listings as u32,
            price_metric: rec.avg_price_per_sqft,
            origin,
        });
    }

    // The wire contract promises shape, not ordering.
    points.sort_by_key(|p| p.date);
    for w in points.windows(2) {
        if w[0].date == w[1].date {
            return Err(LoadError::MalformedPayload(format!(
                "duplicate date {}",
                w[0].date
            )));
        }
    }

    Ok(points)
}

fn parse_origin(raw: &str) -> Option<DataOrigin> {
    match raw {
        "historical" => Some(DataOrigin::Historical),
        "scraped" => Some(DataOrigin::Scraped),
        "synthetic" => Some(DataOrigin::Synthetic),
        _ => None,
    }
}
