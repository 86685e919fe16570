//! Fund data adapter — proxies NAV and holdings lookups to the market-data
//! provider.
//!
//! Availability is fixed once at startup: the client is live only when a
//! provider base URL was configured. Every call contains its own failures —
//! a provider or transport error is logged and shaped into an empty result,
//! never propagated to the HTTP caller.

pub mod handlers;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// Endpoint-boundary cap on requested NAV history, to limit provider load.
pub const MAX_NAV_DAYS: i64 = 90;

const DEFAULT_NAV_DAYS: i64 = 30;
const DEFAULT_HOLDINGS_LIMIT: usize = 10;

/// One point of a fund's NAV history, passed through from the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavPoint {
    pub nav: Option<f64>,
    pub total_return: Option<f64>,
    pub date: Option<String>,
}

/// One fund holding. Provider rows can be sparse; missing columns
/// deserialize as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub security_name: Option<String>,
    #[serde(default)]
    pub weighting: Option<f64>,
    #[serde(default)]
    pub market_value: Option<f64>,
}

/// Composite fund view derived per request; never cached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundSnapshot {
    pub ticker: String,
    pub nav: Option<f64>,
    pub total_return: Option<f64>,
    pub last_updated: Option<String>,
    pub historical_nav: Vec<NavPoint>,
    pub holdings: Vec<Holding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Client for the fund-data provider. `base_url` is `None` when fund data
/// was not configured, which turns every lookup into an empty result.
#[derive(Clone)]
pub struct FundDataClient {
    http: reqwest::Client,
    base_url: Option<String>,
}

impl FundDataClient {
    pub fn new(base_url: Option<String>) -> Self {
        match &base_url {
            Some(url) => info!(%url, "fund data provider configured"),
            None => warn!(
                "FUND_DATA_API_URL not set; fund data endpoints will return empty results"
            ),
        }

        Self {
            http: reqwest::Client::new(),
            base_url: base_url.map(|u| u.trim_end_matches('/').to_string()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.base_url.is_some()
    }

    /// NAV history over `[today - days, today]`. Empty when unavailable or
    /// on any provider error.
    pub async fn get_nav(&self, ticker: &str, days: i64) -> Vec<NavPoint> {
        let Some(base) = &self.base_url else {
            warn!(ticker, "fund data unavailable; cannot fetch NAV");
            return Vec::new();
        };

        let end = Utc::now().date_naive();
        let start = end - Duration::days(days);
        let url = format!("{base}/funds/{ticker}/nav");

        info!(ticker, %start, %end, "fetching NAV history");
        match self
            .http
            .get(&url)
            .query(&[
                ("start_date", start.to_string()),
                ("end_date", end.to_string()),
            ])
            .send()
            .await
        {
            Ok(response) => match response.error_for_status() {
                Ok(response) => match response.json::<Vec<NavPoint>>().await {
                    Ok(points) => {
                        info!(ticker, points = points.len(), "fetched NAV history");
                        points
                    }
                    Err(e) => {
                        warn!(ticker, "failed to decode NAV response: {e}");
                        Vec::new()
                    }
                },
                Err(e) => {
                    warn!(ticker, "NAV request rejected by provider: {e}");
                    Vec::new()
                }
            },
            Err(e) => {
                warn!(ticker, "NAV request failed: {e}");
                Vec::new()
            }
        }
    }

    /// Top holdings, truncated to `limit`. Tolerates both a plain list and a
    /// table-shaped (columns/rows) provider response. Empty on any error.
    pub async fn get_holdings(&self, ticker: &str, limit: usize) -> Vec<Holding> {
        let Some(base) = &self.base_url else {
            warn!(ticker, "fund data unavailable; cannot fetch holdings");
            return Vec::new();
        };

        let url = format!("{base}/funds/{ticker}/holdings");
        match self.http.get(&url).send().await {
            Ok(response) => match response.error_for_status() {
                Ok(response) => match response.json::<Value>().await {
                    Ok(body) => shape_holdings(&body, limit),
                    Err(e) => {
                        warn!(ticker, "failed to decode holdings response: {e}");
                        Vec::new()
                    }
                },
                Err(e) => {
                    warn!(ticker, "holdings request rejected by provider: {e}");
                    Vec::new()
                }
            },
            Err(e) => {
                warn!(ticker, "holdings request failed: {e}");
                Vec::new()
            }
        }
    }

    /// Composite fund view: 30-day NAV history, top 10 holdings, and the
    /// latest point's nav/return/date. When fund data is unavailable the
    /// snapshot carries an `error` message instead of failing the caller.
    pub async fn get_fund_info(&self, ticker: &str) -> FundSnapshot {
        if !self.is_available() {
            return FundSnapshot {
                ticker: ticker.to_string(),
                nav: None,
                total_return: None,
                last_updated: None,
                historical_nav: Vec::new(),
                holdings: Vec::new(),
                error: Some("fund data provider not configured".to_string()),
            };
        }

        let historical_nav = self.get_nav(ticker, DEFAULT_NAV_DAYS).await;
        let holdings = self.get_holdings(ticker, DEFAULT_HOLDINGS_LIMIT).await;
        let latest = historical_nav.last();

        FundSnapshot {
            ticker: ticker.to_string(),
            nav: latest.and_then(|p| p.nav),
            total_return: latest.and_then(|p| p.total_return),
            last_updated: latest.and_then(|p| p.date.clone()),
            historical_nav,
            holdings,
            error: None,
        }
    }
}

/// Shapes a provider holdings payload into rows.
///
/// A list response is taken as-is; a table response (`columns` + `rows`,
/// the DataFrame-style export some providers use) is zipped into objects
/// first. Anything else yields no rows.
fn shape_holdings(body: &Value, limit: usize) -> Vec<Holding> {
    if let Some(rows) = body.as_array() {
        return rows
            .iter()
            .take(limit)
            .filter_map(|row| serde_json::from_value(row.clone()).ok())
            .collect();
    }

    let (Some(columns), Some(rows)) = (
        body.get("columns").and_then(Value::as_array),
        body.get("rows").and_then(Value::as_array),
    ) else {
        return Vec::new();
    };

    rows.iter()
        .take(limit)
        .filter_map(|row| {
            let cells = row.as_array()?;
            let object: serde_json::Map<String, Value> = columns
                .iter()
                .zip(cells)
                .filter_map(|(col, cell)| Some((col.as_str()?.to_string(), cell.clone())))
                .collect();
            serde_json::from_value(Value::Object(object)).ok()
        })
        .collect()
}
