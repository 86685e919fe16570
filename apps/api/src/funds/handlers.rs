//! Axum route handlers for the fund data API.
//!
//! Every endpoint answers HTTP 200; failures show up as empty sequences or
//! an `error` field in the body, matching what quiz clients already expect.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::funds::{FundSnapshot, Holding, NavPoint, MAX_NAV_DAYS};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NavQuery {
    #[serde(default = "default_days")]
    pub days: i64,
}

fn default_days() -> i64 {
    30
}

#[derive(Debug, Deserialize)]
pub struct HoldingsQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundNavResponse {
    pub ticker: String,
    pub nav_data: Vec<NavPoint>,
}

#[derive(Debug, Serialize)]
pub struct FundHoldingsResponse {
    pub ticker: String,
    pub holdings: Vec<Holding>,
}

/// GET /api/fund/:ticker
pub async fn handle_get_fund_info(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Json<FundSnapshot> {
    let ticker = ticker.to_uppercase();
    Json(state.funds.get_fund_info(&ticker).await)
}

/// GET /api/fund/:ticker/nav?days=N
///
/// `days` is clamped to 90 to bound provider load.
pub async fn handle_get_fund_nav(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    Query(query): Query<NavQuery>,
) -> Json<FundNavResponse> {
    let ticker = ticker.to_uppercase();
    let days = query.days.clamp(1, MAX_NAV_DAYS);
    let nav_data = state.funds.get_nav(&ticker, days).await;
    Json(FundNavResponse { ticker, nav_data })
}

/// GET /api/fund/:ticker/holdings?limit=N
pub async fn handle_get_fund_holdings(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    Query(query): Query<HoldingsQuery>,
) -> Json<FundHoldingsResponse> {
    let ticker = ticker.to_uppercase();
    let holdings = state.funds.get_holdings(&ticker, query.limit).await;
    Json(FundHoldingsResponse { ticker, holdings })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_query_defaults_to_thirty_days() {
        let query: NavQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.days, 30);
    }

    #[test]
    fn test_days_clamp_matches_endpoint_contract() {
        // days=200 is treated identically to days=90 at the boundary
        assert_eq!(200i64.clamp(1, MAX_NAV_DAYS), 90);
        assert_eq!(90i64.clamp(1, MAX_NAV_DAYS), 90);
        assert_eq!(7i64.clamp(1, MAX_NAV_DAYS), 7);
    }

    #[test]
    fn test_holdings_query_defaults_to_ten() {
        let query: HoldingsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, 10);
    }
}
