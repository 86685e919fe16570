pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::funds::handlers as fund_handlers;
use crate::report::handlers as report_handlers;
use crate::state::AppState;
use crate::store::handlers as store_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Report API
        .route(
            "/generate_investor_report",
            post(report_handlers::handle_generate_investor_report),
        )
        // Quiz result API
        .route(
            "/save_quiz_result",
            post(store_handlers::handle_save_quiz_result),
        )
        .route(
            "/quiz_results/:user_id",
            get(store_handlers::handle_get_quiz_results),
        )
        .route(
            "/quiz_results/:user_id/latest",
            get(store_handlers::handle_get_latest_quiz_result),
        )
        // Fund data API
        .route("/api/fund/:ticker", get(fund_handlers::handle_get_fund_info))
        .route(
            "/api/fund/:ticker/nav",
            get(fund_handlers::handle_get_fund_nav),
        )
        .route(
            "/api/fund/:ticker/holdings",
            get(fund_handlers::handle_get_fund_holdings),
        )
        .with_state(state)
}
