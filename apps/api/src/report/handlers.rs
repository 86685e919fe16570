//! Axum route handlers for the report API.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::personality::{AxisScores, PersonalityProfile};
use crate::report::pipeline::generate_report;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InvestorReportRequest {
    pub personality: PersonalityProfile,
    pub scores: AxisScores,
    pub role: String,
}

/// POST /generate_investor_report
///
/// Returns the model-generated report, or a shaped placeholder when no API
/// key is configured. A failed model call maps to `AppError::Llm` and
/// surfaces as a 500 — the one endpoint that reports failure by status code.
pub async fn handle_generate_investor_report(
    State(state): State<AppState>,
    Json(request): Json<InvestorReportRequest>,
) -> Result<Json<Value>, AppError> {
    let report = generate_report(
        state.llm.as_ref(),
        &request.personality,
        &request.scores,
        &request.role,
    )
    .await
    .map_err(|e| AppError::Llm(format!("investor report generation failed: {e}")))?;

    Ok(Json(report))
}
