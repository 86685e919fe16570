//! Axum route handlers for the quiz result API.
//!
//! Storage failures never fail the request: the save endpoint answers
//! HTTP 200 with `{success: false, error}` and the lookups degrade to
//! empty/null bodies.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::models::personality::{AxisScores, PersonalityProfile};
use crate::state::AppState;
use crate::store::QuizResultRecord;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveQuizResultRequest {
    pub user_id: String,
    pub role: String,
    /// Accepted for wire compatibility, never persisted.
    pub quiz_answers: Vec<Value>,
    /// Accepted for wire compatibility, never persisted.
    pub personality_scores: AxisScores,
    pub personality_type: PersonalityProfile,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveQuizResultResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuizResultsResponse {
    pub results: Vec<QuizResultRecord>,
}

#[derive(Debug, Serialize)]
pub struct LatestQuizResultResponse {
    pub result: Option<QuizResultRecord>,
}

/// POST /save_quiz_result
///
/// Only the profile and ownership metadata are persisted; answers and axis
/// scores stop here.
pub async fn handle_save_quiz_result(
    State(state): State<AppState>,
    Json(request): Json<SaveQuizResultRequest>,
) -> Json<SaveQuizResultResponse> {
    debug!(
        user_id = %request.user_id,
        answers = request.quiz_answers.len(),
        scores = ?request.personality_scores,
        "quiz payload received; persisting profile code only"
    );

    let document_id = state
        .store
        .save(&request.user_id, &request.role, &request.personality_type)
        .await;

    let response = match document_id {
        Some(id) => SaveQuizResultResponse {
            success: true,
            document_id: Some(id),
            error: None,
        },
        None => SaveQuizResultResponse {
            success: false,
            document_id: None,
            error: Some("failed to save quiz result".to_string()),
        },
    };

    Json(response)
}

/// GET /quiz_results/:user_id
pub async fn handle_get_quiz_results(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<QuizResultsResponse> {
    let results = state.store.list_by_user(&user_id).await;
    Json(QuizResultsResponse { results })
}

/// GET /quiz_results/:user_id/latest
pub async fn handle_get_latest_quiz_result(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<LatestQuizResultResponse> {
    let result = state.store.latest_for_user(&user_id).await;
    Json(LatestQuizResultResponse { result })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_request_deserializes_full_payload() {
        let json = r#"{
            "userId": "user-1",
            "role": "investor",
            "quizAnswers": [{"questionId": 1, "answer": 2}],
            "personalityScores": {
                "shortTermVsLongTerm": 7.0,
                "highRiskVsLowRisk": -3.0,
                "clarityVsComplexity": 0.0,
                "consistentVsLumpSum": 15.0
            },
            "personalityType": {
                "code": "LRCG",
                "name": "The Strategist",
                "description": "Patient and methodical."
            }
        }"#;

        let request: SaveQuizResultRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.user_id, "user-1");
        assert_eq!(request.quiz_answers.len(), 1);
        assert_eq!(request.personality_type.code, "LRCG");
    }

    #[test]
    fn test_save_response_omits_absent_fields() {
        let ok = SaveQuizResultResponse {
            success: true,
            document_id: Some("abc".to_string()),
            error: None,
        };
        let value = serde_json::to_value(&ok).unwrap();
        assert_eq!(value["documentId"], "abc");
        assert!(value.get("error").is_none());

        let failed = SaveQuizResultResponse {
            success: false,
            document_id: None,
            error: Some("failed to save quiz result".to_string()),
        };
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("documentId").is_none());
    }
}
