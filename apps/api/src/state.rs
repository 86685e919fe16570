use std::sync::Arc;

use crate::funds::FundDataClient;
use crate::llm_client::GeminiClient;
use crate::store::ResultStore;

/// Shared application state injected into all route handlers via Axum
/// extractors. Resolved once at startup and read-only afterwards; there is
/// no other state shared between requests.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no Gemini API key is configured — the report pipeline
    /// then answers with its placeholder variant.
    pub llm: Option<GeminiClient>,
    pub store: Arc<ResultStore>,
    pub funds: Arc<FundDataClient>,
}
