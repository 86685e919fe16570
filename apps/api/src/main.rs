mod config;
mod errors;
mod funds;
mod llm_client;
mod models;
mod report;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::funds::FundDataClient;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::ResultStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{}={}", target, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Persona API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the Gemini client; without a key the report pipeline
    // serves its placeholder variant instead.
    let llm = match &config.gemini_api_key {
        Some(key) => {
            info!("Gemini client initialized (model: {})", llm_client::MODEL);
            Some(GeminiClient::new(key.clone()))
        }
        None => {
            warn!("GEMINI_API_KEY not set; investor reports will use placeholder content");
            None
        }
    };

    // Resolve the Firestore handle once; unconfigured is a steady state.
    let store = ResultStore::init(config.firestore_credentials.as_deref()).await;

    // Fund data availability is fixed for the life of the process.
    let funds = FundDataClient::new(config.fund_data_api_url.clone());

    let state = AppState {
        llm,
        store: Arc::new(store),
        funds: Arc::new(funds),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // quiz frontend is served from another origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
