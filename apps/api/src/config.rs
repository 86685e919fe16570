use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Every external credential is optional: a missing Gemini key, Firestore
/// service-account key, or fund-data endpoint degrades the matching feature
/// instead of preventing startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the Gemini generateContent endpoint. `None` puts the
    /// report pipeline in placeholder mode.
    pub gemini_api_key: Option<String>,
    /// Path to the Firestore service-account key, resolved from
    /// GOOGLE_APPLICATION_CREDENTIALS or the documented fallback filenames.
    pub firestore_credentials: Option<PathBuf>,
    /// Base URL of the fund-data provider. `None` marks fund data unavailable.
    pub fund_data_api_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

/// Filenames probed for the Firestore key when
/// GOOGLE_APPLICATION_CREDENTIALS is not set.
const SERVICE_ACCOUNT_FALLBACKS: &[&str] =
    &["serviceAccountKey.json", "firebase-service-account.json"];

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            firestore_credentials: resolve_service_account_path(),
            fund_data_api_url: optional_env("FUND_DATA_API_URL"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an environment variable, treating empty values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Finds the Firestore service-account key: the explicit env var wins, then
/// the fallback filenames in the working directory. Returns `None` when no
/// candidate exists on disk, which leaves the result store unconfigured.
fn resolve_service_account_path() -> Option<PathBuf> {
    if let Some(explicit) = optional_env("GOOGLE_APPLICATION_CREDENTIALS") {
        let path = PathBuf::from(explicit);
        if path.exists() {
            return Some(path);
        }
        tracing::warn!(
            "GOOGLE_APPLICATION_CREDENTIALS points to a missing file: {}",
            path.display()
        );
        return None;
    }

    SERVICE_ACCOUNT_FALLBACKS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}
