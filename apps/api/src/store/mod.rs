//! Result store adapter — persists minimal quiz result records to Cloud
//! Firestore over its REST API.
//!
//! The store is resolved once at startup into an immutable handle. An
//! unconfigured or unreachable store is a steady, non-exceptional state:
//! every operation degrades to a no-op or empty result instead of failing
//! the caller.

pub mod handlers;

use std::cmp::Reverse;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use gcp_auth::{AuthenticationManager, CustomServiceAccount};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::models::personality::PersonalityProfile;

const FIRESTORE_API_BASE: &str = "https://firestore.googleapis.com/v1";
const FIRESTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";
const COLLECTION: &str = "quizResults";

/// One persisted quiz result. Deliberately minimal: the profile and
/// ownership metadata only — raw answers and axis scores are never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResultRecord {
    pub id: String,
    pub user_id: String,
    pub role: String,
    pub personality_type: PersonalityProfile,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Firestore-backed store handle. `inner` is `None` when no service-account
/// key was found at startup.
pub struct ResultStore {
    inner: Option<Firestore>,
}

struct Firestore {
    http: reqwest::Client,
    auth: AuthenticationManager,
    project_id: String,
}

impl ResultStore {
    /// Resolves the store once from the service-account key path. Failure to
    /// connect logs a warning and yields an unconfigured store.
    pub async fn init(credentials: Option<&Path>) -> Self {
        let Some(path) = credentials else {
            warn!(
                "Firestore service account key not found; quiz results will not be persisted. \
                 Set GOOGLE_APPLICATION_CREDENTIALS or place serviceAccountKey.json next to the binary."
            );
            return Self { inner: None };
        };

        match Firestore::connect(path).await {
            Ok(fs) => {
                info!(project_id = %fs.project_id, "Firestore client initialized");
                Self { inner: Some(fs) }
            }
            Err(e) => {
                warn!("Firestore initialization failed ({e:#}); continuing without persistence");
                Self { inner: None }
            }
        }
    }

    /// Whether a Firestore backend was resolved at startup.
    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }

    /// Writes one record and returns the server-assigned document id.
    /// `None` on any failure; never raises to the caller.
    pub async fn save(
        &self,
        user_id: &str,
        role: &str,
        personality_type: &PersonalityProfile,
    ) -> Option<String> {
        let Some(fs) = &self.inner else {
            warn!("Firestore not configured; quiz result not saved");
            return None;
        };

        match fs.create_document(user_id, role, personality_type).await {
            Ok(id) => {
                info!(document_id = %id, "quiz result saved");
                Some(id)
            }
            Err(e) => {
                error!("failed to save quiz result: {e:#}");
                None
            }
        }
    }

    /// All records for a user, newest first. Empty on any failure.
    pub async fn list_by_user(&self, user_id: &str) -> Vec<QuizResultRecord> {
        let Some(fs) = &self.inner else {
            return Vec::new();
        };

        match fs.query_by_user(user_id).await {
            Ok(mut records) => {
                sort_newest_first(&mut records);
                records
            }
            Err(e) => {
                error!("failed to list quiz results: {e:#}");
                Vec::new()
            }
        }
    }

    /// Most recent record for a user, if any.
    pub async fn latest_for_user(&self, user_id: &str) -> Option<QuizResultRecord> {
        self.list_by_user(user_id).await.into_iter().next()
    }
}

impl Firestore {
    async fn connect(key_path: &Path) -> Result<Self> {
        let account = CustomServiceAccount::from_file(key_path)
            .with_context(|| format!("reading service account key {}", key_path.display()))?;
        let auth = AuthenticationManager::from(account);
        let project_id = auth
            .project_id()
            .await
            .context("service account key has no project_id")?;

        Ok(Self {
            http: reqwest::Client::new(),
            auth,
            project_id,
        })
    }

    async fn bearer_token(&self) -> Result<String> {
        let token = self.auth.get_token(&[FIRESTORE_SCOPE]).await?;
        Ok(token.as_str().to_string())
    }

    fn documents_url(&self) -> String {
        format!(
            "{FIRESTORE_API_BASE}/projects/{}/databases/(default)/documents",
            self.project_id
        )
    }

    async fn create_document(
        &self,
        user_id: &str,
        role: &str,
        personality_type: &PersonalityProfile,
    ) -> Result<String> {
        let body = json!({
            "fields": encode_record_fields(user_id, role, personality_type, Utc::now())
        });

        let response = self
            .http
            .post(format!("{}/{COLLECTION}", self.documents_url()))
            .bearer_auth(self.bearer_token().await?)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Firestore createDocument returned {status}: {body}"));
        }

        let created: Value = response.json().await?;
        created
            .get("name")
            .and_then(Value::as_str)
            .and_then(document_id_from_name)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("Firestore response missing document name"))
    }

    async fn query_by_user(&self, user_id: &str) -> Result<Vec<QuizResultRecord>> {
        let query = json!({
            "structuredQuery": {
                "from": [{"collectionId": COLLECTION}],
                "where": {
                    "fieldFilter": {
                        "field": {"fieldPath": "userId"},
                        "op": "EQUAL",
                        "value": {"stringValue": user_id}
                    }
                }
            }
        });

        let response = self
            .http
            .post(format!("{}:runQuery", self.documents_url()))
            .bearer_auth(self.bearer_token().await?)
            .json(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Firestore runQuery returned {status}: {body}"));
        }

        // runQuery streams a JSON array; rows without a `document` key carry
        // only a readTime and are skipped.
        let rows: Vec<Value> = response.json().await?;
        Ok(rows
            .iter()
            .filter_map(|row| row.get("document"))
            .filter_map(decode_document)
            .collect())
    }
}

/// Encodes the persisted record as Firestore typed fields.
///
/// This is the single place a record is shaped for storage: only the
/// profile's four declared fields plus ownership metadata appear here.
/// Quiz answers and axis scores never reach this function.
fn encode_record_fields(
    user_id: &str,
    role: &str,
    profile: &PersonalityProfile,
    now: DateTime<Utc>,
) -> Value {
    let timestamp = json!({
        "timestampValue": now.to_rfc3339_opts(SecondsFormat::Micros, true)
    });

    json!({
        "userId": {"stringValue": user_id},
        "role": {"stringValue": role},
        "personalityType": {"mapValue": {"fields": {
            "code": {"stringValue": &profile.code},
            "name": {"stringValue": &profile.name},
            "description": {"stringValue": &profile.description},
            "color": {"stringValue": &profile.color},
        }}},
        "createdAt": timestamp,
        "updatedAt": timestamp,
    })
}

fn document_id_from_name(name: &str) -> Option<&str> {
    name.rsplit('/').next().filter(|id| !id.is_empty())
}

/// Decodes a Firestore document into a record. Missing fields default to
/// empty rather than dropping the whole document; `userId` is required.
fn decode_document(doc: &Value) -> Option<QuizResultRecord> {
    let fields = doc.get("fields")?;
    let profile_fields = fields
        .get("personalityType")
        .and_then(|v| v.get("mapValue"))
        .and_then(|v| v.get("fields"));

    let profile_string = |key: &str| {
        profile_fields
            .and_then(|f| string_field(f, key))
            .unwrap_or_default()
    };

    Some(QuizResultRecord {
        id: doc
            .get("name")
            .and_then(Value::as_str)
            .and_then(document_id_from_name)
            .unwrap_or_default()
            .to_string(),
        user_id: string_field(fields, "userId")?,
        role: string_field(fields, "role").unwrap_or_default(),
        personality_type: PersonalityProfile {
            code: profile_string("code"),
            name: profile_string("name"),
            description: profile_string("description"),
            color: profile_string("color"),
        },
        created_at: timestamp_field(fields, "createdAt"),
        updated_at: timestamp_field(fields, "updatedAt"),
    })
}

fn string_field(fields: &Value, key: &str) -> Option<String> {
    fields
        .get(key)?
        .get("stringValue")?
        .as_str()
        .map(str::to_string)
}

fn timestamp_field(fields: &Value, key: &str) -> Option<DateTime<Utc>> {
    let raw = fields.get(key)?.get("timestampValue")?.as_str()?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Newest first. A record with no creation timestamp sorts as the earliest
/// possible instant and lands at the tail.
fn sort_newest_first(records: &mut [QuizResultRecord]) {
    records.sort_by_key(|r| Reverse(r.created_at.unwrap_or(DateTime::<Utc>::MIN_UTC)));
}
