//! Profile store: read-only access to user profiles keyed by user id.
//!
//! Profiles are written out of band. The generator only ever calls `get`, and treats
//! both a missing row and a store failure as an empty profile.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use thiserror::Error;

use crate::models::profile::UserProfile;

#[derive(Debug, Error)]
pub enum ProfileStoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Stored profile for '{user_id}' is not a JSON object")]
    Malformed { user_id: String },

    #[error("Invalid profile table name '{0}'")]
    InvalidTable(String),
}

/// The profile store seam. `AppState` carries it as `Arc<dyn ProfileStore>`.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Returns `Ok(None)` when no profile exists for `user_id`.
    async fn get(&self, user_id: &str) -> Result<Option<UserProfile>, ProfileStoreError>;
}

/// Postgres-backed store.
///
/// Expected table shape:
/// ```sql
/// CREATE TABLE user_profiles (user_id TEXT PRIMARY KEY, attributes JSONB NOT NULL DEFAULT '{}');
/// ```
pub struct PgProfileStore {
    pool: PgPool,
    select_sql: String,
}

impl PgProfileStore {
    /// The table name is interpolated into SQL, so only plain identifiers are accepted.
    pub fn new(pool: PgPool, table: &str) -> Result<Self, ProfileStoreError> {
        if !is_plain_identifier(table) {
            return Err(ProfileStoreError::InvalidTable(table.to_string()));
        }
        Ok(Self {
            pool,
            select_sql: format!("SELECT attributes FROM {table} WHERE user_id = $1"),
        })
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get(&self, user_id: &str) -> Result<Option<UserProfile>, ProfileStoreError> {
        let attributes = sqlx::query_scalar::<_, Value>(&self.select_sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        attributes
            .map(|value| profile_from_attributes(user_id, value))
            .transpose()
    }
}

fn profile_from_attributes(user_id: &str, value: Value) -> Result<UserProfile, ProfileStoreError> {
    let Value::Object(map) = value else {
        return Err(ProfileStoreError::Malformed {
            user_id: user_id.to_string(),
        });
    };

    let mut attributes: std::collections::BTreeMap<String, Value> = map.into_iter().collect();
    // The key column is authoritative.
    attributes.remove("user_id");

    Ok(UserProfile {
        user_id: Some(user_id.to_string()),
        attributes,
    })
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
