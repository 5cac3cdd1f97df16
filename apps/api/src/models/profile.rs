use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A user profile as read from the profile store.
///
/// The store is schema-less: apart from `user_id` every attribute lands in `attributes`.
/// `BTreeMap` keeps key order stable so the profile serializes identically on every request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl UserProfile {
    /// Stand-in used when no user id was given, no row exists, or the store failed.
    pub fn empty() -> Self {
        Self::default()
    }
}
