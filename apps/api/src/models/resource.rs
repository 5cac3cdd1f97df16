use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A learning resource exactly as the index stored it (`_source`). Read-only from our side.
///
/// Usually carries `title`, `url`, `description` and `content`, but no field is guaranteed
/// and none is coerced, so the prompt embeds the record as indexed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceRecord(BTreeMap<String, Value>);
