//! Canonical learning-path shape shared by the generator, the gateway and the web client.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Error message carried by every generation failure.
pub const GENERATION_FAILED: &str = "Failed to generate learning path";

/// Body of `POST /generate-path`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningPathRequest {
    pub query: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl LearningPathRequest {
    /// The user id, treating an empty string the same as an absent one.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// A single resource attached to a step, read for display. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "ResourceRefRepr")]
pub struct ResourceRef {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
}

/// Models sometimes list resources as bare titles instead of objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum ResourceRefRepr {
    Title(String),
    Full {
        #[serde(default, deserialize_with = "lenient_opt_text")]
        title: Option<String>,
        #[serde(default, deserialize_with = "lenient_opt_text")]
        url: Option<String>,
        #[serde(default, deserialize_with = "lenient_opt_text")]
        description: Option<String>,
    },
}

impl From<ResourceRefRepr> for ResourceRef {
    fn from(repr: ResourceRefRepr) -> Self {
        match repr {
            ResourceRefRepr::Title(title) => ResourceRef {
                title: Some(title),
                ..Default::default()
            },
            ResourceRefRepr::Full {
                title,
                url,
                description,
            } => ResourceRef {
                title,
                url,
                description,
            },
        }
    }
}

/// One step of a path, read for display.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LearningStep {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    /// Free-form, e.g. "3 hours". Not a structured duration.
    #[serde(default, deserialize_with = "lenient_text")]
    pub estimated_time: String,
    #[serde(default, deserialize_with = "lenient_resources")]
    pub resources: Vec<ResourceRef>,
}

/// A successfully generated path, held exactly as the model emitted it.
///
/// Nothing is added, coerced or dropped on the way back out. `prerequisites` and `steps`
/// read the object leniently for rendering; step order is the learning sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LearningPath(BTreeMap<String, Value>);

impl LearningPath {
    /// Prerequisites as display text. Null entries are skipped.
    pub fn prerequisites(&self) -> Vec<String> {
        self.list("prerequisites").filter_map(display_text).collect()
    }

    /// Steps in emitted order. A bare string is read as a step title; other non-objects are skipped.
    pub fn steps(&self) -> Vec<LearningStep> {
        self.list("steps")
            .filter_map(|step| match step {
                Value::String(title) => Some(LearningStep {
                    title: title.clone(),
                    ..Default::default()
                }),
                other => LearningStep::deserialize(other).ok(),
            })
            .collect()
    }

    fn list(&self, key: &str) -> impl Iterator<Item = &Value> {
        self.0.get(key).and_then(Value::as_array).into_iter().flatten()
    }
}

impl From<Map<String, Value>> for LearningPath {
    fn from(object: Map<String, Value>) -> Self {
        Self(object.into_iter().collect())
    }
}

/// Strings as-is, other scalars in their JSON spelling, null as absent.
fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(display_text(&Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_opt_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(display_text(&Value::deserialize(deserializer)?))
}

fn lenient_resources<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<ResourceRef>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|resource| ResourceRef::deserialize(resource).ok())
        .collect())
}

/// Either a well-formed path or an error object, never both.
///
/// Serialized untagged: the presence of `error` on the wire is the discriminator.
/// `Failure` is listed first so decoding an error body never falls through to `Success`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LearningPathResponse {
    Failure {
        error: String,
        #[serde(default)]
        details: String,
    },
    Success(LearningPath),
}

impl LearningPathResponse {
    pub fn generation_failed(details: impl Into<String>) -> Self {
        LearningPathResponse::Failure {
            error: GENERATION_FAILED.to_string(),
            details: details.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, LearningPathResponse::Failure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_serializes_as_flat_error_object() {
        let response = LearningPathResponse::generation_failed("bad json");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({"error": "Failed to generate learning path", "details": "bad json"})
        );
    }

    fn path(body: Value) -> LearningPath {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_success_serializes_without_error_key() {
        let body = json!({
            "prerequisites": ["HTML"],
            "steps": [{"title": "JSX", "description": "Learn JSX syntax", "estimated_time": "2 hours"}]
        });
        let value = serde_json::to_value(LearningPathResponse::Success(path(body.clone()))).unwrap();
        assert!(value.get("error").is_none());
        assert_eq!(value, body);
    }

    #[test]
    fn test_error_body_decodes_as_failure() {
        let body = json!({"error": "Internal server error", "details": "missing field `query`"});
        let response: LearningPathResponse = serde_json::from_value(body).unwrap();
        assert!(response.is_failure());
    }

    #[test]
    fn test_path_body_decodes_as_success_preserving_step_order() {
        let body = json!({
            "prerequisites": [],
            "steps": [{"title": "A"}, {"title": "B"}, {"title": "C"}]
        });
        let response: LearningPathResponse = serde_json::from_value(body).unwrap();
        let LearningPathResponse::Success(path) = response else {
            panic!("expected success");
        };
        let steps = path.steps();
        let titles: Vec<_> = steps.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["A", "B", "C"]);
        assert!(steps[0].description.is_empty());
    }

    #[test]
    fn test_resource_ref_accepts_bare_title() {
        let step: LearningStep = serde_json::from_value(json!({
            "title": "Hooks",
            "resources": ["React docs", {"url": "https://react.dev"}]
        }))
        .unwrap();
        assert_eq!(step.resources[0].title.as_deref(), Some("React docs"));
        assert_eq!(step.resources[1].url.as_deref(), Some("https://react.dev"));
        assert!(step.resources[1].title.is_none());
    }

    #[test]
    fn test_path_round_trips_unchanged() {
        let body = json!({
            "prerequisites": [],
            "steps": [
                {"title": "A", "description": "d", "difficulty": "easy",
                 "resources": [{"title": "Book", "pages": 320}]},
                {"title": null, "estimated_time": 3, "resources": null}
            ],
            "total_time": "20 hours"
        });
        assert_eq!(serde_json::to_value(path(body.clone())).unwrap(), body);
    }

    #[test]
    fn test_steps_read_loosely_typed_fields() {
        let path = path(json!({
            "prerequisites": ["Python", null, 101],
            "steps": [
                {"title": null, "description": "d", "estimated_time": 3, "resources": null},
                "Read the docs",
                42,
                {"title": "B", "resources": [7, {"title": "T", "url": null}]}
            ]
        }));

        assert_eq!(path.prerequisites(), ["Python", "101"]);
        let steps = path.steps();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].title, "");
        assert_eq!(steps[0].estimated_time, "3");
        assert!(steps[0].resources.is_empty());
        assert_eq!(steps[1].title, "Read the docs");
        assert_eq!(steps[2].resources.len(), 1);
        assert_eq!(steps[2].resources[0].title.as_deref(), Some("T"));
        assert!(steps[2].resources[0].url.is_none());
    }

    #[test]
    fn test_missing_lists_read_as_empty() {
        let path = path(json!({"steps": "read a book"}));
        assert!(path.prerequisites().is_empty());
        assert!(path.steps().is_empty());
        assert_eq!(serde_json::to_value(&path).unwrap(), json!({"steps": "read a book"}));
    }

    #[test]
    fn test_empty_user_id_is_absent() {
        let request: LearningPathRequest =
            serde_json::from_value(json!({"query": "Rust", "user_id": ""})).unwrap();
        assert!(request.user_id().is_none());

        let request: LearningPathRequest =
            serde_json::from_value(json!({"query": "Rust", "user_id": null})).unwrap();
        assert!(request.user_id().is_none());
    }
}
