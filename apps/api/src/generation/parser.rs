//! Turns a raw completion envelope into a `LearningPath`.
//!
//! Two layers must both decode: the API envelope, then the JSON object inside its text block.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::llm_client::{strip_json_fences, LlmError, LlmResponse};
use crate::models::path::LearningPath;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Model call failed: {0}")]
    Model(#[from] LlmError),

    #[error("Could not serialize prompt inputs: {0}")]
    Prompt(serde_json::Error),

    #[error("Malformed completion envelope: {0}")]
    Envelope(serde_json::Error),

    #[error("Completion envelope contains no text block")]
    EmptyCompletion,

    #[error("Model output is not valid JSON: {0}")]
    Payload(serde_json::Error),

    #[error("Model output is a JSON {0}, expected an object")]
    NotAnObject(&'static str),

    #[error("Model reported an error: {0}")]
    ModelReported(String),
}

pub fn parse_completion(raw: &str) -> Result<LearningPath, GenerationError> {
    let envelope: LlmResponse = serde_json::from_str(raw).map_err(GenerationError::Envelope)?;

    if let Some(usage) = &envelope.usage {
        debug!(
            "Completion usage: input_tokens={}, output_tokens={}",
            usage.input_tokens, usage.output_tokens
        );
    }

    let text = envelope.text().ok_or(GenerationError::EmptyCompletion)?;
    let payload: Value =
        serde_json::from_str(strip_json_fences(text)).map_err(GenerationError::Payload)?;

    let object = match payload {
        Value::Object(object) => object,
        other => return Err(GenerationError::NotAnObject(json_kind(&other))),
    };

    // `error` is the failure discriminator on the wire; a path must never carry it.
    if let Some(reported) = object.get("error") {
        let message = match reported {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(GenerationError::ModelReported(message));
    }

    Ok(LearningPath::from(object))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
