//! Axum route handlers for the Generation API.

use axum::{body::Bytes, extract::State, Json};

use crate::errors::AppError;
use crate::models::path::{LearningPathRequest, LearningPathResponse};
use crate::state::AppState;

/// POST /generate-path
///
/// The body is decoded by hand rather than through the `Json` extractor so that every
/// malformed body (empty, invalid JSON, missing or blank `query`, any content type)
/// gets the same `{error, details}` answer.
///
/// A generation failure is still a `200`; only a malformed request is an `AppError`.
pub async fn handle_generate_path(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LearningPathResponse>, AppError> {
    let request = parse_request(&body).map_err(|details| state.malformed_requests.reject(details))?;

    let response = state
        .generator
        .generate(&request.query, request.user_id())
        .await;

    Ok(Json(response))
}

fn parse_request(body: &[u8]) -> Result<LearningPathRequest, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err("Request body is empty".to_string());
    }

    let request: LearningPathRequest =
        serde_json::from_slice(body).map_err(|e| format!("Invalid request body: {e}"))?;

    if request.query.trim().is_empty() {
        return Err("Field 'query' must not be empty".to_string());
    }

    Ok(request)
}
