pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::errors::AppError;
use crate::generation::handlers;
use crate::state::AppState;

async fn not_implemented() -> Result<(), AppError> {
    Err(AppError::NotImplemented)
}

/// Builds the gateway router with tracing and open CORS
/// (every response carries `Access-Control-Allow-Origin: *`).
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/generate-path", post(handlers::handle_generate_path))
        // Reserved for profile management; no behaviour yet.
        .route("/user-profile", get(not_implemented).post(not_implemented))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
