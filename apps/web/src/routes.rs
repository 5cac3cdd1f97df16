use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::WebState;

pub fn build_router(state: WebState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_index).post(handlers::handle_generate))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
