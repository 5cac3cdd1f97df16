use std::sync::Arc;

use crate::errors::MalformedRequestPolicy;
use crate::generation::generator::PathGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Owns the profile store, resource index and completion model handles.
    pub generator: Arc<PathGenerator>,
    pub malformed_requests: MalformedRequestPolicy,
}
