//! Axum route handlers for the learning-path form.

use axum::{extract::State, response::Html, Form};
use tracing::{info, warn};

use crate::errors::WebError;
use crate::pages::{PageView, EMPTY_GOAL_WARNING};
use crate::preferences::{compose_query, PlanForm, Preferences};
use crate::state::WebState;

/// GET /
pub async fn handle_index(State(state): State<WebState>) -> Result<Html<String>, WebError> {
    let view = PageView::form("", &Preferences::default());
    Ok(Html(state.pages.render(&view)?))
}

/// POST /
///
/// Blank goals are stopped here without calling the gateway.
/// The user id is never sent; preferences travel inside the query text.
pub async fn handle_generate(
    State(state): State<WebState>,
    Form(form): Form<PlanForm>,
) -> Result<Html<String>, WebError> {
    let preferences = form.preferences();
    let view = PageView::form(&form.goal, &preferences);

    if form.goal.trim().is_empty() {
        return Ok(Html(state.pages.render(&view.with_warning(EMPTY_GOAL_WARNING))?));
    }

    let query = compose_query(&form.goal, &preferences);
    let view = match state.gateway.generate_path(&query, None).await {
        Ok(response) => {
            if response.is_failure() {
                warn!("Gateway returned a failure response");
            } else {
                info!("Rendering generated learning path");
            }
            view.with_response(&response)
        }
        Err(e) => {
            warn!("Error generating path: {e}");
            view.with_transport_error(&e.to_string())
        }
    };

    Ok(Html(state.pages.render(&view)?))
}
