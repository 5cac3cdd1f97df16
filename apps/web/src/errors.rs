use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::pages::PageError;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("Page rendering failed: {0}")]
    Page(#[from] PageError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        tracing::error!("{self}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Something went wrong</h1><p>The page could not be rendered.</p>"),
        )
            .into_response()
    }
}
