//! Error types for knmp-console

use crate::api::layout;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Unknown slug (404)
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Common error: {0}")]
    Common(#[from] knmp_common::Error),
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

impl IntoResponse for ConsoleError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            ConsoleError::NotFound(_) | ConsoleError::Common(knmp_common::Error::NotFound(_)) => (
                StatusCode::NOT_FOUND,
                "Not found",
                "No report matches this address.",
            ),
            ConsoleError::Common(_) => {
                error!("Request failed: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong",
                    "An unexpected error occurred. Please try again later.",
                )
            }
        };

        let body = format!(
            r#"<section class="card"><h1>{}</h1><p>{}</p><p><a href="/">Back to the dashboard</a></p></section>"#,
            title, message
        );

        (status, Html(layout::render_page(title, &body, false))).into_response()
    }
}
