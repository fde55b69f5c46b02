//! Error types for knmp-web
//!
//! Handler errors render as HTML pages. Wizard problems never reach this
//! type; the wizard turns them into inline notices.

use crate::api::ui::layout;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum WebError {
    /// Unknown slug or path (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed request body (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Common error: {0}")]
    Common(#[from] knmp_common::Error),
}

pub type WebResult<T> = Result<T, WebError>;

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            WebError::NotFound(_) | WebError::Common(knmp_common::Error::NotFound(_)) => (
                StatusCode::NOT_FOUND,
                "Page not found",
                "The page you were looking for does not exist.",
            ),
            WebError::BadRequest(_) => (
                StatusCode::BAD_REQUEST,
                "Bad request",
                "The submitted form could not be read. Please try again.",
            ),
            WebError::Internal(_) | WebError::Common(_) => {
                error!("Request failed: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong",
                    "An unexpected error occurred. Please try again later.",
                )
            }
        };

        let body = format!(
            r#"<section class="card"><h1>{}</h1><p>{}</p><p><a href="/">Return to the home page</a></p></section>"#,
            title, message
        );

        (status, Html(layout::render_page(title, &body))).into_response()
    }
}
