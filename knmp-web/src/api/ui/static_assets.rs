//! Static asset handlers
//!
//! Embeds and serves CSS and the favicon at compile time

use axum::{http::StatusCode, response::{IntoResponse, Response}};

const FAVICON_SVG: &str = include_str!("../../../static/images/favicon.svg");

/// GET /static/knmp.css
///
/// Serves the shared stylesheet from knmp-common
pub async fn serve_knmp_css() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "text/css"),
            ("cache-control", "public, max-age=3600"),
        ],
        knmp_common::KNMP_CSS,
    )
        .into_response()
}

/// GET /static/images/favicon.svg
pub async fn serve_favicon_svg() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "image/svg+xml"),
            ("cache-control", "public, max-age=86400"),
        ],
        FAVICON_SVG,
    )
        .into_response()
}
