//! Staff login and logout

use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use knmp_common::cookies::{clear_cookie, set_cookie};
use serde::Deserialize;
use tracing::{info, warn};

use crate::api::auth::{constant_time_eq, token_digest, STAFF_COOKIE, STAFF_COOKIE_MAX_AGE_SECS};
use crate::api::layout;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub token: String,
}

fn login_form(error: Option<&str>) -> String {
    let error = error
        .map(|e| layout::error_list(&[e.to_string()]))
        .unwrap_or_default();
    let body = format!(
        r#"<section class="card">
    <h1>Staff login</h1>
    {error}
    <form method="post" action="/login">
        <label>Staff token <input type="password" name="token" autocomplete="current-password" required></label>
        <button type="submit">Log in</button>
    </form>
</section>"#,
        error = error
    );
    layout::render_page("Staff login", &body, false)
}

fn with_cookie(response: impl IntoResponse, cookie: &str) -> Response {
    let mut response = response.into_response();
    if let Ok(value) = HeaderValue::from_str(cookie) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

/// GET /login
pub async fn login_page(State(state): State<AppState>) -> Response {
    if !state.auth_enabled() {
        return Redirect::to("/").into_response();
    }
    Html(login_form(None)).into_response()
}

/// POST /login
pub async fn login_submit(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let Some(expected) = state.staff_token_digest.as_deref() else {
        return Redirect::to("/").into_response();
    };

    let digest = token_digest(form.token.trim());
    if !constant_time_eq(digest.as_bytes(), expected.as_bytes()) {
        warn!("Staff login rejected");
        return (
            StatusCode::UNAUTHORIZED,
            Html(login_form(Some("That staff token is not valid."))),
        )
            .into_response();
    }

    info!("Staff login accepted");
    with_cookie(
        Redirect::to("/"),
        &set_cookie(STAFF_COOKIE, &digest, Some(STAFF_COOKIE_MAX_AGE_SECS)),
    )
}

/// POST /logout
pub async fn logout() -> Response {
    with_cookie(Redirect::to("/login"), &clear_cookie(STAFF_COOKIE))
}
