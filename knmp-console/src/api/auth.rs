//! Staff token gate for the console
//!
//! A request is authenticated by either
//! - `Authorization: Bearer <token>`, or
//! - a `knmp_staff` cookie holding the SHA-256 hex digest of the token
//!   (set by `POST /login`).
//!
//! No configured token disables the gate entirely.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use knmp_common::cookies::cookie_value;
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::api::layout;
use crate::AppState;

pub const STAFF_COOKIE: &str = "knmp_staff";
/// Login cookie lifetime (8 hours)
pub const STAFF_COOKIE_MAX_AGE_SECS: u64 = 8 * 60 * 60;

/// SHA-256 hex digest of a staff token
pub fn token_digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Equality that does not stop at the first differing byte
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Outcome of inspecting a request's credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credentials {
    /// Neither header nor cookie present
    Missing,
    Valid,
    /// Something was presented and it did not match
    Invalid,
}

pub fn check_credentials(headers: &HeaderMap, expected_digest: &str) -> Credentials {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim);

    if let Some(token) = bearer {
        return if constant_time_eq(token_digest(token).as_bytes(), expected_digest.as_bytes()) {
            Credentials::Valid
        } else {
            Credentials::Invalid
        };
    }

    let cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookies| cookie_value(cookies, STAFF_COOKIE));

    match cookie {
        Some(digest) if constant_time_eq(digest.as_bytes(), expected_digest.as_bytes()) => {
            Credentials::Valid
        }
        Some(_) => Credentials::Invalid,
        None => Credentials::Missing,
    }
}

/// Authentication middleware for the protected console routes
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(expected) = state.staff_token_digest.as_deref() else {
        // No staff token configured: gate disabled
        return Ok(next.run(request).await);
    };

    match check_credentials(request.headers(), expected) {
        Credentials::Valid => Ok(next.run(request).await),
        Credentials::Missing => Err(AuthError::LoginRequired),
        Credentials::Invalid => {
            warn!(path = %request.uri().path(), "Rejected invalid staff credentials");
            Err(AuthError::InvalidToken)
        }
    }
}

/// Authentication failures for HTTP responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Browser without a login cookie: send it to the login page
    LoginRequired,
    /// A token or cookie was presented and did not match
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::LoginRequired => Redirect::to("/login").into_response(),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                Html(layout::render_page(
                    "Unauthorized",
                    r#"<section class="card"><h1>Unauthorized</h1><p>The staff credentials were not accepted.</p><p><a href="/login">Log in again</a></p></section>"#,
                    false,
                )),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_token_digest_is_sha256_hex() {
        assert_eq!(
            token_digest("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"same", b"same"));
        assert!(!constant_time_eq(b"same", b"sane"));
        assert!(!constant_time_eq(b"short", b"longer"));
    }

    #[test]
    fn test_check_credentials() {
        let expected = token_digest("s3cret");

        assert_eq!(check_credentials(&HeaderMap::new(), &expected), Credentials::Missing);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer s3cret"));
        assert_eq!(check_credentials(&headers, &expected), Credentials::Valid);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer wrong"));
        assert_eq!(check_credentials(&headers, &expected), Credentials::Invalid);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("knmp_staff={}", expected)).unwrap(),
        );
        assert_eq!(check_credentials(&headers, &expected), Credentials::Valid);

        let mut headers = HeaderMap::new();
        // The plain token is not a valid cookie value
        headers.insert(header::COOKIE, HeaderValue::from_static("knmp_staff=s3cret"));
        assert_eq!(check_credentials(&headers, &expected), Credentials::Invalid);
    }
}
