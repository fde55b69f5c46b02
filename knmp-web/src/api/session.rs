//! Visitor session identifier carried in the `knmp_session` cookie
//!
//! The id keys the stored wizard state and the per-session request lock.

use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use knmp_common::cookies::{cookie_value, set_cookie};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "knmp_session";

/// Session id from the request, or a fresh one that still needs its cookie set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitorSession {
    pub id: Uuid,
    pub is_new: bool,
}

impl VisitorSession {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let existing = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(|cookies| cookie_value(cookies, SESSION_COOKIE))
            .and_then(|value| Uuid::parse_str(value).ok());

        match existing {
            Some(id) => Self { id, is_new: false },
            None => Self { id: Uuid::new_v4(), is_new: true },
        }
    }

    /// Attach the session cookie when the id was minted for this request
    pub fn attach(&self, response: impl IntoResponse) -> Response {
        let mut response = response.into_response();
        if self.is_new {
            let cookie = set_cookie(SESSION_COOKIE, &self.id.to_string(), None);
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_cookie_is_reused() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("a=b; knmp_session={}", id)).unwrap(),
        );

        let session = VisitorSession::from_headers(&headers);
        assert_eq!(session.id, id);
        assert!(!session.is_new);
    }

    #[test]
    fn test_missing_or_invalid_cookie_mints_new_id() {
        let session = VisitorSession::from_headers(&HeaderMap::new());
        assert!(session.is_new);

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("knmp_session=not-a-uuid"));
        assert!(VisitorSession::from_headers(&headers).is_new);
    }

    #[test]
    fn test_attach_sets_cookie_only_when_new() {
        let new = VisitorSession { id: Uuid::new_v4(), is_new: true };
        let response = new.attach("ok");
        let cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("knmp_session="));
        assert!(cookie.contains("HttpOnly"));

        let existing = VisitorSession { id: Uuid::new_v4(), is_new: false };
        assert!(existing.attach("ok").headers().get(header::SET_COOKIE).is_none());
    }
}
