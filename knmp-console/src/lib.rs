//! knmp-console library interface
//!
//! Staff-only area: summary statistics, the full record list and the
//! edit-report page. Everything except `/health`, `/login`, `/logout` and the
//! stylesheet sits behind the staff token gate.

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod edit;
pub mod error;
pub mod seed;
pub mod stats;

pub use crate::error::{ConsoleError, ConsoleResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// SHA-256 hex digest of the staff token; `None` disables the login gate
    pub staff_token_digest: Option<String>,
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Create new application state from the plain staff token
    pub fn new(db: SqlitePool, staff_token: Option<&str>) -> Self {
        Self {
            db,
            staff_token_digest: staff_token.map(api::auth::token_digest),
            startup_time: Utc::now(),
        }
    }

    pub fn auth_enabled(&self) -> bool {
        self.staff_token_digest.is_some()
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post};

    // Protected routes (require a staff token)
    let protected = Router::new()
        .route("/", get(api::dashboard::dashboard))
        .route(
            "/edit-report/:slug/",
            get(api::edit_report::edit_page).post(api::edit_report::edit_submit),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth_middleware,
        ));

    // Public routes (no authentication)
    let public = Router::new()
        .route("/login", get(api::login::login_page).post(api::login::login_submit))
        .route("/logout", post(api::login::logout))
        .route("/static/knmp.css", get(api::layout::serve_css))
        .merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
