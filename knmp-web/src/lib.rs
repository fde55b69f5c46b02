//! knmp-web library interface
//!
//! The public site: landing page, report wizard, browse/search, detail pages,
//! informational pages and committed photo serving.

pub mod api;
pub mod browse;
pub mod db;
pub mod error;
pub mod storage;
pub mod sweep;
pub mod wizard;

pub use crate::error::{WebError, WebResult};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use knmp_common::config::UploadConfig;
use sqlx::SqlitePool;
use storage::{MediaStore, PhotoStaging};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use wizard::{SessionLocks, Wizard};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Uploads held between wizard steps
    pub staging: PhotoStaging,
    /// Committed photos, served at `/media/`
    pub media: MediaStore,
    pub uploads: UploadConfig,
    /// Serializes wizard requests per visitor session
    pub session_locks: SessionLocks,
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, staging: PhotoStaging, media: MediaStore, uploads: UploadConfig) -> Self {
        Self {
            db,
            staging,
            media,
            uploads,
            session_locks: SessionLocks::new(),
            startup_time: Utc::now(),
        }
    }

    pub fn wizard(&self) -> Wizard<'_> {
        Wizard::new(&self.db, &self.staging, &self.media, self.uploads.max_photo_bytes)
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let media_dir = state.media.root().to_path_buf();
    let body_limit = state.uploads.max_request_bytes;

    Router::new()
        // HTML pages and embedded assets
        .merge(api::ui::ui_routes())
        .merge(api::health_routes())
        // Committed photos only; the staging area is never mounted
        .nest_service("/media", ServeDir::new(media_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
