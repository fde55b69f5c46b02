//! UI routes - server-rendered HTML pages for the public site
//!
//! - **Landing** (`index`): latest missing persons and a call to report
//! - **Report** (`report`): the three-step report wizard
//! - **Persons** (`persons`): browse/search listing and detail pages
//! - **Info** (`info`): about, privacy policy, terms of service, favicon redirect
//! - **Static Assets** (`static_assets`): embedded CSS and favicon

use axum::{routing::get, Router};
use crate::AppState;

mod index;
mod info;
pub mod layout;
mod persons;
mod report;
mod static_assets;

use index::index_page;
use info::{about_page, favicon_redirect, privacy_policy_page, terms_of_service_page};
use persons::{missing_person_detail_page, missing_persons_page};
use report::{report_page, report_submit};
use static_assets::{serve_favicon_svg, serve_knmp_css};

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        // Page routes
        .route("/", get(index_page))
        .route("/report-missing-person/", get(report_page).post(report_submit))
        .route("/missing-persons/", get(missing_persons_page))
        .route("/missing-person/:slug/", get(missing_person_detail_page))
        .route("/about/", get(about_page))
        .route("/privacy-policy/", get(privacy_policy_page))
        .route("/terms-of-service/", get(terms_of_service_page))
        .route("/favicon.ico", get(favicon_redirect))
        // Static assets
        .route("/static/knmp.css", get(serve_knmp_css))
        .route("/static/images/favicon.svg", get(serve_favicon_svg))
}
