//! HTTP handlers for knmp-console

pub mod auth;
pub mod dashboard;
pub mod edit_report;
pub mod health;
pub mod layout;
pub mod login;

pub use auth::auth_middleware;
pub use health::health_routes;
