//! HTTP handlers for knmp-web

pub mod health;
pub mod session;
pub mod ui;

pub use health::health_routes;
