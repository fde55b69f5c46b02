//! # KNMPDB Common Library
//!
//! Shared code for the public site (knmp-web) and the staff console (knmp-console):
//! - Entity store (persons, contacts, photos) on SQLite
//! - Schema initialization and migrations
//! - Bootstrap configuration and root folder resolution
//! - Logging setup
//! - Validation rules, phone formatting, slug generation
//! - Pagination, HTML and cookie helpers
//! - Graceful shutdown signal

pub mod config;
pub mod cookies;
pub mod db;
pub mod error;
pub mod html;
pub mod logging;
pub mod pagination;
pub mod phone;
pub mod shutdown;
pub mod slug;
pub mod time;
pub mod validation;

pub use error::{Error, Result};

/// Shared stylesheet served by both services
pub const KNMP_CSS: &str = include_str!("../static/knmp.css");
