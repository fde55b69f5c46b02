//! Database access specific to the public site

pub mod sessions;
