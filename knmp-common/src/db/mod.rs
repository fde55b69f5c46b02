//! Entity store: persons, contacts, photos and their links

pub mod contacts;
pub mod init;
pub mod migrations;
pub mod models;
pub mod persons;
pub mod photos;
pub mod stats;

pub use init::init_database;
pub use models::*;

/// Escape `%`, `_` and `\` for a LIKE pattern used with `ESCAPE '\'`
pub(crate) fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
