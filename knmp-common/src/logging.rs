//! Tracing subscriber setup shared by all binaries

use crate::config::LoggingConfig;
use crate::{Error, Result};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over the configured level. `extra_directives` are appended
/// to the configured level (e.g. `"tower_http=debug"`).
pub fn init(config: &LoggingConfig, extra_directives: &[&str]) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let mut spec = config.level.clone();
            for directive in extra_directives {
                spec.push(',');
                spec.push_str(directive);
            }
            EnvFilter::try_new(&spec)
                .map_err(|e| Error::Config(format!("Invalid log filter '{}': {}", spec, e)))?
        }
    };

    match &config.file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .try_init()
                .map_err(|e| Error::Logging(e.to_string()))
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|e| Error::Logging(e.to_string())),
    }
}
