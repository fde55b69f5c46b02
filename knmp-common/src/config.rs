//! Bootstrap configuration and root folder resolution
//!
//! Two sources feed a running service:
//! 1. **TOML bootstrap** (`config.toml`): root folder, listen addresses, logging, upload limits
//! 2. **Command line / environment**: overrides for the values above
//!
//! A missing TOML file is not an error. The service logs a warning and runs on
//! compiled defaults.
//!
//! # Root folder priority
//!
//! 1. Command-line argument (`--root-folder`)
//! 2. Environment variable (`KNMP_ROOT_FOLDER`)
//! 3. TOML `root_folder`
//! 4. OS-dependent default (`~/.local/share/knmpdb` on Linux)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "KNMP_CONFIG";
/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV_VAR: &str = "KNMP_ROOT_FOLDER";
/// Environment variable overriding the console staff token
pub const STAFF_TOKEN_ENV_VAR: &str = "KNMP_STAFF_TOKEN";

/// Database file name inside the root folder
pub const DATABASE_FILE_NAME: &str = "knmpdb.db";
/// Committed photo tree inside the root folder (served at `/media/`)
pub const MEDIA_DIR_NAME: &str = "media";
/// Staging area for uploads that are not yet committed (never served)
pub const STAGING_DIR_NAME: &str = "temp_uploads";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Root folder holding the database, media and staging directories
    pub root_folder: Option<PathBuf>,
    pub logging: LoggingConfig,
    pub web: WebConfig,
    pub console: ConsoleConfig,
    pub uploads: UploadConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` takes precedence
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    pub file: Option<PathBuf>,
}

/// Public site listen address
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind: String,
    pub port: u16,
}

/// Staff console listen address and credentials
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub bind: String,
    pub port: u16,

    /// Shared staff token. Unset or empty disables the console login gate.
    pub staff_token: Option<String>,
}

/// Photo upload limits and staging cleanup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Largest accepted photo (bytes)
    pub max_photo_bytes: u64,

    /// Largest accepted request body (bytes); bounds a multi-photo step
    pub max_request_bytes: usize,

    /// Staged files and wizard sessions older than this are swept
    pub staged_max_age_secs: u64,

    /// Interval between sweeps
    pub sweep_interval_secs: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8001,
            staff_token: None,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_photo_bytes: 5 * 1024 * 1024,
            max_request_bytes: 50 * 1024 * 1024,
            staged_max_age_secs: 24 * 60 * 60,
            sweep_interval_secs: 60 * 60,
        }
    }
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Load configuration
    ///
    /// An explicit path (CLI or `KNMP_CONFIG`) must exist. Without one, the
    /// platform locations are tried and compiled defaults are used when none exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let explicit = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from));

        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                path
            }
            None => match default_config_path() {
                Some(path) => path,
                None => {
                    warn!("No config file found, using compiled defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

impl ConsoleConfig {
    /// Staff token after applying the `KNMP_STAFF_TOKEN` override
    ///
    /// Empty or whitespace-only values count as unset.
    pub fn resolved_staff_token(&self) -> Option<String> {
        std::env::var(STAFF_TOKEN_ENV_VAR)
            .ok()
            .or_else(|| self.staff_token.clone())
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

/// First existing platform config file
fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("knmpdb").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(unix) {
        let system_config = PathBuf::from("/etc/knmpdb/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("knmpdb"))
        .unwrap_or_else(|| PathBuf::from("./knmpdb_data"))
}

/// Resolves the root folder from CLI, environment, TOML and OS default
#[derive(Debug, Clone, Default)]
pub struct RootFolderResolver {
    cli_arg: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new(cli_arg: Option<PathBuf>) -> Self {
        Self { cli_arg }
    }

    /// Resolve following the documented priority order
    pub fn resolve(&self, config: &TomlConfig) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            return path.clone();
        }

        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV_VAR) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        if let Some(path) = &config.root_folder {
            return path.clone();
        }

        default_root_folder()
    }
}

/// Creates the root folder layout and names the files inside it
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create root, media and staging directories if missing
    pub fn ensure_directory_exists(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::create_dir_all(self.media_path())?;
        std::fs::create_dir_all(self.staging_path())?;
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.root.join(DATABASE_FILE_NAME)
    }

    pub fn media_path(&self) -> PathBuf {
        self.root.join(MEDIA_DIR_NAME)
    }

    pub fn staging_path(&self) -> PathBuf {
        self.root.join(STAGING_DIR_NAME)
    }
}
