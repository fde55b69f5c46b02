//! knmp-console - staff dashboard
//!
//! Summary statistics, the full record list and the edit-report page,
//! gated by the shared staff token.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use knmp_common::config::{RootFolderInitializer, RootFolderResolver, TomlConfig};
use knmp_console::AppState;
use tracing::{info, warn};

/// Command-line arguments for knmp-console
#[derive(Parser, Debug)]
#[command(name = "knmp-console")]
#[command(about = "Staff dashboard for the missing persons database")]
#[command(version)]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, env = "KNMP_CONFIG")]
    config: Option<PathBuf>,

    /// Root folder holding the database
    #[arg(short, long, env = "KNMP_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Port to listen on (overrides `[console] port`)
    #[arg(short, long, env = "KNMP_CONSOLE_PORT")]
    port: Option<u16>,

    /// Address to bind (overrides `[console] bind`)
    #[arg(short, long, env = "KNMP_CONSOLE_BIND")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    knmp_common::logging::init(&config.logging, &["tower_http=info"])
        .context("Failed to initialize logging")?;

    info!(
        "Starting knmp-console (Staff Console) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let root_folder = RootFolderResolver::new(args.root_folder).resolve(&config);
    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to initialize root folder")?;

    let db_path = initializer.database_path();
    info!("Database: {}", db_path.display());
    let db = knmp_common::db::init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    let staff_token = config.console.resolved_staff_token();
    if staff_token.is_none() {
        warn!("No staff token configured: the console is open to anyone who can reach it");
    }

    let state = AppState::new(db, staff_token.as_deref());
    let app = knmp_console::build_router(state);

    let bind = args.bind.unwrap_or(config.console.bind);
    let port = args.port.unwrap_or(config.console.port);
    let addr = format!("{}:{}", bind, port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(knmp_common::shutdown::shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}
