//! knmp-web - public missing persons site
//!
//! Serves the landing page, the report wizard, browse/search and detail
//! pages, and committed photos under `/media/`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use knmp_common::config::{RootFolderInitializer, RootFolderResolver, TomlConfig};
use knmp_web::storage::{MediaStore, PhotoStaging};
use knmp_web::AppState;
use tracing::info;

/// Command-line arguments for knmp-web
#[derive(Parser, Debug)]
#[command(name = "knmp-web")]
#[command(about = "Public missing persons reporting site")]
#[command(version)]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, env = "KNMP_CONFIG")]
    config: Option<PathBuf>,

    /// Root folder holding the database, media and staging directories
    #[arg(short, long, env = "KNMP_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Port to listen on (overrides `[web] port`)
    #[arg(short, long, env = "KNMP_WEB_PORT")]
    port: Option<u16>,

    /// Address to bind (overrides `[web] bind`)
    #[arg(short, long, env = "KNMP_WEB_BIND")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    knmp_common::logging::init(&config.logging, &["tower_http=info"])
        .context("Failed to initialize logging")?;

    info!(
        "Starting knmp-web (Public Site) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    // Resolve root folder and create its layout
    let root_folder = RootFolderResolver::new(args.root_folder).resolve(&config);
    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to initialize root folder")?;
    info!("Root folder: {}", initializer.root().display());

    let db_path = initializer.database_path();
    info!("Database: {}", db_path.display());
    let db = knmp_common::db::init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    let state = AppState::new(
        db,
        PhotoStaging::new(initializer.staging_path()),
        MediaStore::new(initializer.media_path()),
        config.uploads.clone(),
    );

    let sweeper = knmp_web::sweep::spawn_sweeper(state.clone());

    let app = knmp_web::build_router(state);

    let bind = args.bind.unwrap_or(config.web.bind);
    let port = args.port.unwrap_or(config.web.port);
    let addr = format!("{}:{}", bind, port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(knmp_common::shutdown::shutdown_signal())
        .await
        .context("Server error")?;

    sweeper.abort();
    info!("Server shutdown complete");
    Ok(())
}
