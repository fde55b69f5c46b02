//! knmp-seed - fill a development database with sample reports

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use knmp_common::config::{RootFolderInitializer, RootFolderResolver, TomlConfig};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "knmp-seed")]
#[command(about = "Insert random missing person reports for development")]
#[command(version)]
struct Args {
    /// Number of reports to insert
    #[arg(short = 'n', long, default_value_t = 200)]
    count: usize,

    /// Configuration file (TOML)
    #[arg(short, long, env = "KNMP_CONFIG")]
    config: Option<PathBuf>,

    /// Root folder holding the database
    #[arg(short, long, env = "KNMP_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    knmp_common::logging::init(&config.logging, &[]).context("Failed to initialize logging")?;

    info!(
        "Starting knmp-seed v{} [{}] built {} ({})",
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
    let db = knmp_common::db::init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    let mut rng = rand::thread_rng();
    let created = knmp_console::seed::seed_reports(&db, args.count, &mut rng)
        .await
        .context("Failed to insert sample reports")?;

    info!("Inserted {} sample reports into {}", created.len(), db_path.display());
    Ok(())
}
