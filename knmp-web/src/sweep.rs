//! Removal of abandoned wizard state
//!
//! Visitors who leave mid-wizard leave staged files and a session row behind.
//! Both are removed once older than `staged_max_age_secs`, at startup and
//! then every `sweep_interval_secs`. Staged files still listed in a live
//! session's draft are kept.

use crate::db::sessions;
use crate::AppState;
use knmp_common::time::cutoff_secs_ago;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// What one sweep removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub staged_files: usize,
    pub sessions: u64,
}

/// Run one sweep
pub async fn sweep_once(state: &AppState) -> knmp_common::Result<SweepReport> {
    let max_age_secs = state.uploads.staged_max_age_secs;

    let sessions = sessions::purge_stale_sessions(&state.db, cutoff_secs_ago(max_age_secs)).await?;
    // Photos of sessions that are still active survive however old the file is
    let in_use = sessions::staged_names_in_use(&state.db).await?;
    let staged_files = state
        .staging
        .sweep(Duration::from_secs(max_age_secs), &in_use)
        .await?;

    if staged_files > 0 || sessions > 0 {
        info!(staged_files, sessions, "Swept abandoned wizard state");
    }

    Ok(SweepReport { staged_files, sessions })
}

/// Sweep now and then on the configured interval until the runtime stops
pub fn spawn_sweeper(state: AppState) -> JoinHandle<()> {
    let period = Duration::from_secs(state.uploads.sweep_interval_secs.max(1));

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            // First tick completes immediately
            interval.tick().await;
            if let Err(e) = sweep_once(&state).await {
                warn!("Stale staging sweep failed: {}", e);
            }
        }
    })
}
