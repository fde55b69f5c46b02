//! Wizard session persistence
//!
//! One row per visitor session holding the serialized `WizardState`.

use crate::wizard::WizardState;
use chrono::{DateTime, Utc};
use knmp_common::{Error, Result};
use sqlx::SqlitePool;
use std::collections::HashSet;
use tracing::warn;
use uuid::Uuid;

/// Load the wizard state for a session
///
/// A row that no longer deserializes is treated as absent so the visitor
/// restarts at step 1 instead of being stuck.
pub async fn load_wizard_state(pool: &SqlitePool, session_id: Uuid) -> Result<Option<WizardState>> {
    let state_json: Option<String> =
        sqlx::query_scalar("SELECT state FROM wizard_sessions WHERE session_id = ?")
            .bind(session_id.to_string())
            .fetch_optional(pool)
            .await?;

    let Some(state_json) = state_json else {
        return Ok(None);
    };

    match serde_json::from_str(&state_json) {
        Ok(state) => Ok(Some(state)),
        Err(e) => {
            warn!(%session_id, "Discarding unreadable wizard state: {}", e);
            Ok(None)
        }
    }
}

/// Insert or replace the wizard state for a session
pub async fn save_wizard_state(pool: &SqlitePool, session_id: Uuid, state: &WizardState) -> Result<()> {
    let state_json = serde_json::to_string(state)
        .map_err(|e| Error::Serialization(format!("wizard state: {}", e)))?;
    let now = knmp_common::time::now();

    sqlx::query(
        r#"
        INSERT INTO wizard_sessions (session_id, state, created_at, updated_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(session_id) DO UPDATE SET
            state = excluded.state,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(session_id.to_string())
    .bind(&state_json)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn delete_wizard_state(pool: &SqlitePool, session_id: Uuid) -> Result<()> {
    sqlx::query("DELETE FROM wizard_sessions WHERE session_id = ?")
        .bind(session_id.to_string())
        .execute(pool)
        .await?;

    Ok(())
}

/// Delete sessions not updated since `cutoff`; returns the number removed
pub async fn purge_stale_sessions(pool: &SqlitePool, cutoff: DateTime<Utc>) -> Result<u64> {
    let result = sqlx::query("DELETE FROM wizard_sessions WHERE updated_at < ?")
        .bind(cutoff)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Staged file names referenced by any stored session
///
/// Unreadable rows reference nothing.
pub async fn staged_names_in_use(pool: &SqlitePool) -> Result<HashSet<String>> {
    let rows: Vec<String> = sqlx::query_scalar("SELECT state FROM wizard_sessions")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .iter()
        .filter_map(|json| serde_json::from_str::<WizardState>(json).ok())
        .flat_map(|state| state.draft.staged_names())
        .collect())
}
