//! Geocode cache schema migrations.
//!
//! # Responsibility
//! - List the `geocode_cache` schema steps.
//! - Bring an older cache file up to date in one transaction.
//!
//! # Invariants
//! - Step versions ascend; a cache at version N has run steps 1..=N.
//! - `PRAGMA user_version` always holds the last step run.

use crate::db::{DbError, DbResult};
use log::debug;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    sql: include_str!("0001_geocode_cache.sql"),
}];

/// Cache schema version written by this build.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Runs every schema step newer than the cache's `user_version`.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the cache was written by a newer build.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let cache_version = cache_schema_version(conn)?;
    let latest = latest_version();
    if cache_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: cache_version,
            latest_supported: latest,
        });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > cache_version)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in &pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
    }
    tx.commit()?;
    debug!(
        "event=cache_migrate module=db status=ok from_version={} to_version={} steps={}",
        cache_version,
        latest,
        pending.len()
    );
    Ok(())
}

fn cache_schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
