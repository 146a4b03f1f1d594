//! Ordered schema upgrades for the `goals` table.
//!
//! Each step runs in its own transaction together with its `user_version`
//! bump, so a failed step leaves the file at the last good version.

use crate::db::{schema_version, DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;

/// `(version, sql)` pairs, versions strictly increasing from 1.
const STEPS: &[(u32, &str)] = &[(1, include_str!("0001_init.sql"))];

/// Newest schema version this build can write.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |&(version, _)| version)
}

/// Brings `conn` up to `latest_version()`.
///
/// # Errors
/// - `SchemaTooNew` when the file is ahead of this build.
/// - `Migration` naming the first step that failed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    for &(version, sql) in STEPS.iter().filter(|&&(version, _)| version > found) {
        if let Err(source) = run_step(conn, version, sql) {
            error!("event=db_migrate module=db status=error version={version} error={source}");
            return Err(DbError::Migration { version, source });
        }
        info!("event=db_migrate module=db status=ok version={version}");
    }
    Ok(())
}

fn run_step(conn: &mut Connection, version: u32, sql: &str) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(sql)?;
    tx.pragma_update(None, "user_version", version)?;
    tx.commit()
}

#[cfg(test)]
mod tests {
    use super::STEPS;

    #[test]
    fn step_versions_increase_from_one() {
        let versions: Vec<u32> = STEPS.iter().map(|&(version, _)| version).collect();
        let expected: Vec<u32> = (1..=versions.len() as u32).collect();
        assert_eq!(versions, expected);
    }
}
