//! Ordered schema scripts for the `elements` table.
//!
//! Versions are strictly increasing; each script runs at most once per
//! database and the upgrade is all-or-nothing.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, Transaction};

/// `(version, script)` pairs in application order.
const SCRIPTS: &[(u32, &str)] = &[
    (1, include_str!("0001_elements.sql")),
    (2, include_str!("0002_element_kind_index.sql")),
];

/// Newest schema version this build can read and write.
pub fn latest_version() -> u32 {
    SCRIPTS.last().map_or(0, |(version, _)| *version)
}

/// Reads the schema version recorded in `conn`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Upgrades `conn` to `latest_version()`.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the database is newer than this build.
/// - `Migration` when a script fails; nothing is applied in that case.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from = schema_version(conn)?;
    let latest = latest_version();
    if from > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: latest,
        });
    }

    let pending: Vec<(u32, &str)> = SCRIPTS
        .iter()
        .copied()
        .filter(|(version, _)| *version > from)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, script) in pending {
        run_script(&tx, version, script)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from} to_version={latest}");
    Ok(())
}

fn run_script(tx: &Transaction<'_>, version: u32, script: &str) -> DbResult<()> {
    tx.execute_batch(script)
        .and_then(|()| tx.pragma_update(None, "user_version", version))
        .map_err(|source| DbError::Migration { version, source })
}
