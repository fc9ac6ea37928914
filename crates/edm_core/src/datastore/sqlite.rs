//! SQLite-backed data store.
//!
//! # Responsibility
//! - Persist element records as JSON bodies in the `elements` table.
//! - Serve selector queries; key lookups are answered by primary key.
//!
//! # Invariants
//! - The connection is migrated before the store is constructed.
//! - Access to the connection is serialized behind one mutex.

use super::{DataStore, QueryRequest, StoreError, StoreResult, StoredRecord};
use crate::db::{open_db, open_db_in_memory};
use crate::model::{ElementId, ElementKind, Record};
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub struct SqliteDataStore {
    conn: Mutex<Option<Connection>>,
}

impl SqliteDataStore {
    /// Opens (or creates) a database file.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps a connection already bootstrapped by `db::open_db*`.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(Some(conn)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Connection>> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_conn<T>(&self, op: impl FnOnce(&Connection) -> StoreResult<T>) -> StoreResult<T> {
        let guard = self.lock();
        let conn = guard.as_ref().ok_or(StoreError::Closed)?;
        op(conn)
    }
}

impl DataStore for SqliteDataStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    fn close(&self) {
        let Some(conn) = self.lock().take() else {
            return;
        };
        match conn.close() {
            Ok(()) => debug!("event=datastore_close module=datastore status=ok backend=sqlite"),
            Err((_, err)) => error!(
                "event=datastore_close module=datastore status=error backend=sqlite error={err}"
            ),
        }
    }

    fn persist(
        &self,
        kind: ElementKind,
        id: Option<ElementId>,
        record: &Record,
    ) -> StoreResult<ElementId> {
        let body = serde_json::to_string(record)?;
        self.with_conn(|conn| {
            let Some(id) = id else {
                conn.execute(
                    "INSERT INTO elements (kind, body) VALUES (?1, ?2);",
                    params![kind.as_str(), body],
                )?;
                return Ok(conn.last_insert_rowid());
            };

            let stored_kind: Option<String> = conn
                .query_row("SELECT kind FROM elements WHERE id = ?1;", [id], |row| {
                    row.get(0)
                })
                .optional()?;
            match stored_kind {
                Some(stored) if stored == kind.as_str() => {
                    conn.execute(
                        "UPDATE elements
                         SET body = ?2, updated_at = (strftime('%s', 'now') * 1000)
                         WHERE id = ?1;",
                        params![id, body],
                    )?;
                }
                Some(stored) => {
                    return Err(StoreError::InvalidData(format!(
                        "id {id} belongs to {stored}, not {kind}"
                    )));
                }
                None => {
                    conn.execute(
                        "INSERT INTO elements (id, kind, body) VALUES (?1, ?2, ?3);",
                        params![id, kind.as_str(), body],
                    )?;
                }
            }
            Ok(id)
        })
    }

    fn remove(&self, kind: ElementKind, id: ElementId) -> StoreResult<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "DELETE FROM elements WHERE id = ?1 AND kind = ?2;",
                params![id, kind.as_str()],
            )?;
            Ok(changed > 0)
        })
    }

    fn execute(&self, request: &QueryRequest) -> StoreResult<Vec<StoredRecord>> {
        self.with_conn(|conn| {
            let rows: Vec<(ElementId, String)> = match request.key() {
                Some(id) => conn
                    .query_row(
                        "SELECT id, body FROM elements WHERE kind = ?1 AND id = ?2;",
                        params![request.kind().as_str(), id],
                        |row| Ok((row.get(0)?, row.get(1)?)),
                    )
                    .optional()?
                    .into_iter()
                    .collect(),
                None => {
                    let mut stmt = conn.prepare(
                        "SELECT id, body FROM elements WHERE kind = ?1 ORDER BY id ASC;",
                    )?;
                    let mapped = stmt.query_map([request.kind().as_str()], |row| {
                        Ok((row.get(0)?, row.get(1)?))
                    })?;
                    mapped.collect::<Result<_, _>>()?
                }
            };

            let mut matched = Vec::new();
            for (id, body) in rows {
                let record: Record = serde_json::from_str(&body)?;
                if request.matches(id, &record) {
                    matched.push(StoredRecord { id, record });
                }
            }
            Ok(matched)
        })
    }
}
