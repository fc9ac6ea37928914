//! In-memory data store.

use super::{DataStore, QueryRequest, StoreError, StoreResult, StoredRecord};
use crate::model::{ElementId, ElementKind, Record};
use log::debug;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct MemState {
    last_id: ElementId,
    rows: BTreeMap<ElementId, (ElementKind, Record)>,
}

/// Process-local data store. Ids are assigned sequentially from 1.
#[derive(Debug)]
pub struct MemDataStore {
    open: AtomicBool,
    state: RwLock<MemState>,
}

impl MemDataStore {
    pub fn new() -> Self {
        Self {
            open: AtomicBool::new(true),
            state: RwLock::new(MemState::default()),
        }
    }

    /// Number of stored elements across all kinds.
    pub fn len(&self) -> usize {
        self.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.open.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(StoreError::Closed)
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, MemState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemDataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStore for MemDataStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    fn close(&self) {
        if self.open.swap(false, Ordering::AcqRel) {
            debug!("event=datastore_close module=datastore status=ok backend=memory");
        }
    }

    fn persist(
        &self,
        kind: ElementKind,
        id: Option<ElementId>,
        record: &Record,
    ) -> StoreResult<ElementId> {
        self.ensure_open()?;
        let mut state = self.write();

        let id = match id {
            Some(id) => {
                if let Some((stored_kind, _)) = state.rows.get(&id) {
                    if *stored_kind != kind {
                        return Err(StoreError::InvalidData(format!(
                            "id {id} belongs to {stored_kind}, not {kind}"
                        )));
                    }
                }
                state.last_id = state.last_id.max(id);
                id
            }
            None => {
                let last_id = state.last_id;
                let next = last_id.checked_add(1).ok_or_else(|| {
                    StoreError::InvalidData(format!("no {kind} id left after {last_id}"))
                })?;
                state.last_id = next;
                next
            }
        };

        state.rows.insert(id, (kind, record.clone()));
        Ok(id)
    }

    fn remove(&self, kind: ElementKind, id: ElementId) -> StoreResult<bool> {
        self.ensure_open()?;
        let mut state = self.write();
        match state.rows.get(&id) {
            Some((stored_kind, _)) if *stored_kind == kind => {
                state.rows.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn execute(&self, request: &QueryRequest) -> StoreResult<Vec<StoredRecord>> {
        self.ensure_open()?;
        let state = self.read();
        let matches = |(id, (kind, record)): (&ElementId, &(ElementKind, Record))| {
            (*kind == request.kind() && request.matches(*id, record)).then(|| StoredRecord {
                id: *id,
                record: record.clone(),
            })
        };

        let rows = match request.key() {
            Some(id) => state
                .rows
                .get_key_value(&id)
                .and_then(matches)
                .into_iter()
                .collect(),
            None => state.rows.iter().filter_map(matches).collect(),
        };
        Ok(rows)
    }
}
