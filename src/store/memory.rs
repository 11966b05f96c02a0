//! # In-Memory Backend
//!
//! Process-local table. Contents are lost on restart.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;

use super::backend::{self, Record, RecordStore, Updatable, UpdatableStore};
use super::errors::{StoreError, StoreResult};

/// In-memory record store
#[derive(Debug)]
pub struct MemoryStore<T> {
    table: String,
    rows: RwLock<Vec<T>>,
}

impl<T: Record> MemoryStore<T> {
    /// Create an empty in-memory table
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            rows: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<T>>> {
        self.rows
            .read()
            .map_err(|_| StoreError::Poisoned(self.table.clone()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<T>>> {
        self.rows
            .write()
            .map_err(|_| StoreError::Poisoned(self.table.clone()))
    }
}

impl<T: Record> RecordStore<T> for MemoryStore<T> {
    fn table(&self) -> &str {
        &self.table
    }

    fn insert(&self, draft: T::Draft) -> StoreResult<T> {
        let mut rows = self.write()?;
        let record = backend::insert_into(&mut rows, draft);
        tracing::debug!(table = %self.table, id = record.id(), "inserted record");
        Ok(record)
    }

    fn scan(&self) -> StoreResult<Vec<T>> {
        Ok(self.read()?.clone())
    }

    fn query(&self, field: &str, value: &Value) -> StoreResult<Vec<T>> {
        backend::filter_in(&self.read()?, field, value)
    }

    fn get(&self, id: &str) -> StoreResult<Option<T>> {
        Ok(backend::find_in(&self.read()?, id))
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut rows = self.write()?;
        let removed = backend::delete_from(&mut rows, id);
        tracing::debug!(table = %self.table, id, removed, "deleted record");
        Ok(removed)
    }
}

impl<T: Updatable> UpdatableStore<T> for MemoryStore<T> {
    fn update(&self, id: &str, patch: T::Patch) -> StoreResult<T> {
        let mut rows = self.write()?;
        let record = backend::update_in(&mut rows, id, patch)?;
        tracing::debug!(table = %self.table, id, "updated record");
        Ok(record)
    }
}
