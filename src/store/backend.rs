//! # Record Store Trait
//!
//! A record store is a keyed collection of one record type. Identity (`id`) and
//! creation time are assigned by the store on insert and never change afterwards.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};

/// A record type that can live in a [`RecordStore`]
pub trait Record: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Validated client input for a new record
    type Draft: Send;

    /// Human readable record kind, used in error messages
    const KIND: &'static str;

    /// Build a stored record from a draft and its server-assigned identity
    fn from_draft(id: String, created_at: DateTime<Utc>, draft: Self::Draft) -> Self;

    fn id(&self) -> &str;
}

/// A record whose mutable fields can be replaced in place
pub trait Updatable: Record {
    /// Replacement fields accepted by [`UpdatableStore::update`]
    type Patch: Send;

    /// Replace mutable fields. Must leave `id` and `created_at` untouched.
    fn apply(&mut self, patch: Self::Patch);
}

/// Backend trait for record storage
pub trait RecordStore<T: Record>: Send + Sync + fmt::Debug {
    /// Table name this store reads and writes
    fn table(&self) -> &str;

    /// Assign a fresh id and creation time, persist, return the stored record
    fn insert(&self, draft: T::Draft) -> StoreResult<T>;

    /// All records, in insertion order
    fn scan(&self) -> StoreResult<Vec<T>>;

    /// All records whose serialized `field` equals `value`
    fn query(&self, field: &str, value: &Value) -> StoreResult<Vec<T>>;

    /// Point lookup by id
    fn get(&self, id: &str) -> StoreResult<Option<T>>;

    /// Remove a record. Returns whether anything was removed; a missing id is not an error.
    fn delete(&self, id: &str) -> StoreResult<bool>;
}

/// Record store that also supports in-place replacement
pub trait UpdatableStore<T: Updatable>: RecordStore<T> {
    /// Replace fields of an existing record. Missing ids are `StoreError::NotFound`.
    fn update(&self, id: &str, patch: T::Patch) -> StoreResult<T>;
}

/// Generate the identity for a new record
pub(crate) fn new_identity() -> (String, DateTime<Utc>) {
    (Uuid::new_v4().to_string(), Utc::now())
}

// ==================
// Table operations shared by backends
// ==================

pub(crate) fn insert_into<T: Record>(rows: &mut Vec<T>, draft: T::Draft) -> T {
    let (id, created_at) = new_identity();
    let record = T::from_draft(id, created_at, draft);
    rows.push(record.clone());
    record
}

pub(crate) fn find_in<T: Record>(rows: &[T], id: &str) -> Option<T> {
    rows.iter().find(|r| r.id() == id).cloned()
}

pub(crate) fn filter_in<T: Record>(rows: &[T], field: &str, value: &Value) -> StoreResult<Vec<T>> {
    let mut matches = Vec::new();
    for row in rows {
        let doc = serde_json::to_value(row)?;
        if doc.get(field) == Some(value) {
            matches.push(row.clone());
        }
    }
    Ok(matches)
}

pub(crate) fn update_in<T: Updatable>(rows: &mut [T], id: &str, patch: T::Patch) -> StoreResult<T> {
    let row = rows
        .iter_mut()
        .find(|r| r.id() == id)
        .ok_or_else(|| StoreError::not_found(T::KIND, id))?;
    row.apply(patch);
    Ok(row.clone())
}

pub(crate) fn delete_from<T: Record>(rows: &mut Vec<T>, id: &str) -> bool {
    let before = rows.len();
    rows.retain(|r| r.id() != id);
    rows.len() != before
}
