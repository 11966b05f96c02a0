//! # JSON File Backend
//!
//! A named table persisted as a JSON array at `<data_dir>/<table>.json`.
//! Every mutation rewrites the whole file through a temporary file and a rename,
//! so readers never observe a half-written table.

use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

use super::backend::{self, Record, RecordStore, Updatable, UpdatableStore};
use super::errors::{StoreError, StoreResult};

/// File-backed record store
#[derive(Debug)]
pub struct FileStore<T> {
    table: String,
    path: PathBuf,
    lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> FileStore<T> {
    /// Open (or lazily create) the table `name` under `data_dir`
    pub fn open(data_dir: &Path, table: impl Into<String>) -> StoreResult<Self> {
        let table = table.into();
        fs::create_dir_all(data_dir).map_err(|e| StoreError::Io {
            table: table.clone(),
            message: e.to_string(),
        })?;
        let path = data_dir.join(format!("{}.json", table));
        tracing::info!(table = %table, path = %path.display(), "opened file table");

        Ok(Self {
            table,
            path,
            lock: Mutex::new(()),
            _record: PhantomData,
        })
    }

    /// Location of the table file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> StoreResult<MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| StoreError::Poisoned(self.table.clone()))
    }

    fn io_error(&self, err: std::io::Error) -> StoreError {
        StoreError::Io {
            table: self.table.clone(),
            message: err.to_string(),
        }
    }

    fn load(&self) -> StoreResult<Vec<T>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
            table: self.table.clone(),
            message: e.to_string(),
        })
    }

    fn save(&self, rows: &[T]) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(rows)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }
}

impl<T: Record> RecordStore<T> for FileStore<T> {
    fn table(&self) -> &str {
        &self.table
    }

    fn insert(&self, draft: T::Draft) -> StoreResult<T> {
        let _guard = self.guard()?;
        let mut rows = self.load()?;
        let record = backend::insert_into(&mut rows, draft);
        self.save(&rows)?;
        tracing::debug!(table = %self.table, id = record.id(), "inserted record");
        Ok(record)
    }

    fn scan(&self) -> StoreResult<Vec<T>> {
        let _guard = self.guard()?;
        self.load()
    }

    fn query(&self, field: &str, value: &Value) -> StoreResult<Vec<T>> {
        let _guard = self.guard()?;
        backend::filter_in(&self.load()?, field, value)
    }

    fn get(&self, id: &str) -> StoreResult<Option<T>> {
        let _guard = self.guard()?;
        Ok(backend::find_in(&self.load()?, id))
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        let _guard = self.guard()?;
        let mut rows = self.load()?;
        let removed = backend::delete_from(&mut rows, id);
        if removed {
            self.save(&rows)?;
        }
        tracing::debug!(table = %self.table, id, removed, "deleted record");
        Ok(removed)
    }
}

impl<T: Updatable> UpdatableStore<T> for FileStore<T> {
    fn update(&self, id: &str, patch: T::Patch) -> StoreResult<T> {
        let _guard = self.guard()?;
        let mut rows = self.load()?;
        let record = backend::update_in(&mut rows, id, patch)?;
        self.save(&rows)?;
        tracing::debug!(table = %self.table, id, "updated record");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Expense, ExpenseDraft};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn draft(budget_item_id: &str, cents: i64) -> ExpenseDraft {
        ExpenseDraft {
            budget_item_id: budget_item_id.to_string(),
            expense_date: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            description: "Scarf".to_string(),
            amount: Decimal::new(cents, 2),
            recipient: String::new(),
            category: None,
        }
    }

    #[test]
    fn test_missing_file_is_empty_table() {
        let tmp = TempDir::new().unwrap();
        let store: FileStore<Expense> = FileStore::open(tmp.path(), "XmasExpenses").unwrap();

        assert!(store.scan().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_records_survive_reopen() {
        let tmp = TempDir::new().unwrap();
        let created = {
            let store: FileStore<Expense> = FileStore::open(tmp.path(), "XmasExpenses").unwrap();
            store.insert(draft("b1", 1999)).unwrap()
        };

        let reopened: FileStore<Expense> = FileStore::open(tmp.path(), "XmasExpenses").unwrap();
        let found = reopened.get(&created.id).unwrap().unwrap();
        assert_eq!(found.amount, Decimal::new(1999, 2));
        assert_eq!(found.created_at, created.created_at);
    }

    #[test]
    fn test_query_by_budget_item() {
        let tmp = TempDir::new().unwrap();
        let store: FileStore<Expense> = FileStore::open(tmp.path(), "XmasExpenses").unwrap();
        store.insert(draft("b1", 100)).unwrap();
        store.insert(draft("b2", 200)).unwrap();
        store.insert(draft("b1", 300)).unwrap();

        let hits = store.query("budgetItemId", &Value::from("b1")).unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|e| e.budget_item_id == "b1"));
    }

    #[test]
    fn test_delete_missing_leaves_table_untouched() {
        let tmp = TempDir::new().unwrap();
        let store: FileStore<Expense> = FileStore::open(tmp.path(), "XmasExpenses").unwrap();
        store.insert(draft("b1", 100)).unwrap();

        assert!(!store.delete("nope").unwrap());
        assert_eq!(store.scan().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("XmasExpenses.json"), b"{not json").unwrap();
        let store: FileStore<Expense> = FileStore::open(tmp.path(), "XmasExpenses").unwrap();

        let err = store.scan().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn test_amounts_reload_exactly() {
        let tmp = TempDir::new().unwrap();
        let amounts: Vec<Decimal> = [
            "1234567890.123456789",
            "99999999999999999.99",
            "0.1",
        ]
        .iter()
        .map(|a| a.parse().unwrap())
        .chain([Decimal::MAX])
        .collect();

        {
            let store: FileStore<Expense> = FileStore::open(tmp.path(), "XmasExpenses").unwrap();
            for amount in &amounts {
                let mut d = draft("b1", 0);
                d.amount = *amount;
                store.insert(d).unwrap();
            }
        }

        let reopened: FileStore<Expense> = FileStore::open(tmp.path(), "XmasExpenses").unwrap();
        let stored: Vec<Decimal> = reopened.scan().unwrap().into_iter().map(|e| e.amount).collect();
        assert_eq!(stored, amounts);
    }

    #[test]
    fn test_updates_persist() {
        use crate::records::{Budget, BudgetDraft};

        let tmp = TempDir::new().unwrap();
        let store: FileStore<Budget> = FileStore::open(tmp.path(), "XmasBudgets").unwrap();
        let budget = store
            .insert(BudgetDraft {
                year: 2024,
                name: "Gifts".into(),
                expense_type: "retail".into(),
                budget_amount: Decimal::new(500, 0),
            })
            .unwrap();

        store
            .update(
                &budget.id,
                BudgetDraft {
                    year: 2024,
                    name: "Gifts".into(),
                    expense_type: "retail".into(),
                    budget_amount: "600.01".parse().unwrap(),
                },
            )
            .unwrap();

        let reopened: FileStore<Budget> = FileStore::open(tmp.path(), "XmasBudgets").unwrap();
        let found = reopened.get(&budget.id).unwrap().unwrap();
        assert_eq!(found.budget_amount, Decimal::new(60001, 2));
        assert_eq!(found.created_at, budget.created_at);
    }
}
