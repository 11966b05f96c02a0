//! Record Store Invariant Tests
//!
//! The same contract is checked against every backend:
//! - ids are fresh and never reused
//! - id and created_at survive updates
//! - delete is idempotent
//! - secondary-key queries return exactly the matching subset

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde_json::Value;
use tempfile::TempDir;

use xpenses::records::{Budget, BudgetDraft};
use xpenses::store::{FileStore, MemoryStore, RecordStore, UpdatableStore};

// =============================================================================
// Helper Functions
// =============================================================================

fn draft(year: i32, name: &str, amount: i64) -> BudgetDraft {
    BudgetDraft {
        year,
        name: name.to_string(),
        expense_type: "Gifts".to_string(),
        budget_amount: Decimal::new(amount, 0),
    }
}

/// Run `check` against a fresh memory store and a fresh file store
fn for_each_backend(check: impl Fn(&dyn UpdatableStore<Budget>)) {
    let memory: MemoryStore<Budget> = MemoryStore::new("XmasBudgets");
    check(&memory);

    let tmp = TempDir::new().unwrap();
    let file: FileStore<Budget> = FileStore::open(tmp.path(), "XmasBudgets").unwrap();
    check(&file);
}

// =============================================================================
// Invariants
// =============================================================================

#[test]
fn test_ids_are_unique() {
    for_each_backend(|store| {
        let ids: HashSet<String> = (0..50)
            .map(|i| store.insert(draft(2024, &format!("b{}", i), i)).unwrap().id)
            .collect();
        assert_eq!(ids.len(), 50);
    });
}

#[test]
fn test_survivors_after_deletes() {
    for_each_backend(|store| {
        let created: Vec<String> = (0..6)
            .map(|i| store.insert(draft(2024, "x", i)).unwrap().id)
            .collect();
        for id in created.iter().step_by(2) {
            assert!(store.delete(id).unwrap());
        }

        let remaining: HashSet<String> = store.scan().unwrap().into_iter().map(|b| b.id).collect();
        let expected: HashSet<String> = created.iter().skip(1).step_by(2).cloned().collect();
        assert_eq!(remaining, expected);
    });
}

#[test]
fn test_update_preserves_identity() {
    for_each_backend(|store| {
        let original = store.insert(draft(2024, "Gifts", 500)).unwrap();
        let updated = store.update(&original.id, draft(2025, "Food", 600)).unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(store.get(&original.id).unwrap(), Some(updated));
    });
}

#[test]
fn test_update_missing_is_not_found() {
    for_each_backend(|store| {
        let err = store.update("ghost", draft(2024, "x", 1)).unwrap_err();
        assert!(err.is_not_found());
        assert!(store.scan().unwrap().is_empty());
    });
}

#[test]
fn test_delete_missing_changes_nothing() {
    for_each_backend(|store| {
        store.insert(draft(2024, "keep", 1)).unwrap();
        assert!(!store.delete("ghost").unwrap());
        assert_eq!(store.scan().unwrap().len(), 1);
    });
}

#[test]
fn test_year_query_is_exact() {
    for_each_backend(|store| {
        store.insert(draft(2023, "a", 1)).unwrap();
        store.insert(draft(2024, "b", 1)).unwrap();
        store.insert(draft(2024, "c", 1)).unwrap();

        let hits = store.query(Budget::YEAR_FIELD, &Value::from(2024)).unwrap();
        let names: HashSet<String> = hits.into_iter().map(|b| b.name).collect();
        assert_eq!(names, HashSet::from(["b".to_string(), "c".to_string()]));

        assert!(store.query(Budget::YEAR_FIELD, &Value::from("2024")).unwrap().is_empty());
    });
}
