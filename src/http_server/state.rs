//! Shared handler state
//!
//! Stores are injected here at construction time; handlers hold nothing else.
//!
//! Store calls are synchronous and the file backend touches disk, so handlers
//! run them on the blocking pool through [`ApiState::with_expenses`] and
//! [`ApiState::with_budgets`].

use std::sync::Arc;

use tracing::info;

use super::config::{ServerConfig, StorageBackendKind};
use super::errors::{ApiError, ApiResult};
use crate::records::{Budget, Expense};
use crate::store::{FileStore, MemoryStore, RecordStore, StoreResult, UpdatableStore};

/// Record stores shared across handlers
#[derive(Clone)]
pub struct ApiState {
    pub expenses: Arc<dyn RecordStore<Expense>>,
    pub budgets: Arc<dyn UpdatableStore<Budget>>,
}

impl ApiState {
    pub fn new(
        expenses: Arc<dyn RecordStore<Expense>>,
        budgets: Arc<dyn UpdatableStore<Budget>>,
    ) -> Self {
        Self { expenses, budgets }
    }

    /// Run `op` against the expense store on the blocking pool
    pub async fn with_expenses<R, F>(&self, op: F) -> ApiResult<R>
    where
        F: FnOnce(&dyn RecordStore<Expense>) -> StoreResult<R> + Send + 'static,
        R: Send + 'static,
    {
        let store = Arc::clone(&self.expenses);
        blocking(move || op(store.as_ref())).await
    }

    /// Run `op` against the budget store on the blocking pool
    pub async fn with_budgets<R, F>(&self, op: F) -> ApiResult<R>
    where
        F: FnOnce(&dyn UpdatableStore<Budget>) -> StoreResult<R> + Send + 'static,
        R: Send + 'static,
    {
        let store = Arc::clone(&self.budgets);
        blocking(move || op(store.as_ref())).await
    }

    /// Empty in-memory tables with the default names
    pub fn in_memory() -> Self {
        let tables = ServerConfig::default().tables;
        Self::new(
            Arc::new(MemoryStore::new(tables.expenses)),
            Arc::new(MemoryStore::new(tables.budgets)),
        )
    }

    /// Open the stores selected by `config`
    pub fn from_config(config: &ServerConfig) -> StoreResult<Self> {
        let tables = &config.tables;
        let state = match config.storage.backend {
            StorageBackendKind::Memory => Self::new(
                Arc::new(MemoryStore::new(tables.expenses.clone())),
                Arc::new(MemoryStore::new(tables.budgets.clone())),
            ),
            StorageBackendKind::File => {
                let dir = &config.storage.data_dir;
                Self::new(
                    Arc::new(FileStore::open(dir, tables.expenses.clone())?),
                    Arc::new(FileStore::open(dir, tables.budgets.clone())?),
                )
            }
        };
        info!(
            backend = ?config.storage.backend,
            expenses = state.expenses.table(),
            budgets = state.budgets.table(),
            "record stores ready"
        );
        Ok(state)
    }
}

async fn blocking<R, F>(op: F) -> ApiResult<R>
where
    F: FnOnce() -> StoreResult<R> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::from)
}
