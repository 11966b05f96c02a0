//! # Record Store
//!
//! Keyed collections of records behind the [`RecordStore`] trait.
//!
//! - [`MemoryStore`] keeps rows in process memory
//! - [`FileStore`] persists each table as a JSON file

pub mod backend;
pub mod errors;
pub mod file;
pub mod memory;

pub use backend::{Record, RecordStore, Updatable, UpdatableStore};
pub use errors::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
