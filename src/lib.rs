//! xpenses - expense and budget tracking over HTTP
//!
//! Clients create, list and delete expenses, and create, list, replace and
//! delete budgets. Records live in a [`store::RecordStore`], either in memory
//! or as JSON table files.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod records;
pub mod store;
pub mod summary;
