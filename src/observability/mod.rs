//! Observability for the expense API
//!
//! Logging goes through `tracing`. Handlers and stores emit events; the binary
//! installs a `tracing-subscriber` formatter once at startup.
//!
//! # Usage
//!
//! ```ignore
//! use xpenses::observability::init_tracing;
//!
//! init_tracing();
//! tracing::info!(table = "XmasBudgets", "opened");
//! ```

mod logging;

pub use logging::{init_tracing, DEFAULT_FILTER};
