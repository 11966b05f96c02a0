//! Structured logging setup
//!
//! `RUST_LOG` takes precedence; otherwise only this crate logs, at `info`.
//! Request spans from tower-http show up with `RUST_LOG=xpenses=info,tower_http=debug`.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Default filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "xpenses=info";

/// Install the global tracing subscriber. Later calls are no-ops.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // A subscriber may already be installed by an embedding program or a test harness.
        let _ = fmt().with_env_filter(filter).with_target(true).try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_tracing();
        init_tracing();
        tracing::info!("still logging");
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(DEFAULT_FILTER.parse::<EnvFilter>().is_ok());
    }

    #[test]
    fn test_default_filter_is_crate_info_only() {
        assert_eq!(DEFAULT_FILTER, "xpenses=info");
    }
}
