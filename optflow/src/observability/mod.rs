//! Structured logging setup.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initializes the global tracing subscriber.
///
/// Filter directives come from `OPTFLOW_LOG` (falling back to the given
/// default, e.g. `"info"`). Safe to call more than once; only the first
/// call installs a subscriber.
pub fn init_tracing(default_filter: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("OPTFLOW_LOG")
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_tracing("info");
        init_tracing("debug");
    }
}
