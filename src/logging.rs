//! Tracing initialization for the `diagcat` binary.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding per-target log directives, e.g. `DIAGCAT_LOG=diagcat=debug`.
pub const LOG_ENV_VAR: &str = "DIAGCAT_LOG";

const DEFAULT_DIRECTIVES: &str = "diagcat=warn";

static INIT: Once = Once::new();

/// Install a stderr subscriber filtered by `DIAGCAT_LOG`.
///
/// Falls back to `diagcat=warn` when the variable is unset or invalid.
/// Calling it more than once has no further effect.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .without_time(),
            )
            .with(filter)
            .init();
    });
}
