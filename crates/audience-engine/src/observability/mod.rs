//! Tracing setup, span helpers, and degradation tracking.

pub mod degradation;
pub mod spans;

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use audience_core::config::ObservabilityConfig;
use audience_core::constants::LOG_ENV_VAR;

pub use degradation::{DegradationTracker, RecoveryStatus, TrackedDegradation, MAX_TRACKED};

static INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// The filter comes from `AUDIENCE_LOG` (e.g. `audience_index=debug,info`),
/// falling back to `config.log_level`. Idempotent: only the first call
/// installs anything, and an already-installed global subscriber is left alone.
pub fn init_tracing(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

        let result = if config.json {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter)
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true))
                .with(filter)
                .try_init()
        };
        if result.is_err() {
            tracing::debug!("global subscriber already installed");
        }
    });
}
