//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "opsim_core=info,opsim_analysis=info";

/// Install the fmt subscriber, filtered by `OPSIM_LOG`.
///
/// Useful targets:
/// - `opsim_analysis::projection`: the `scenario_batch` span, one `warn` per
///   failed combination, and per-projection seeds at `debug`
/// - `opsim_analysis::processing`: the `processing` span and report sizes
/// - `opsim_core::config`: unreadable user config and bad env overrides
///
/// Without a valid `OPSIM_LOG` both crates log at `info`. A subscriber
/// installed elsewhere first is left in place.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("OPSIM_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
