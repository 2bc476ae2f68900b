//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Isoscope tracing/logging system.
///
/// Reads `ISOSCOPE_LOG` for per-subsystem log levels.
/// Format: `ISOSCOPE_LOG=isoscope_analysis::forest=debug,isoscope_analysis::service=info`
///
/// Falls back to `isoscope=info` if `ISOSCOPE_LOG` is not set or is invalid.
///
/// Idempotent. A subscriber installed elsewhere first is left in place.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("ISOSCOPE_LOG")
            .unwrap_or_else(|_| EnvFilter::new("isoscope=info"));

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
