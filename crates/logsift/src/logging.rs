//! Diagnostic logging for logsift
//!
//! Diagnostics go to stderr so a report on stdout stays machine-readable.
//! `LOGSIFT_LOG` (EnvFilter syntax) wins over the `-v` count.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an explicit filter, e.g. `logsift_common=debug`
pub const LOG_ENV: &str = "LOGSIFT_LOG";

/// Filter used when `LOGSIFT_LOG` is unset
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
