//! Tracing setup for the RTSC binaries.
//!
//! Log lines go to stderr so stdout stays reserved for JSON results. The
//! default filter only lets `error` events through, which keeps a failing
//! command's stderr a single JSON error payload; `RTSC_LOG=warn` or finer
//! opts into diagnostics.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "RTSC_LOG";

/// Filter used when `RTSC_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "error";

/// Installs a plain-text stderr fmt subscriber filtered by `RTSC_LOG`
/// (default [`DEFAULT_FILTER`]).
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init();
}
