//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout carries only the result. `RUST_LOG` overrides
//! the default level. Nothing logged here or by callers includes key
//! material, plaintext or ciphertext.

use tracing_subscriber::EnvFilter;

use crate::error::CliError;

/// Default filter: warnings only, or debug with `--verbose`.
#[must_use]
pub const fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns `CliError::Logging` if a subscriber has already been set.
pub fn init(verbose: bool) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}
