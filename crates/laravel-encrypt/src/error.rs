//! Error types for the `laravel_encrypt` command.

use laravel_encrypt_core::EncrypterError;
use thiserror::Error;

/// Everything that can stop the command, mapped to a message on stderr and
/// exit status 1.
#[derive(Debug, Error)]
pub enum CliError {
    /// Neither `--app_key` nor `APP_KEY` was given.
    #[error("required flag(s) \"app_key\" not set")]
    MissingKey,

    /// Stdin is a terminal rather than a pipe or file.
    #[error("No stdin received")]
    NoStdin,

    /// Reading the input stream failed.
    #[error("failed to read input: {0}")]
    Read(#[source] std::io::Error),

    /// Writing the result failed.
    #[error("failed to write output: {0}")]
    Write(#[source] std::io::Error),

    /// The tracing subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(String),

    /// Key validation, encryption or decryption failed.
    #[error(transparent)]
    Encrypter(#[from] EncrypterError),
}

impl CliError {
    /// Whether the error is followed by the usage text.
    #[must_use]
    pub const fn shows_usage(&self) -> bool {
        matches!(self, Self::MissingKey | Self::NoStdin)
    }
}
