//! `laravel_encrypt`: encrypt / decrypt Laravel encrypted strings from stdin.
//!
//! Thin shell over `laravel-encrypt-core`: flag parsing, stdin / stdout
//! handling, logging, and exit codes. All cryptography lives in the core.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod config;
pub mod error;
pub mod io;
pub mod logging;

use std::io::{Read, Write};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use laravel_encrypt_core::{disable_core_dumps, AppKey, EncrypterError};
use zeroize::Zeroizing;

pub use config::{Cli, Config, Mode};
pub use error::CliError;

/// Input and output streams plus whether each is attached to a pipe.
pub struct Streams<R, W> {
    pub input: R,
    pub input_piped: bool,
    pub output: W,
    pub output_piped: bool,
}

/// Parse the process arguments, run, and map the outcome to an exit code.
#[must_use]
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logging::init(cli.verbose) {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }
    if let Err(err) = disable_core_dumps() {
        tracing::warn!(error = %err, "could not disable core dumps");
    }

    let streams = Streams {
        input: std::io::stdin().lock(),
        input_piped: io::is_input_piped(),
        output: std::io::stdout().lock(),
        output_piped: io::is_output_piped(),
    };

    match execute(&cli, streams) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("Error: {err}");
            if err.shows_usage() {
                eprintln!("{}", Cli::command().render_usage());
            }
            ExitCode::FAILURE
        }
    }
}

/// Run one command against the given streams.
///
/// # Errors
///
/// Returns a `CliError` for missing or invalid keys, a terminal on stdin,
/// I/O failures, and any encryption or decryption failure.
pub fn execute<R: Read, W: Write>(cli: &Cli, mut streams: Streams<R, W>) -> Result<(), CliError> {
    let newline = !cli.raw && !streams.output_piped;

    if cli.generate_key {
        let key = AppKey::generate()?;
        let encoded = Zeroizing::new(key.to_env_string());
        tracing::debug!("generated application key");
        return io::write_output(&mut streams.output, encoded.as_bytes(), newline);
    }

    let config = Config::from_cli(cli)?;
    if !streams.input_piped {
        return Err(CliError::NoStdin);
    }

    let input = io::read_input(&mut streams.input, config.raw)?;
    tracing::debug!(
        mode = ?config.mode,
        cipher = %config.encrypter.cipher(),
        serialize = config.serialize,
        input_len = input.len(),
        "processing input"
    );

    match config.mode {
        Mode::Encrypt => {
            let wire = if config.serialize {
                config.encrypter.encrypt_serialized(&input)?
            } else {
                config.encrypter.encrypt(&input)?
            };
            io::write_output(&mut streams.output, wire.as_bytes(), newline)
        }
        Mode::Decrypt => {
            let wire = std::str::from_utf8(&input).map_err(|_| {
                EncrypterError::MalformedPayload("input is not valid UTF-8".to_owned())
            })?;
            let plaintext = if config.serialize {
                config.encrypter.decrypt_serialized(wire)?
            } else {
                config.encrypter.decrypt(wire)?
            };
            tracing::debug!(output_len = plaintext.len(), "decrypted payload");
            io::write_output(&mut streams.output, plaintext.expose(), newline)
        }
    }
}
