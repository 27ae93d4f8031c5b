//! Command-line flags and the resolved run configuration.
//!
//! `--app_key`, `--raw` and `--cipher` also read `APP_KEY`, `RAW` and
//! `APP_CIPHER` from the environment.

use clap::builder::FalseyValueParser;
use clap::Parser;
#[cfg(test)]
use clap::{CommandFactory, FromArgMatches};
use laravel_encrypt_core::{AppKey, Cipher, Encrypter};

use crate::error::CliError;

/// Encrypt / Decrypt Laravel encrypted strings.
#[derive(Debug, Parser)]
#[command(name = "laravel_encrypt", version)]
#[command(about = "Encrypt / Decrypt Laravel encrypted strings")]
#[command(long_about = "This tool can encrypt and decrypt laravel encrypted strings.\n\
                        Reads data from stdin")]
pub struct Cli {
    /// APP_KEY used for encryption, can be prefixed with 'base64:' which will
    /// automatically decode it before using the key
    #[arg(short = 'k', long = "app_key", env = "APP_KEY", hide_env_values = true)]
    pub app_key: Option<String>,

    /// Don't strip newlines on single line input
    #[arg(short, long, env = "RAW", value_parser = FalseyValueParser::new())]
    pub raw: bool,

    /// If set input will be decrypted
    #[arg(short, long)]
    pub decrypt: bool,

    /// Cipher for encryption; decryption detects it from the payload
    #[arg(short, long, env = "APP_CIPHER", default_value = "aes-256-cbc")]
    pub cipher: Cipher,

    /// PHP-serialize before encrypting / unserialize after decrypting,
    /// like Laravel's encrypt() and decrypt() helpers
    #[arg(short, long)]
    pub serialize: bool,

    /// Print a new random base64: key and exit
    #[arg(long, conflicts_with_all = ["decrypt", "serialize"])]
    pub generate_key: bool,

    /// Log debug information to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Direction of the transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Plaintext on stdin, wire string on stdout.
    Encrypt,
    /// Wire string on stdin, plaintext on stdout.
    Decrypt,
}

/// Validated settings for one encrypt or decrypt run.
#[derive(Debug)]
pub struct Config {
    /// Key bound to the encryption cipher.
    pub encrypter: Encrypter,
    /// Encrypt or decrypt.
    pub mode: Mode,
    /// Keep input and output byte-exact.
    pub raw: bool,
    /// Apply PHP serialization.
    pub serialize: bool,
}

impl Config {
    /// Resolve flags into a run configuration, validating the key.
    ///
    /// # Errors
    ///
    /// - `CliError::MissingKey` if no key was supplied or it is empty
    /// - `CliError::Encrypter` if the key is not a valid 32-byte key
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let raw_key = cli
            .app_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(CliError::MissingKey)?;
        let key = AppKey::parse(raw_key)?;

        Ok(Self {
            encrypter: Encrypter::new(key, cli.cipher),
            mode: if cli.decrypt {
                Mode::Decrypt
            } else {
                Mode::Encrypt
            },
            raw: cli.raw,
            serialize: cli.serialize,
        })
    }
}

/// The `laravel_encrypt` command with every environment fallback removed.
#[cfg(test)]
pub(crate) fn command_without_env() -> clap::Command {
    Cli::command().mut_args(|arg| arg.env(None::<&'static str>))
}

/// Parse `args` (program name excluded) ignoring `APP_KEY`, `RAW` and
/// `APP_CIPHER` in the process environment.
#[cfg(test)]
pub(crate) fn parse_without_env(args: &[&str]) -> Result<Cli, clap::Error> {
    let argv = std::iter::once("laravel_encrypt").chain(args.iter().copied());
    let matches = command_without_env().try_get_matches_from(argv)?;
    Cli::from_arg_matches(&matches)
}
