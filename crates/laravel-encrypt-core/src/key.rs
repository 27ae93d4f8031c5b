//! Application key validation.
//!
//! Laravel's `APP_KEY` is either 32 raw characters or `base64:` followed by
//! the standard base64 encoding of 32 bytes. [`AppKey`] normalizes both forms
//! into exactly 32 bytes before any cryptographic use.

use crate::error::EncrypterError;
use data_encoding::BASE64;
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// AES-256 / HMAC-SHA256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// Prefix marking a base64-encoded key.
pub const BASE64_PREFIX: &str = "base64:";

/// A validated 32-byte application key.
///
/// Zeroized on drop; `Debug` output is masked.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AppKey {
    bytes: [u8; KEY_LEN],
}

impl AppKey {
    /// Parse a key as written in Laravel's `.env`.
    ///
    /// A `base64:` prefix is stripped and the remainder decoded; any other
    /// string is used as its raw UTF-8 bytes.
    ///
    /// # Errors
    ///
    /// - `EncrypterError::InvalidKeyEncoding` if the prefixed remainder is not base64
    /// - `EncrypterError::InvalidKeyLength` if the result is not 32 bytes
    pub fn parse(raw: &str) -> Result<Self, EncrypterError> {
        match raw.strip_prefix(BASE64_PREFIX) {
            Some(encoded) => {
                let mut decoded = BASE64
                    .decode(encoded.as_bytes())
                    .map_err(|e| EncrypterError::InvalidKeyEncoding(e.to_string()))?;
                let key = Self::from_bytes(&decoded);
                decoded.zeroize();
                key
            }
            None => Self::from_bytes(raw.as_bytes()),
        }
    }

    /// Build a key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns `EncrypterError::InvalidKeyLength` if `bytes` is not 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EncrypterError> {
        let array: [u8; KEY_LEN] = bytes
            .try_into()
            .map_err(|_| EncrypterError::InvalidKeyLength {
                actual: bytes.len(),
            })?;
        Ok(Self { bytes: array })
    }

    /// Generate a fresh random key from the OS CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns `EncrypterError::RandomSourceFailure` if the CSPRNG fails.
    pub fn generate() -> Result<Self, EncrypterError> {
        let mut bytes = [0u8; KEY_LEN];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| EncrypterError::RandomSourceFailure(e.to_string()))?;
        let key = Self { bytes };
        bytes.zeroize();
        Ok(key)
    }

    /// Render the key the way `php artisan key:generate` writes it.
    #[must_use]
    pub fn to_env_string(&self) -> String {
        format!("{BASE64_PREFIX}{}", BASE64.encode(&self.bytes))
    }

    /// Expose the raw key bytes for cryptographic operations.
    #[must_use]
    pub const fn expose(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl FromStr for AppKey {
    type Err = EncrypterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for AppKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppKey(***)")
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
