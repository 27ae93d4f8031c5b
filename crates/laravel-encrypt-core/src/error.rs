//! Error types for `laravel-encrypt-core`.

use thiserror::Error;

/// Errors produced by the encrypter.
///
/// Each encrypt or decrypt call yields at most one of these. None of them
/// is transient, so callers should never retry.
#[derive(Debug, Error)]
pub enum EncrypterError {
    /// Decoded key material is not exactly 32 bytes.
    #[error("app key must be 32 bytes long (decoded), got {actual} bytes")]
    InvalidKeyLength {
        /// Length of the key after decoding.
        actual: usize,
    },

    /// A `base64:`-prefixed key whose remainder is not valid base64.
    #[error("app key is not valid base64: {0}")]
    InvalidKeyEncoding(String),

    /// The envelope failed to decode or parse, or a required field is
    /// missing, undecodable, or has the wrong length.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// MAC or AEAD tag verification failed: tampered data or wrong key.
    #[error("authentication failed: the MAC is invalid")]
    AuthenticationFailed,

    /// PKCS#7 padding is inconsistent. Only reachable after authentication.
    #[error("decryption failed: invalid padding")]
    PaddingError,

    /// Plaintext exceeds the AES-256-GCM per-message limit.
    #[error("plaintext too long for AES-256-GCM: {len} bytes")]
    PlaintextTooLong {
        /// Plaintext length in bytes.
        len: usize,
    },

    /// The OS random source could not produce an IV or key.
    #[error("secure random source failure: {0}")]
    RandomSourceFailure(String),

    /// Decrypted plaintext is not a PHP-serialized scalar.
    #[error("unserialize failed: {0}")]
    Unserialize(String),
}
