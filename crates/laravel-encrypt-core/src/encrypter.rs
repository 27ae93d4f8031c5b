//! Laravel-compatible encrypt and decrypt.
//!
//! This module provides:
//! - [`encrypt`] / [`decrypt`]: AES-256-CBC + HMAC-SHA256 with an explicit key
//! - [`Encrypter`]: key + configured [`Cipher`], with PHP-serialized variants
//!
//! Decryption runs strictly in this order, stopping at the first failure:
//!
//! 1. Decode: outer base64, JSON, field decoding (`MalformedPayload`)
//! 2. Verify shape: IV, MAC/tag and ciphertext lengths (`MalformedPayload`)
//! 3. Verify MAC: constant-time HMAC check (`AuthenticationFailed`)
//! 4. Decrypt: AES-256-CBC and PKCS#7 unpadding (`PaddingError`)
//!
//! CBC decryption takes an [`Authenticated`] payload, which only
//! [`mac::verify_mac`] can produce.

use crate::cipher::{self, Cipher, BLOCK_LEN, CBC_IV_LEN, GCM_NONCE_LEN, GCM_TAG_LEN};
use crate::error::EncrypterError;
use crate::key::AppKey;
use crate::mac::{self, Authenticated, MAC_LEN};
use crate::memory::SecretBuffer;
use crate::payload::{self, Payload};
use crate::php;
use zeroize::Zeroize;

// ---------------------------------------------------------------------------
// Encryption
// ---------------------------------------------------------------------------

fn seal_cbc(key: &AppKey, plaintext: &[u8]) -> Result<String, EncrypterError> {
    let iv = cipher::generate_iv::<CBC_IV_LEN>()?;
    let ciphertext = cipher::encrypt_cbc(key, &iv, plaintext);
    let mac = mac::compute_mac(
        key,
        &payload::encode_field(&iv),
        &payload::encode_field(&ciphertext),
    );
    payload::encode(&iv, &ciphertext, &mac, None)
}

fn seal_gcm(key: &AppKey, plaintext: &[u8]) -> Result<String, EncrypterError> {
    let nonce = cipher::generate_iv::<GCM_NONCE_LEN>()?;
    let (ciphertext, tag) = cipher::encrypt_gcm(key, &nonce, plaintext)?;
    payload::encode(&nonce, &ciphertext, &[], Some(&tag))
}

/// Encrypt `plaintext` into a Laravel AES-256-CBC wire string.
///
/// A fresh IV is drawn from the OS CSPRNG for every call.
///
/// # Errors
///
/// Returns `EncrypterError::RandomSourceFailure` if no IV could be generated;
/// nothing is emitted in that case.
pub fn encrypt(key: &AppKey, plaintext: &[u8]) -> Result<String, EncrypterError> {
    seal_cbc(key, plaintext)
}

// ---------------------------------------------------------------------------
// Decryption
// ---------------------------------------------------------------------------

/// Length checks that need no key material.
fn verify_shape(payload: &Payload) -> Result<(), EncrypterError> {
    let malformed = |reason: &str| Err(EncrypterError::MalformedPayload(reason.to_owned()));

    match payload.cipher() {
        Cipher::Aes256Cbc => {
            if payload.iv().len() != CBC_IV_LEN {
                return malformed("invalid iv length");
            }
            if payload.mac().len() != MAC_LEN {
                return malformed("invalid mac length");
            }
            if payload.value().is_empty() || payload.value().len() % BLOCK_LEN != 0 {
                return malformed("ciphertext is not a whole number of blocks");
            }
        }
        Cipher::Aes256Gcm => {
            if payload.iv().len() != GCM_NONCE_LEN {
                return malformed("invalid iv length");
            }
            if payload.tag().map(<[u8]>::len) != Some(GCM_TAG_LEN) {
                return malformed("invalid tag length");
            }
            if !payload.mac().is_empty() {
                return malformed("AEAD payload must not carry a mac");
            }
        }
    }
    Ok(())
}

/// Decrypt a payload whose MAC has been verified.
fn open_cbc(key: &AppKey, verified: &Authenticated<'_>) -> Result<SecretBuffer, EncrypterError> {
    let payload = verified.payload();
    let iv: &[u8; CBC_IV_LEN] = payload
        .iv()
        .try_into()
        .map_err(|_| EncrypterError::MalformedPayload("invalid iv length".into()))?;
    cipher::decrypt_cbc(key, iv, payload.value())
}

fn open_gcm(key: &AppKey, payload: &Payload) -> Result<SecretBuffer, EncrypterError> {
    let nonce: &[u8; GCM_NONCE_LEN] = payload
        .iv()
        .try_into()
        .map_err(|_| EncrypterError::MalformedPayload("invalid iv length".into()))?;
    let tag: &[u8; GCM_TAG_LEN] = payload
        .tag()
        .and_then(|tag| tag.try_into().ok())
        .ok_or_else(|| EncrypterError::MalformedPayload("invalid tag length".into()))?;
    cipher::decrypt_gcm(key, nonce, payload.value(), tag)
}

/// Decrypt a Laravel wire string.
///
/// CBC payloads are authenticated by their MAC before any decryption takes
/// place. Payloads carrying a non-empty `tag` are treated as AES-256-GCM and
/// authenticated by the tag.
///
/// # Errors
///
/// - `EncrypterError::MalformedPayload`: undecodable or wrongly-shaped envelope
/// - `EncrypterError::AuthenticationFailed`: MAC or tag mismatch (tampering, wrong key)
/// - `EncrypterError::PaddingError`: bad padding after successful authentication
pub fn decrypt(key: &AppKey, wire: &str) -> Result<SecretBuffer, EncrypterError> {
    let payload = payload::decode(wire)?;
    verify_shape(&payload)?;

    match payload.cipher() {
        Cipher::Aes256Cbc => {
            let verified = mac::verify_mac(key, &payload)?;
            open_cbc(key, &verified)
        }
        Cipher::Aes256Gcm => open_gcm(key, &payload),
    }
}

// ---------------------------------------------------------------------------
// Encrypter
// ---------------------------------------------------------------------------

/// An application key bound to a cipher, like Laravel's `Encrypter`.
///
/// Holds no mutable state; one instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct Encrypter {
    key: AppKey,
    cipher: Cipher,
}

impl Encrypter {
    /// Bind `key` to `cipher`.
    #[must_use]
    pub const fn new(key: AppKey, cipher: Cipher) -> Self {
        Self { key, cipher }
    }

    /// The configured cipher used for encryption.
    #[must_use]
    pub const fn cipher(&self) -> Cipher {
        self.cipher
    }

    /// Encrypt raw bytes (Laravel's `encryptString`).
    ///
    /// # Errors
    ///
    /// Returns `EncrypterError::RandomSourceFailure` if no IV could be generated.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String, EncrypterError> {
        match self.cipher {
            Cipher::Aes256Cbc => seal_cbc(&self.key, plaintext),
            Cipher::Aes256Gcm => seal_gcm(&self.key, plaintext),
        }
    }

    /// Decrypt to raw bytes (Laravel's `decryptString`).
    ///
    /// The cipher is taken from the payload, not from the configuration.
    ///
    /// # Errors
    ///
    /// See [`decrypt`].
    pub fn decrypt(&self, wire: &str) -> Result<SecretBuffer, EncrypterError> {
        decrypt(&self.key, wire)
    }

    /// PHP-serialize `value` as a string, then encrypt (Laravel's `encrypt`).
    ///
    /// # Errors
    ///
    /// Returns `EncrypterError::RandomSourceFailure` if no IV could be generated.
    pub fn encrypt_serialized(&self, value: &[u8]) -> Result<String, EncrypterError> {
        let mut serialized = php::serialize_str(value);
        let result = self.encrypt(&serialized);
        serialized.zeroize();
        result
    }

    /// Decrypt, then unserialize a PHP scalar (Laravel's `decrypt`).
    ///
    /// # Errors
    ///
    /// See [`decrypt`]; additionally `EncrypterError::Unserialize` if the
    /// plaintext is not a serialized PHP scalar.
    pub fn decrypt_serialized(&self, wire: &str) -> Result<SecretBuffer, EncrypterError> {
        let plaintext = self.decrypt(wire)?;
        php::unserialize_scalar(plaintext.expose()).map(SecretBuffer::from)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
