//! HMAC-SHA256 payload authentication.
//!
//! The MAC covers the base64 text of the IV followed by the base64 text of
//! the ciphertext, keyed with the application key:
//! `hex(HMAC-SHA256(key, iv_b64 ++ value_b64))`.

use ring::hmac;

use crate::error::EncrypterError;
use crate::key::AppKey;
use crate::payload::Payload;

/// HMAC-SHA256 digest length in bytes.
pub const MAC_LEN: usize = 32;

/// Constant-time byte comparison.
///
/// Returns `true` iff both slices have equal length and identical contents.
/// Accumulates the XOR of every byte pair and branches once at the end.
///
/// The early return on length mismatch only reveals the length, which is
/// public: a valid MAC is always 32 bytes.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    std::hint::black_box(diff) == 0
}

/// Compute the Laravel payload MAC.
#[must_use]
pub fn compute_mac(key: &AppKey, iv_b64: &str, value_b64: &str) -> [u8; MAC_LEN] {
    let key = hmac::Key::new(hmac::HMAC_SHA256, key.expose());
    let mut ctx = hmac::Context::with_key(&key);
    ctx.update(iv_b64.as_bytes());
    ctx.update(value_b64.as_bytes());
    let tag = ctx.sign();

    let mut mac = [0u8; MAC_LEN];
    mac.copy_from_slice(tag.as_ref());
    mac
}

/// Proof that a payload's MAC verified under a given key.
///
/// Only [`verify_mac`] constructs this; CBC decryption in
/// [`crate::encrypter`] requires it.
#[derive(Debug)]
pub struct Authenticated<'a> {
    payload: &'a Payload,
}

impl<'a> Authenticated<'a> {
    /// The verified payload.
    #[must_use]
    pub const fn payload(&self) -> &'a Payload {
        self.payload
    }
}

/// Verify a payload's MAC in constant time.
///
/// # Errors
///
/// Returns `EncrypterError::AuthenticationFailed` if the MAC does not match.
/// The error carries no information about where the MACs differ.
pub fn verify_mac<'a>(
    key: &AppKey,
    payload: &'a Payload,
) -> Result<Authenticated<'a>, EncrypterError> {
    let expected = compute_mac(key, payload.iv_b64(), payload.value_b64());
    if constant_time_eq(&expected, payload.mac()) {
        Ok(Authenticated { payload })
    } else {
        Err(EncrypterError::AuthenticationFailed)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
