//! AES-256 block cipher operation.
//!
//! This module provides:
//! - [`encrypt_cbc`] / [`decrypt_cbc`]: AES-256-CBC with PKCS#7 padding
//! - [`encrypt_gcm`] / [`decrypt_gcm`]: AES-256-GCM, Laravel's AEAD variant
//! - [`generate_iv`]: fresh CSPRNG IV per encryption
//!
//! `decrypt_cbc` performs no authentication of its own. Callers must verify
//! the payload MAC first (see [`crate::mac::verify_mac`]).

use crate::error::EncrypterError;
use crate::key::AppKey;
use crate::memory::SecretBuffer;
use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;
use ring::aead;
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroize;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;

/// AES-256-CBC IV length in bytes (one block).
pub const CBC_IV_LEN: usize = BLOCK_LEN;

/// AES-256-GCM nonce length in bytes (96 bits).
pub const GCM_NONCE_LEN: usize = 12;

/// AES-256-GCM authentication tag length in bytes (128 bits).
pub const GCM_TAG_LEN: usize = 16;

/// Largest AES-256-GCM plaintext: 2^32 - 2 counter blocks.
pub const GCM_MAX_PLAINTEXT_LEN: u64 = 68_719_476_704;

// ---------------------------------------------------------------------------
// Cipher selection
// ---------------------------------------------------------------------------

/// Cipher algorithm, named as in Laravel's `config/app.php`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cipher {
    /// `aes-256-cbc` with an HMAC-SHA256 MAC (Laravel's default).
    #[default]
    Aes256Cbc,
    /// `aes-256-gcm`, authenticated by its own tag; the MAC field is empty.
    Aes256Gcm,
}

impl Cipher {
    /// Laravel's name for the cipher.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aes256Cbc => "aes-256-cbc",
            Self::Aes256Gcm => "aes-256-gcm",
        }
    }

    /// IV length in bytes, as `openssl_cipher_iv_length` reports it.
    #[must_use]
    pub const fn iv_len(self) -> usize {
        match self {
            Self::Aes256Cbc => CBC_IV_LEN,
            Self::Aes256Gcm => GCM_NONCE_LEN,
        }
    }
}

impl fmt::Display for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Cipher {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aes-256-cbc" => Ok(Self::Aes256Cbc),
            "aes-256-gcm" => Ok(Self::Aes256Gcm),
            other => Err(format!(
                "unsupported cipher '{other}' (expected aes-256-cbc or aes-256-gcm)"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// IV generation
// ---------------------------------------------------------------------------

/// Fill a fresh IV of `N` bytes from the OS CSPRNG.
///
/// # Errors
///
/// Returns `EncrypterError::RandomSourceFailure` if the CSPRNG fails.
pub fn generate_iv<const N: usize>() -> Result<[u8; N], EncrypterError> {
    let mut iv = [0u8; N];
    OsRng
        .try_fill_bytes(&mut iv)
        .map_err(|e| EncrypterError::RandomSourceFailure(format!("IV generation failed: {e}")))?;
    Ok(iv)
}

// ---------------------------------------------------------------------------
// AES-256-CBC
// ---------------------------------------------------------------------------

/// Encrypt with AES-256-CBC, padding the plaintext with PKCS#7.
///
/// The output is always a non-empty multiple of [`BLOCK_LEN`]; an empty
/// plaintext produces one block of padding.
#[must_use]
pub fn encrypt_cbc(key: &AppKey, iv: &[u8; CBC_IV_LEN], plaintext: &[u8]) -> Vec<u8> {
    Aes256CbcEnc::new(key.expose().into(), iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Decrypt AES-256-CBC ciphertext and strip its PKCS#7 padding.
///
/// Must only be called on ciphertext whose MAC has already been verified.
///
/// # Errors
///
/// Returns `EncrypterError::PaddingError` if the ciphertext is empty, not a
/// whole number of blocks, or ends in inconsistent padding.
pub fn decrypt_cbc(
    key: &AppKey,
    iv: &[u8; CBC_IV_LEN],
    ciphertext: &[u8],
) -> Result<SecretBuffer, EncrypterError> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(EncrypterError::PaddingError);
    }

    let plaintext = Aes256CbcDec::new(key.expose().into(), iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| EncrypterError::PaddingError)?;

    Ok(SecretBuffer::from(plaintext))
}

// ---------------------------------------------------------------------------
// AES-256-GCM
// ---------------------------------------------------------------------------

/// `AppKey` always holds 32 bytes, so `ring` can only reject it for length.
fn gcm_key(key: &AppKey) -> Result<aead::LessSafeKey, EncrypterError> {
    let unbound = aead::UnboundKey::new(&aead::AES_256_GCM, key.expose())
        .map_err(|_| EncrypterError::InvalidKeyLength {
            actual: key.expose().len(),
        })?;
    Ok(aead::LessSafeKey::new(unbound))
}

fn check_gcm_len(len: usize) -> Result<(), EncrypterError> {
    match u64::try_from(len) {
        Ok(n) if n <= GCM_MAX_PLAINTEXT_LEN => Ok(()),
        _ => Err(EncrypterError::PlaintextTooLong { len }),
    }
}

/// Encrypt with AES-256-GCM and empty associated data.
///
/// Returns the ciphertext (same length as the plaintext) and the tag.
///
/// # Errors
///
/// Returns `EncrypterError::PlaintextTooLong` if the plaintext exceeds
/// [`GCM_MAX_PLAINTEXT_LEN`].
pub fn encrypt_gcm(
    key: &AppKey,
    nonce: &[u8; GCM_NONCE_LEN],
    plaintext: &[u8],
) -> Result<(Vec<u8>, [u8; GCM_TAG_LEN]), EncrypterError> {
    check_gcm_len(plaintext.len())?;
    let sealing_key = gcm_key(key)?;
    let nonce = aead::Nonce::assume_unique_for_key(*nonce);

    let mut in_out = plaintext.to_vec();
    let Ok(tag) = sealing_key.seal_in_place_separate_tag(nonce, aead::Aad::empty(), &mut in_out)
    else {
        in_out.zeroize();
        return Err(EncrypterError::PlaintextTooLong {
            len: plaintext.len(),
        });
    };

    let mut tag_bytes = [0u8; GCM_TAG_LEN];
    tag_bytes.copy_from_slice(tag.as_ref());
    Ok((in_out, tag_bytes))
}

/// Decrypt AES-256-GCM ciphertext, verifying the tag first.
///
/// `ring` releases no plaintext unless the tag matches.
///
/// # Errors
///
/// Returns `EncrypterError::AuthenticationFailed` on tag mismatch.
pub fn decrypt_gcm(
    key: &AppKey,
    nonce: &[u8; GCM_NONCE_LEN],
    ciphertext: &[u8],
    tag: &[u8; GCM_TAG_LEN],
) -> Result<SecretBuffer, EncrypterError> {
    let opening_key = gcm_key(key)?;
    let nonce = aead::Nonce::assume_unique_for_key(*nonce);

    let mut ct_tag = Vec::with_capacity(ciphertext.len().saturating_add(GCM_TAG_LEN));
    ct_tag.extend_from_slice(ciphertext);
    ct_tag.extend_from_slice(tag);

    let Ok(plaintext) = opening_key.open_in_place(nonce, aead::Aad::empty(), &mut ct_tag) else {
        ct_tag.zeroize();
        return Err(EncrypterError::AuthenticationFailed);
    };

    let result = SecretBuffer::new(plaintext);
    ct_tag.zeroize();
    Ok(result)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
