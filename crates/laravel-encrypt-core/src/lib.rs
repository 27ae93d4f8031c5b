//! `laravel-encrypt-core`: Laravel-compatible authenticated encryption.
//!
//! Produces and consumes the wire format of Laravel's `Encrypter`:
//! `base64(JSON{iv, value, mac, tag?})` with AES-256-CBC and an
//! HMAC-SHA256 MAC, or AES-256-GCM with its own tag.
//!
//! Pure library: no I/O, no logging, no global state. The key is an explicit
//! parameter to every operation.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod memory;

pub mod key;

pub mod cipher;
pub mod mac;
pub mod payload;

pub mod encrypter;

pub mod php;

pub use cipher::Cipher;
pub use encrypter::{decrypt, encrypt, Encrypter};
pub use error::EncrypterError;
pub use key::{AppKey, BASE64_PREFIX, KEY_LEN};
pub use memory::{disable_core_dumps, SecretBuffer};
pub use payload::Payload;
