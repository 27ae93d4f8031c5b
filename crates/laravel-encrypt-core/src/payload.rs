//! Laravel wire envelope codec.
//!
//! Wire format: `base64(JSON{"iv", "value", "mac", "tag"?})` where `iv`,
//! `value` and `tag` are standard base64 and `mac` is lowercase hex. The
//! AEAD variant writes an empty `mac` and a non-empty `tag`; Laravel's CBC
//! payloads may carry `"tag": ""`, which is treated as absent.

use crate::cipher::Cipher;
use crate::error::EncrypterError;
use data_encoding::{BASE64, HEXLOWER, HEXLOWER_PERMISSIVE};
use serde::{Deserialize, Serialize};

/// JSON document inside the outer base64 layer. Field order is the wire order.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    iv: String,
    value: String,
    mac: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// A decoded envelope.
///
/// Keeps the base64 text of `iv` and `value` exactly as received, since the
/// MAC is computed over that text rather than over a re-encoding.
#[derive(Debug, Clone)]
pub struct Payload {
    iv_b64: String,
    value_b64: String,
    iv: Vec<u8>,
    value: Vec<u8>,
    mac: Vec<u8>,
    tag: Option<Vec<u8>>,
}

impl Payload {
    /// Cipher implied by the envelope: GCM when a tag is present.
    #[must_use]
    pub const fn cipher(&self) -> Cipher {
        if self.tag.is_some() {
            Cipher::Aes256Gcm
        } else {
            Cipher::Aes256Cbc
        }
    }

    /// Decoded IV.
    #[must_use]
    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    /// Decoded ciphertext.
    #[must_use]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Decoded MAC; empty for AEAD payloads.
    #[must_use]
    pub fn mac(&self) -> &[u8] {
        &self.mac
    }

    /// Decoded AEAD tag, if any.
    #[must_use]
    pub fn tag(&self) -> Option<&[u8]> {
        self.tag.as_deref()
    }

    /// The `iv` field as it appeared on the wire.
    #[must_use]
    pub fn iv_b64(&self) -> &str {
        &self.iv_b64
    }

    /// The `value` field as it appeared on the wire.
    #[must_use]
    pub fn value_b64(&self) -> &str {
        &self.value_b64
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Standard base64 as used for the `iv`, `value` and `tag` fields.
#[must_use]
pub fn encode_field(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Assemble a wire string from raw parts.
///
/// `mac` is written as lowercase hex (empty for AEAD payloads). `tag` is
/// only written when present.
///
/// # Errors
///
/// Returns `EncrypterError::MalformedPayload` if JSON serialization fails.
pub fn encode(
    iv: &[u8],
    ciphertext: &[u8],
    mac: &[u8],
    tag: Option<&[u8]>,
) -> Result<String, EncrypterError> {
    let envelope = Envelope {
        iv: encode_field(iv),
        value: encode_field(ciphertext),
        mac: HEXLOWER.encode(mac),
        tag: tag.map(encode_field),
    };
    let json = serde_json::to_vec(&envelope)
        .map_err(|e| EncrypterError::MalformedPayload(format!("envelope serialization: {e}")))?;
    Ok(BASE64.encode(&json))
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

fn decode_field(name: &str, text: &str) -> Result<Vec<u8>, EncrypterError> {
    BASE64
        .decode(text.as_bytes())
        .map_err(|_| EncrypterError::MalformedPayload(format!("'{name}' is not valid base64")))
}

/// Parse a wire string into a [`Payload`].
///
/// # Errors
///
/// Returns `EncrypterError::MalformedPayload` if the outer base64 or the
/// JSON is invalid, if `iv`, `value` or `mac` is missing, not a string, or
/// not decodable, or if the IV length does not match the detected cipher.
pub fn decode(wire: &str) -> Result<Payload, EncrypterError> {
    let json = BASE64
        .decode(wire.as_bytes())
        .map_err(|_| EncrypterError::MalformedPayload("payload is not valid base64".into()))?;

    // serde would also accept a JSON array for a struct; Laravel only
    // accepts an object.
    let object: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(&json)
        .map_err(|e| EncrypterError::MalformedPayload(format!("invalid envelope: {e}")))?;
    let envelope: Envelope = serde_json::from_value(serde_json::Value::Object(object))
        .map_err(|e| EncrypterError::MalformedPayload(format!("invalid envelope: {e}")))?;

    let iv = decode_field("iv", &envelope.iv)?;
    let value = decode_field("value", &envelope.value)?;
    let mac = HEXLOWER_PERMISSIVE
        .decode(envelope.mac.as_bytes())
        .map_err(|_| EncrypterError::MalformedPayload("'mac' is not valid hex".into()))?;
    let tag = match envelope.tag.as_deref() {
        None | Some("") => None,
        Some(text) => Some(decode_field("tag", text)?),
    };

    let payload = Payload {
        iv_b64: envelope.iv,
        value_b64: envelope.value,
        iv,
        value,
        mac,
        tag,
    };

    let expected_iv = payload.cipher().iv_len();
    if payload.iv.len() != expected_iv {
        return Err(EncrypterError::MalformedPayload(format!(
            "invalid iv length: {} bytes (expected {expected_iv})",
            payload.iv.len()
        )));
    }

    Ok(payload)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
