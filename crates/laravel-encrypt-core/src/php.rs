//! PHP `serialize()` for scalar payloads.
//!
//! Laravel's `encrypt()` serializes its value before encryption, while
//! `encryptString()` does not. Only scalars are handled here:
//!
//! | PHP value | Serialized form  | Unserialized bytes |
//! |-----------|------------------|--------------------|
//! | string    | `s:5:"hello";`   | `hello`            |
//! | int       | `i:-42;`         | `-42`              |
//! | float     | `d:1.5;`         | `1.5`              |
//! | bool      | `b:1;` / `b:0;`  | `1` / empty        |
//! | null      | `N;`             | empty              |
//!
//! Booleans and null follow PHP's string cast.

use crate::error::EncrypterError;

/// Serialize bytes as a PHP string: `s:<len>:"<bytes>";`.
///
/// The length is the byte length, as in PHP.
#[must_use]
pub fn serialize_str(value: &[u8]) -> Vec<u8> {
    let header = format!("s:{}:\"", value.len());
    let mut out = Vec::with_capacity(header.len().saturating_add(value.len()).saturating_add(2));
    out.extend_from_slice(header.as_bytes());
    out.extend_from_slice(value);
    out.extend_from_slice(b"\";");
    out
}

fn unserialize_error(reason: &str) -> EncrypterError {
    EncrypterError::Unserialize(reason.to_owned())
}

/// Body of a `<type>:<body>;` scalar, with the trailing `;` required.
fn scalar_body<'a>(data: &'a [u8], prefix: &[u8]) -> Option<&'a [u8]> {
    data.strip_prefix(prefix)?.strip_suffix(b";")
}

fn is_php_int(body: &[u8]) -> bool {
    let digits = body.strip_prefix(b"-").or_else(|| body.strip_prefix(b"+")).unwrap_or(body);
    !digits.is_empty() && digits.iter().all(u8::is_ascii_digit)
}

fn is_php_float(body: &[u8]) -> bool {
    match std::str::from_utf8(body) {
        Ok("INF" | "-INF" | "NAN") => true,
        Ok(text) => !text.is_empty() && text.parse::<f64>().is_ok(),
        Err(_) => false,
    }
}

fn unserialize_string(data: &[u8]) -> Result<Vec<u8>, EncrypterError> {
    let rest = data
        .strip_prefix(b"s:")
        .ok_or_else(|| unserialize_error("expected string"))?;
    let colon = rest
        .iter()
        .position(|&b| b == b':')
        .ok_or_else(|| unserialize_error("missing string length"))?;
    let (len_text, rest) = rest.split_at(colon);
    if len_text.is_empty() || !len_text.iter().all(u8::is_ascii_digit) {
        return Err(unserialize_error("invalid string length"));
    }
    let len: usize = std::str::from_utf8(len_text)
        .ok()
        .and_then(|text| text.parse().ok())
        .ok_or_else(|| unserialize_error("invalid string length"))?;

    // rest = `:"<len bytes>";`
    let body = rest
        .strip_prefix(b":\"")
        .and_then(|body| body.strip_suffix(b"\";"))
        .ok_or_else(|| unserialize_error("malformed string"))?;
    if body.len() != len {
        return Err(unserialize_error("string length mismatch"));
    }
    Ok(body.to_vec())
}

/// Unserialize a PHP scalar into its string form.
///
/// # Errors
///
/// Returns `EncrypterError::Unserialize` for arrays, objects, malformed
/// input, or trailing data.
pub fn unserialize_scalar(data: &[u8]) -> Result<Vec<u8>, EncrypterError> {
    match data.first() {
        Some(b's') => unserialize_string(data),
        Some(b'i') => match scalar_body(data, b"i:") {
            Some(body) if is_php_int(body) => Ok(body.to_vec()),
            _ => Err(unserialize_error("malformed integer")),
        },
        Some(b'd') => match scalar_body(data, b"d:") {
            Some(body) if is_php_float(body) => Ok(body.to_vec()),
            _ => Err(unserialize_error("malformed float")),
        },
        Some(b'b') => match scalar_body(data, b"b:") {
            Some(b"1") => Ok(b"1".to_vec()),
            Some(b"0") => Ok(Vec::new()),
            _ => Err(unserialize_error("malformed boolean")),
        },
        Some(b'N') if data == b"N;" => Ok(Vec::new()),
        Some(b'a' | b'O' | b'C') => Err(unserialize_error(
            "arrays and objects are not supported",
        )),
        _ => Err(unserialize_error("not a serialized PHP scalar")),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
