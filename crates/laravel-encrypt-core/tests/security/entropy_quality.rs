//! IV quality for CSPRNG output.
//!
//! Every encryption draws a fresh IV. These tests catch a degenerate or
//! deterministic source: repeated IVs, or low Shannon entropy across many.
//!
//! At 64 KB of IV material the expected entropy of uniform bytes is ~7.997
//! bits/byte, so `> 7.99` is a reliable threshold.

use std::collections::HashSet;

use data_encoding::BASE64;
use laravel_encrypt_core::cipher::{generate_iv, CBC_IV_LEN};
use laravel_encrypt_core::{encrypt, AppKey};

/// Shannon entropy of a byte slice (bits per byte).
#[allow(clippy::cast_precision_loss)]
fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut freq = [0u64; 256];
    for &b in data {
        freq[b as usize] = freq[b as usize].saturating_add(1);
    }
    let len = data.len() as f64;
    freq.iter()
        .filter(|&&f| f > 0)
        .map(|&f| {
            let p = f as f64 / len;
            -p * p.log2()
        })
        .sum()
}

#[test]
fn iv_material_64kb_entropy() {
    let mut material = Vec::with_capacity(65_536);
    for _ in 0..4096 {
        material.extend_from_slice(&generate_iv::<CBC_IV_LEN>().expect("CSPRNG should succeed"));
    }
    let entropy = shannon_entropy(&material);
    assert!(
        entropy > 7.99,
        "IV entropy too low: {entropy:.4} (expected > 7.99)"
    );
}

#[test]
fn encrypt_never_repeats_an_iv() {
    let key = AppKey::from_bytes(&[0x5A; 32]).expect("32 bytes");
    let mut seen = HashSet::new();
    for _ in 0..2000 {
        let wire = encrypt(&key, b"same plaintext").expect("encrypt should succeed");
        let json: serde_json::Value =
            serde_json::from_slice(&BASE64.decode(wire.as_bytes()).expect("base64"))
                .expect("json");
        let iv = json["iv"].as_str().expect("iv").to_owned();
        assert!(seen.insert(iv), "IV reused across encryptions");
    }
}

#[test]
fn entropy_helper_sanity() {
    assert!(shannon_entropy(&[0u8; 1024]).abs() < f64::EPSILON);
    let all_bytes: Vec<u8> = (0..=255).collect();
    assert!((shannon_entropy(&all_bytes) - 8.0).abs() < 1e-9);
}
