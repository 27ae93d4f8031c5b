//! NIST SP 800-38D: AES-256-GCM Known-Answer Test.
//!
//! Test Case 14: zero key, zero 96-bit IV, one zero block, no AAD.

use laravel_encrypt_core::cipher::{decrypt_gcm, encrypt_gcm, GCM_NONCE_LEN};
use laravel_encrypt_core::AppKey;

const EXPECTED_CT: [u8; 16] = [
    0xce, 0xa7, 0x40, 0x3d, 0x4d, 0x60, 0x6b, 0x6e, 0x07, 0x4e, 0xc5, 0xd3, 0xba, 0xf3, 0x9d, 0x18,
];
const EXPECTED_TAG: [u8; 16] = [
    0xd0, 0xd1, 0xc8, 0xa7, 0x99, 0x99, 0x6b, 0xf0, 0x26, 0x5b, 0x98, 0xb5, 0xd4, 0x8a, 0xb9, 0x19,
];

#[test]
fn nist_test_case_14_aes256_gcm() {
    let key = AppKey::from_bytes(&[0u8; 32]).expect("32-byte key");
    let nonce = [0u8; GCM_NONCE_LEN];

    let (ct, tag) = encrypt_gcm(&key, &nonce, &[0u8; 16]).expect("seal should succeed");
    assert_eq!(ct, EXPECTED_CT, "NIST Test Case 14 ciphertext mismatch");
    assert_eq!(tag, EXPECTED_TAG, "NIST Test Case 14 tag mismatch");

    let pt = decrypt_gcm(&key, &nonce, &EXPECTED_CT, &EXPECTED_TAG).expect("open should succeed");
    assert_eq!(pt.expose(), &[0u8; 16]);
}
