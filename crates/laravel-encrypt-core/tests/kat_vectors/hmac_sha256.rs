//! RFC 4231: HMAC-SHA256 test vectors, plus Laravel payload MACs.
//!
//! RFC 4231 keys are not 32 bytes, so those cases exercise `ring::hmac`
//! directly; the Laravel cases go through `compute_mac`.

use data_encoding::HEXLOWER;
use laravel_encrypt_core::mac::compute_mac;
use laravel_encrypt_core::AppKey;
use ring::hmac;

/// RFC 4231 Test Case 2: key = "Jefe".
#[test]
fn rfc4231_test_case_2() {
    let key = hmac::Key::new(hmac::HMAC_SHA256, b"Jefe");
    let tag = hmac::sign(&key, b"what do ya want for nothing?");
    assert_eq!(
        HEXLOWER.encode(tag.as_ref()),
        "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
    );
}

/// Laravel MAC over `iv_b64 ++ value_b64` with key bytes 0x00..=0x1f.
#[test]
fn laravel_payload_macs() {
    let bytes: Vec<u8> = (0u8..32).collect();
    let key = AppKey::from_bytes(&bytes).expect("32-byte key");

    let cases = [
        (
            "EBESExQVFhcYGRobHB0eHw==",
            "C1RHo05o7WQBatoyfzm0xA==",
            "9a949e6c9dddd25393c1b82bf5592d538fbe612f41a3a511e2b021a62f52cc50",
        ),
        (
            "MDEyMzQ1Njc4OTo7PD0+Pw==",
            "J2LZ7G027xri8rJjvOQsMUgRF6bxzvwxOIiDtYlZN8o=",
            "a11da6c5c0a5140b541f1d20a6b98a670e8380fa34b0917704ab3c722895342b",
        ),
    ];

    for (iv, value, expected) in cases {
        assert_eq!(HEXLOWER.encode(&compute_mac(&key, iv, value)), expected);
    }
}
