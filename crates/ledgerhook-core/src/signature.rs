//! HMAC-SHA256 signature primitives.
//!
//! The platform signs every webhook request with HMAC-SHA256 over the raw
//! request body and sends the digest base64-encoded in the
//! `x-xero-signature` header. Verification recomputes the digest with the
//! shared signing key and compares the two in constant time.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes the base64-encoded HMAC-SHA256 digest of `body` under `key`.
///
/// Deterministic: the same body and key always produce the same digest.
pub fn compute_signature(body: &[u8], key: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(body);
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Recomputes the digest for `body` under `key` and checks it against a
/// caller-supplied signature.
///
/// Returns `false` for any mismatch, including length differences. Never
/// panics on arbitrary input.
#[must_use]
pub fn verify_signature(body: &[u8], key: &str, supplied: &str) -> bool {
    let expected = compute_signature(body, key);
    constant_time_eq(expected.as_bytes(), supplied.as_bytes())
}

/// Constant-time equality over byte strings.
///
/// Length is compared first; equal-length inputs are compared without
/// data-dependent branches so the check leaks nothing about the expected
/// digest.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.ct_eq(b).into()
}
