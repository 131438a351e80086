#![no_main]

//! Fuzz target for webhook signature verification.
//!
//! Splits arbitrary input into payload, key, and supplied signature to
//! ensure HMAC computation is total and verification never panics, no
//! matter what a sender puts in the signature header.

use ledgerhook_core::signature::{compute_signature, verify_signature};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let (body, rest) = data.split_at(data.len() / 2);
    let (key_bytes, supplied_bytes) = rest.split_at(rest.len() / 2);

    let key = String::from_utf8_lossy(key_bytes);
    let supplied = String::from_utf8_lossy(supplied_bytes);

    // Computation is total over arbitrary bodies and keys.
    let expected = compute_signature(body, &key);
    assert_eq!(expected, compute_signature(body, &key));

    // A correctly computed signature always verifies; arbitrary supplied
    // strings never panic.
    assert!(verify_signature(body, &key, &expected));
    let _ = verify_signature(body, &key, &supplied);
});
