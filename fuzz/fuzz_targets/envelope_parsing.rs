#![no_main]

//! Fuzz target for webhook envelope parsing.
//!
//! Feeds arbitrary bytes through envelope construction to ensure parsing
//! never panics on malformed or malicious payloads, and that accepted
//! envelopes keep the raw bytes intact for signing.

use ledgerhook_core::WebhookEnvelope;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    match WebhookEnvelope::parse(data.to_vec(), "fuzz-key") {
        Ok(envelope) => {
            // Accepted payloads keep their raw bytes and stay
            // self-consistent.
            assert_eq!(envelope.raw_body(), data);
            assert_eq!(envelope.is_empty(), envelope.events().is_empty());
            let _ = envelope.signature();
        },
        Err(err) => {
            let _ = err.to_string();
        },
    }
});
