//! Property-based tests for envelope parsing and signature invariants.
//!
//! Tests fundamental rules that must hold regardless of input data. Uses
//! deterministic, in-memory testing without external dependencies.

#![allow(clippy::unwrap_used)] // Test regex patterns are known to be valid

use ledgerhook_core::{WebhookEnvelope, WebhookEvent};
use proptest::{prelude::*, test_runner::Config as ProptestConfig};
use serde_json::{json, Map, Value};

/// Deterministic property test configuration for CI stability.
fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: 50,
        timeout: 5000, // 5 seconds max
        fork: false,
        failure_persistence: None,
        source_file: None,
        ..ProptestConfig::default()
    }
}

/// Generate one well-formed event record as a JSON value.
fn event_value_strategy() -> impl Strategy<Value = Value> {
    (
        prop::string::string_regex("[a-f0-9-]{1,36}").unwrap(),
        prop::sample::select(vec!["CREATE", "UPDATE"]),
        prop::sample::select(vec!["INVOICE", "CONTACT", "BANKTRANSACTION"]),
        prop::string::string_regex("[a-f0-9-]{1,36}").unwrap(),
    )
        .prop_map(|(resource_id, event_type, category, tenant_id)| {
            json!({
                "resourceUrl": format!("https://api.xero.com/api.xro/2.0/Resources/{resource_id}"),
                "resourceId": resource_id,
                "eventDateUtc": "2021-01-01T00:00:00.000Z",
                "eventType": event_type,
                "eventCategory": category,
                "tenantId": tenant_id,
                "tenantType": "ORGANISATION"
            })
        })
}

/// Generate a whole delivery payload plus the facts we expect back.
fn payload_strategy() -> impl Strategy<Value = (String, Vec<Value>, i64, i64)> {
    (
        prop::collection::vec(event_value_strategy(), 0..5),
        prop::option::of(1i64..1_000_000),
        prop::option::of(1i64..1_000_000),
    )
        .prop_map(|(events, first, last)| {
            let mut document = Map::new();
            document.insert("events".to_string(), Value::Array(events.clone()));
            if let Some(sequence) = first {
                document.insert("firstEventSequence".to_string(), json!(sequence));
            }
            if let Some(sequence) = last {
                document.insert("lastEventSequence".to_string(), json!(sequence));
            }

            let body = serde_json::to_string(&Value::Object(document)).unwrap();
            (body, events, first.unwrap_or(0), last.unwrap_or(0))
        })
}

/// Generate signing keys, including short and empty ones.
fn signing_key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 _.-]{0,64}").unwrap()
}

proptest! {
    #![proptest_config(proptest_config())]

    /// Every well-formed delivery parses to its source records, in input
    /// order, with all fields and sequence values intact.
    #[test]
    fn parsed_envelopes_expose_every_event(
        (body, source_events, first, last) in payload_strategy(),
        key in signing_key_strategy(),
    ) {
        let envelope = WebhookEnvelope::parse(body.clone(), key).unwrap();

        let expected: Vec<WebhookEvent> = source_events
            .iter()
            .map(|record| serde_json::from_value(record.clone()).unwrap())
            .collect();

        prop_assert_eq!(envelope.events(), expected.as_slice());
        prop_assert_eq!(envelope.first_event_sequence(), first);
        prop_assert_eq!(envelope.last_event_sequence(), last);
        prop_assert_eq!(envelope.raw_body(), body.as_bytes());
    }

    /// An envelope always validates its own signature, and the digest is
    /// stable across calls.
    #[test]
    fn envelopes_validate_their_own_signature(
        (body, _, _, _) in payload_strategy(),
        key in signing_key_strategy(),
    ) {
        let envelope = WebhookEnvelope::parse(body, key).unwrap();
        let signature = envelope.signature();

        prop_assert_eq!(&signature, &envelope.signature());
        prop_assert!(envelope.validate(&signature));
    }

    /// A signature produced under one key never validates under another.
    #[test]
    fn foreign_key_signatures_are_rejected(
        (body, _, _, _) in payload_strategy(),
        key in signing_key_strategy(),
        other_key in signing_key_strategy(),
    ) {
        prop_assume!(key != other_key);

        let envelope = WebhookEnvelope::parse(body.clone(), key).unwrap();
        let foreign = WebhookEnvelope::parse(body, other_key).unwrap();

        prop_assert!(!envelope.validate(&foreign.signature()));
    }

    /// Identical payloads parse to equal event lists, wherever they were
    /// parsed.
    #[test]
    fn identical_payloads_yield_equal_events(
        (body, _, _, _) in payload_strategy(),
        key in signing_key_strategy(),
    ) {
        let first = WebhookEnvelope::parse(body.clone(), key.clone()).unwrap();
        let second = WebhookEnvelope::parse(body, key).unwrap();

        prop_assert_eq!(first.events(), second.events());
    }

    /// Validation accepts arbitrary supplied strings without panicking.
    #[test]
    fn validate_never_panics_on_arbitrary_input(
        supplied in any::<String>(),
    ) {
        let envelope = WebhookEnvelope::parse(r#"{"events":[]}"#, "signing-key").unwrap();

        // Either outcome is fine; reaching here without a panic is the point.
        let _ = envelope.validate(&supplied);
    }

    /// Parsing arbitrary bytes returns an error or an envelope, never a
    /// panic.
    #[test]
    fn parse_never_panics_on_arbitrary_bytes(
        body in prop::collection::vec(any::<u8>(), 0..512),
        key in signing_key_strategy(),
    ) {
        let _ = WebhookEnvelope::parse(body, key);
    }
}
