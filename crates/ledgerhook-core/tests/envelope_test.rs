//! Integration tests for webhook envelope construction and signatures.
//!
//! Covers the construction contract (strict decode, shape validation,
//! sequence defaults), signature determinism against pinned digests, and
//! raw-body fidelity.

use ledgerhook_core::{EnvelopeError, WebhookEnvelope};

/// Single-event delivery used across the suite.
const INVOICE_CREATED_BODY: &str = r#"{"events":[{"resourceUrl":"https://api.xero.com/api.xro/2.0/Invoices/123","resourceId":"123","eventDateUtc":"2021-01-01T00:00:00.000Z","eventType":"CREATE","eventCategory":"INVOICE","tenantId":"456","tenantType":"ORGANISATION"}],"firstEventSequence":1,"lastEventSequence":2}"#;

/// Two-event delivery, an invoice creation followed by a contact update.
const MIXED_EVENTS_BODY: &str = r#"{"events":[{"resourceUrl":"https://api.xero.com/api.xro/2.0/Invoices/123","resourceId":"123","eventDateUtc":"2021-01-01T00:00:00.000Z","eventType":"CREATE","eventCategory":"INVOICE","tenantId":"456","tenantType":"ORGANISATION"},{"resourceUrl":"https://api.xero.com/api.xro/2.0/Contacts/789","resourceId":"789","eventDateUtc":"2021-01-02T03:04:05.000Z","eventType":"UPDATE","eventCategory":"CONTACT","tenantId":"456","tenantType":"ORGANISATION"}],"firstEventSequence":1,"lastEventSequence":2}"#;

const SIGNING_KEY: &str = "signing-key";

// Digests below were computed once outside the test suite and pinned;
// they are never recomputed here.
const PINNED_SIGNATURE: &str = "74BrP4Qttwj8ZC8P4fnSLYwaj1kN4Es05EoM5ll91H0=";
const OTHER_KEY_SIGNATURE: &str = "T7ZE+YDsWrn7A5bsT/cwH0Ny4HkFxAokUlK2SWOo+bU=";
const MUTATED_BODY_SIGNATURE: &str = "K7afsFdzyluBJWHWQ/Mo1NYqK4sustHXbKnTLXvICa0=";
const EMPTY_KEY_SIGNATURE: &str = "tApt/fDGwOumq7ZMPKey75eKU4FC40VcGqGt5zd7ptk=";

/// Parse a well-formed single-event delivery and verify every exposed
/// field.
#[test]
fn parse_accepts_single_event_delivery() {
    let envelope = WebhookEnvelope::parse(INVOICE_CREATED_BODY, SIGNING_KEY)
        .expect("payload should parse");

    assert_eq!(envelope.first_event_sequence(), 1);
    assert_eq!(envelope.last_event_sequence(), 2);
    assert_eq!(envelope.events().len(), 1);
    assert!(!envelope.is_empty());
    assert_eq!(envelope.raw_body(), INVOICE_CREATED_BODY.as_bytes());

    let event = &envelope.events()[0];
    assert_eq!(event.resource_url(), "https://api.xero.com/api.xro/2.0/Invoices/123");
    assert_eq!(event.resource_id(), "123");
    assert_eq!(event.event_date_utc(), "2021-01-01T00:00:00.000Z");
    assert_eq!(event.event_type(), "CREATE");
    assert_eq!(event.event_category(), "INVOICE");
    assert_eq!(event.tenant_id(), "456");
    assert_eq!(event.tenant_type(), "ORGANISATION");
}

/// A multi-event delivery parses to one record per array element, in
/// payload order, with every source field carried through unchanged.
#[test]
fn parse_accepts_multi_event_delivery_in_payload_order() {
    let envelope =
        WebhookEnvelope::parse(MIXED_EVENTS_BODY, SIGNING_KEY).expect("payload should parse");

    assert_eq!(envelope.events().len(), 2);
    assert_eq!(envelope.first_event_sequence(), 1);
    assert_eq!(envelope.last_event_sequence(), 2);

    let invoice = &envelope.events()[0];
    assert_eq!(invoice.resource_url(), "https://api.xero.com/api.xro/2.0/Invoices/123");
    assert_eq!(invoice.resource_id(), "123");
    assert_eq!(invoice.event_date_utc(), "2021-01-01T00:00:00.000Z");
    assert_eq!(invoice.event_type(), "CREATE");
    assert_eq!(invoice.event_category(), "INVOICE");
    assert_eq!(invoice.tenant_id(), "456");
    assert_eq!(invoice.tenant_type(), "ORGANISATION");

    let contact = &envelope.events()[1];
    assert_eq!(contact.resource_url(), "https://api.xero.com/api.xro/2.0/Contacts/789");
    assert_eq!(contact.resource_id(), "789");
    assert_eq!(contact.event_date_utc(), "2021-01-02T03:04:05.000Z");
    assert_eq!(contact.event_type(), "UPDATE");
    assert_eq!(contact.event_category(), "CONTACT");
    assert_eq!(contact.tenant_id(), "456");
    assert_eq!(contact.tenant_type(), "ORGANISATION");
}

#[test]
fn parse_rejects_empty_payload() {
    let err = WebhookEnvelope::parse("", SIGNING_KEY).unwrap_err();

    assert!(err.is_decode());
    let message = err.to_string();
    assert!(message.starts_with("webhook payload could not be decoded: "), "got: {message}");
    // The decoder error is part of the message, not swallowed.
    assert!(message.contains("EOF"), "got: {message}");
}

#[test]
fn parse_rejects_top_level_array() {
    let err = WebhookEnvelope::parse("[]", SIGNING_KEY).unwrap_err();

    assert!(err.is_decode());
}

#[test]
fn parse_rejects_top_level_scalar() {
    assert!(WebhookEnvelope::parse("17", SIGNING_KEY).unwrap_err().is_decode());
    assert!(WebhookEnvelope::parse("\"events\"", SIGNING_KEY).unwrap_err().is_decode());
}

#[test]
fn parse_rejects_truncated_json() {
    let err = WebhookEnvelope::parse(r#"{"events":["#, SIGNING_KEY).unwrap_err();

    assert!(err.is_decode());
}

#[test]
fn parse_rejects_missing_events_member() {
    let err =
        WebhookEnvelope::parse(r#"{"firstEventSequence":1}"#, SIGNING_KEY).unwrap_err();

    assert!(matches!(err, EnvelopeError::MalformedPayload { .. }));
    assert_eq!(err.to_string(), "webhook payload was malformed: events member is missing");
}

#[test]
fn parse_rejects_non_array_events_member() {
    let err = WebhookEnvelope::parse(r#"{"events":{}}"#, SIGNING_KEY).unwrap_err();

    assert!(matches!(err, EnvelopeError::MalformedPayload { .. }));
    assert_eq!(err.to_string(), "webhook payload was malformed: events member is not an array");
}

#[test]
fn parse_rejects_event_record_with_missing_fields() {
    let body = r#"{"events":[{"resourceId":"123"}]}"#;
    let err = WebhookEnvelope::parse(body, SIGNING_KEY).unwrap_err();

    assert!(matches!(err, EnvelopeError::MalformedPayload { .. }));
    assert!(err.to_string().contains("event record 0"), "got: {err}");
}

#[test]
fn parse_rejects_non_object_event_record() {
    let body = r#"{"events":[42]}"#;
    let err = WebhookEnvelope::parse(body, SIGNING_KEY).unwrap_err();

    assert!(matches!(err, EnvelopeError::MalformedPayload { .. }));
}

#[test]
fn parse_names_the_offending_event_record() {
    let body = concat!(
        r#"{"events":[{"resourceUrl":"u","resourceId":"1","eventDateUtc":"d","#,
        r#""eventType":"CREATE","eventCategory":"INVOICE","tenantId":"t","tenantType":"ORGANISATION"},"#,
        r#"{"resourceId":"2"}]}"#,
    );
    let err = WebhookEnvelope::parse(body, SIGNING_KEY).unwrap_err();

    assert!(err.to_string().contains("event record 1"), "got: {err}");
}

/// Event-less deliveries are how the platform probes signature handling;
/// they must construct cleanly.
#[test]
fn parse_accepts_empty_events_array() {
    let envelope = WebhookEnvelope::parse(r#"{"events":[]}"#, SIGNING_KEY)
        .expect("event-less payload should parse");

    assert!(envelope.is_empty());
    assert_eq!(envelope.events().len(), 0);
}

#[test]
fn sequences_default_to_zero_when_absent() {
    let envelope = WebhookEnvelope::parse(r#"{"events":[]}"#, SIGNING_KEY).unwrap();

    assert_eq!(envelope.first_event_sequence(), 0);
    assert_eq!(envelope.last_event_sequence(), 0);
}

#[test]
fn sequences_are_read_when_present() {
    let body = r#"{"events":[],"firstEventSequence":7,"lastEventSequence":9}"#;
    let envelope = WebhookEnvelope::parse(body, SIGNING_KEY).unwrap();

    assert_eq!(envelope.first_event_sequence(), 7);
    assert_eq!(envelope.last_event_sequence(), 9);
}

#[test]
fn non_integral_sequences_read_as_zero() {
    let body = r#"{"events":[],"firstEventSequence":"7","lastEventSequence":1.5}"#;
    let envelope = WebhookEnvelope::parse(body, SIGNING_KEY).unwrap();

    assert_eq!(envelope.first_event_sequence(), 0);
    assert_eq!(envelope.last_event_sequence(), 0);
}

#[test]
fn signature_matches_pinned_digest() {
    let envelope = WebhookEnvelope::parse(INVOICE_CREATED_BODY, SIGNING_KEY).unwrap();

    assert_eq!(envelope.signature(), PINNED_SIGNATURE);
    assert!(envelope.validate(PINNED_SIGNATURE));
}

#[test]
fn signature_is_stable_across_calls() {
    let envelope = WebhookEnvelope::parse(INVOICE_CREATED_BODY, SIGNING_KEY).unwrap();

    assert_eq!(envelope.signature(), envelope.signature());
    assert_eq!(envelope.signature(), PINNED_SIGNATURE);
}

#[test]
fn different_keys_sign_differently() {
    let envelope = WebhookEnvelope::parse(INVOICE_CREATED_BODY, "other-key").unwrap();

    assert_eq!(envelope.signature(), OTHER_KEY_SIGNATURE);
    assert!(!envelope.validate(PINNED_SIGNATURE));
}

#[test]
fn mutated_payload_changes_the_signature() {
    let mutated = INVOICE_CREATED_BODY.replace(r#""tenantId":"456""#, r#""tenantId":"457""#);
    let envelope = WebhookEnvelope::parse(mutated, SIGNING_KEY).unwrap();

    assert_eq!(envelope.signature(), MUTATED_BODY_SIGNATURE);
    assert!(!envelope.validate(PINNED_SIGNATURE));
}

#[test]
fn empty_signing_key_is_accepted() {
    let envelope = WebhookEnvelope::parse(INVOICE_CREATED_BODY, "").unwrap();

    assert_eq!(envelope.signature(), EMPTY_KEY_SIGNATURE);
    assert!(!envelope.validate(PINNED_SIGNATURE));
}

#[test]
fn validate_rejects_arbitrary_supplied_values() {
    let envelope = WebhookEnvelope::parse(INVOICE_CREATED_BODY, SIGNING_KEY).unwrap();

    assert!(!envelope.validate(""));
    assert!(!envelope.validate("%%%not-base64%%%"));
    assert!(!envelope.validate(&"x".repeat(4096)));
}

/// Signatures cover the raw bytes, not the parsed document: bodies that
/// decode identically but differ in bytes must sign differently.
#[test]
fn raw_bytes_drive_the_signature_not_the_parsed_document() {
    let trailing_space = format!("{INVOICE_CREATED_BODY} ");
    let with_space = WebhookEnvelope::parse(trailing_space, SIGNING_KEY).unwrap();
    let without_space = WebhookEnvelope::parse(INVOICE_CREATED_BODY, SIGNING_KEY).unwrap();

    assert_eq!(with_space.events(), without_space.events());
    assert_ne!(with_space.signature(), without_space.signature());
}

#[test]
fn escaped_slashes_parse_identically_but_sign_differently() {
    let escaped = INVOICE_CREATED_BODY.replace('/', "\\/");
    let escaped = WebhookEnvelope::parse(escaped, SIGNING_KEY).unwrap();
    let plain = WebhookEnvelope::parse(INVOICE_CREATED_BODY, SIGNING_KEY).unwrap();

    assert_eq!(escaped.events(), plain.events());
    assert_ne!(escaped.signature(), plain.signature());
}

#[test]
fn envelopes_from_identical_payloads_expose_equal_events() {
    let first = WebhookEnvelope::parse(INVOICE_CREATED_BODY, SIGNING_KEY).unwrap();
    let second = WebhookEnvelope::parse(INVOICE_CREATED_BODY, SIGNING_KEY).unwrap();

    assert_eq!(first.events(), second.events());
}

#[test]
fn into_events_returns_owned_records() {
    let envelope = WebhookEnvelope::parse(INVOICE_CREATED_BODY, SIGNING_KEY).unwrap();
    let events = envelope.into_events();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_category(), "INVOICE");
}
