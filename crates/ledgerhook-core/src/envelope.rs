//! Webhook envelope construction and signature checks.

use bytes::Bytes;
use serde::Deserialize as _;
use serde_json::{Map, Value};

use crate::{
    error::{EnvelopeError, Result},
    event::WebhookEvent,
    signature,
};

/// One received webhook delivery: the raw payload, its parsed event
/// records, and the signing key needed to authenticate it.
///
/// The envelope is immutable once constructed. The raw body is retained
/// byte-for-byte so signatures are always computed over exactly what was
/// received, never over a re-serialization.
#[derive(Debug, Clone)]
pub struct WebhookEnvelope {
    raw_body: Bytes,
    signing_key: String,
    first_event_sequence: i64,
    last_event_sequence: i64,
    events: Vec<WebhookEvent>,
}

impl WebhookEnvelope {
    /// Parses a received payload into an envelope.
    ///
    /// The signing key is injected by the caller; the envelope never reads
    /// configuration itself. Keys of any length are accepted, including
    /// empty ones.
    ///
    /// A delivery with an empty `events` array is valid: the platform sends
    /// event-less payloads to probe signature handling.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Decode`] when the payload is not a JSON
    /// object, and [`EnvelopeError::MalformedPayload`] when it is one but
    /// `events` is missing, not an array, or holds records that do not
    /// deserialize.
    pub fn parse(body: impl Into<Bytes>, signing_key: impl Into<String>) -> Result<Self> {
        let raw_body = body.into();

        let document: Map<String, Value> = serde_json::from_slice(&raw_body)?;

        let events = match document.get("events") {
            Some(Value::Array(items)) => parse_events(items)?,
            Some(_) => return Err(EnvelopeError::malformed("events member is not an array")),
            None => return Err(EnvelopeError::malformed("events member is missing")),
        };

        Ok(Self {
            first_event_sequence: sequence(&document, "firstEventSequence"),
            last_event_sequence: sequence(&document, "lastEventSequence"),
            raw_body,
            signing_key: signing_key.into(),
            events,
        })
    }

    /// Computes the base64 HMAC-SHA256 digest of the retained payload.
    ///
    /// Deterministic for a given payload and key. The digest is recomputed
    /// on every call; repeated calls must observe identical values.
    pub fn signature(&self) -> String {
        signature::compute_signature(&self.raw_body, &self.signing_key)
    }

    /// Checks a caller-supplied signature, typically the value of the
    /// `x-xero-signature` request header, against the computed digest.
    ///
    /// The comparison is constant-time. A failed check is a normal boolean
    /// outcome, not an error, and never panics.
    #[must_use]
    pub fn validate(&self, supplied: &str) -> bool {
        signature::verify_signature(&self.raw_body, &self.signing_key, supplied)
    }

    /// The parsed event records, in payload order.
    pub fn events(&self) -> &[WebhookEvent] {
        &self.events
    }

    /// Consumes the envelope, returning its event records.
    pub fn into_events(self) -> Vec<WebhookEvent> {
        self.events
    }

    /// Sequence number of the first event in this delivery, 0 when absent.
    pub fn first_event_sequence(&self) -> i64 {
        self.first_event_sequence
    }

    /// Sequence number of the last event in this delivery, 0 when absent.
    pub fn last_event_sequence(&self) -> i64 {
        self.last_event_sequence
    }

    /// The payload exactly as received.
    pub fn raw_body(&self) -> &[u8] {
        &self.raw_body
    }

    /// True when the delivery carried no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

fn parse_events(items: &[Value]) -> Result<Vec<WebhookEvent>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            WebhookEvent::deserialize(item).map_err(|err| {
                EnvelopeError::malformed(format!("event record {index} is invalid: {err}"))
            })
        })
        .collect()
}

// Sequences are advisory metadata; senders omit them on some deliveries, so
// absent or non-integral values read as zero.
fn sequence(document: &Map<String, Value>, member: &str) -> i64 {
    document.get(member).and_then(Value::as_i64).unwrap_or(0)
}
