//! Webhook delivery handler with signature verification.
//!
//! Accepts deliveries from the accounting platform, authenticates them
//! against the subscription signing key, and hands verified events to the
//! configured consumers. The status codes double as the platform's
//! intent-to-receive handshake: 200 confirms the subscription key, 401
//! tells the platform the signature did not match.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use ledgerhook_core::WebhookEnvelope;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::server::AppState;

/// Header the accounting platform carries its HMAC signature in.
pub const SIGNATURE_HEADER: &str = "x-xero-signature";

/// Response from an accepted webhook delivery.
#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    /// Number of events carried by the delivery
    pub events: usize,
    /// Sequence number of the first event, zero when the platform omits it
    pub first_event_sequence: i64,
    /// Sequence number of the last event, zero when the platform omits it
    pub last_event_sequence: i64,
}

/// Error response with kind and message.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error details including kind and message
    pub error: ErrorDetail,
}

/// Detailed error information.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Machine-readable error kind
    pub kind: &'static str,
    /// Human-readable error description
    pub message: String,
}

/// Receives a webhook delivery from the accounting platform.
///
/// Verifies the delivery signature against the subscription signing key
/// before any payload content is trusted, acknowledges the delivery, and
/// hands the events to the consumer chain.
///
/// # Errors
///
/// Returns appropriate HTTP status codes:
/// - 400: Payload is not decodable JSON or not shaped like a delivery
/// - 401: Signature header missing or signature verification failed
#[instrument(
    name = "receive_webhook",
    skip(state, headers, body),
    fields(content_length = body.len())
)]
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    debug!("Processing webhook delivery");

    let Some(supplied_signature) = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok())
    else {
        warn!("Delivery carries no usable signature header");
        return create_error_response(
            StatusCode::UNAUTHORIZED,
            "invalid_signature",
            format!("{SIGNATURE_HEADER} header is missing"),
        );
    };

    let envelope = match WebhookEnvelope::parse(body, state.signing_key.as_ref()) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(error = %e, "Rejecting unparseable delivery");
            let kind = if e.is_decode() { "decode_error" } else { "malformed_payload" };
            return create_error_response(StatusCode::BAD_REQUEST, kind, e.to_string());
        },
    };

    if !envelope.validate(supplied_signature) {
        warn!("Delivery signature did not verify");
        return create_error_response(
            StatusCode::UNAUTHORIZED,
            "invalid_signature",
            "signature verification failed".to_string(),
        );
    }

    let receipt = ReceiptResponse {
        events: envelope.events().len(),
        first_event_sequence: envelope.first_event_sequence(),
        last_event_sequence: envelope.last_event_sequence(),
    };

    info!(
        events = receipt.events,
        first_event_sequence = receipt.first_event_sequence,
        last_event_sequence = receipt.last_event_sequence,
        "Delivery verified"
    );

    // Ack before consumers run; the platform retries any delivery that
    // does not answer within its window.
    let consumers = state.events.clone();
    tokio::spawn(async move {
        for event in envelope.into_events() {
            consumers.handle_event(&event).await;
        }
    });

    (StatusCode::OK, Json(receipt)).into_response()
}

fn create_error_response(status: StatusCode, kind: &'static str, message: String) -> Response {
    let error_response = ErrorResponse { error: ErrorDetail { kind, message } };

    (status, Json(error_response)).into_response()
}
