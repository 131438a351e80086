//! Error types for webhook envelope construction.
//!
//! Decode failures and shape failures are distinct variants so callers can
//! map them to different responses. Signature mismatches are deliberately
//! absent: [`WebhookEnvelope::validate`](crate::WebhookEnvelope::validate)
//! reports them as a boolean outcome, not an error.

use thiserror::Error;

/// Result type alias using `EnvelopeError`.
pub type Result<T> = std::result::Result<T, EnvelopeError>;

/// Errors raised while constructing a [`WebhookEnvelope`](crate::WebhookEnvelope).
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The payload is not decodable JSON at all: empty input, truncated
    /// documents, or a top-level value that is not an object.
    #[error("webhook payload could not be decoded: {source}")]
    Decode {
        /// The underlying JSON decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// The payload decoded as a JSON object but does not have the shape of
    /// a webhook delivery.
    #[error("webhook payload was malformed: {reason}")]
    MalformedPayload {
        /// What was wrong with the payload shape.
        reason: String,
    },
}

impl EnvelopeError {
    /// Creates a malformed-payload error with the given reason.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload { reason: reason.into() }
    }

    /// Returns true when the payload failed JSON decoding outright.
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

impl From<serde_json::Error> for EnvelopeError {
    fn from(source: serde_json::Error) -> Self {
        Self::Decode { source }
    }
}
