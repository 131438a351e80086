//! Core domain types for Xero webhook ingestion.
//!
//! Provides the webhook envelope and event models, HMAC-SHA256 signature
//! primitives, the envelope error taxonomy, and the post-verification
//! dispatch seam. All other crates depend on these foundational types.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod event;
pub mod signature;

pub use dispatch::{EventHandler, LoggingEventHandler, MulticastEventHandler, NoOpEventHandler};
pub use envelope::WebhookEnvelope;
pub use error::{EnvelopeError, Result};
pub use event::WebhookEvent;
