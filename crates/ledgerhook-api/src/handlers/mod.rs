//! HTTP request handlers for the ledgerhook API.
//!
//! This module contains all HTTP endpoint handlers following a consistent
//! pattern:
//! - Signature verification before any payload content is trusted
//! - Tracing for observability
//! - Standardized error responses
//!
//! # Handler Organization
//!
//! Handlers are grouped by functionality:
//! - `webhook` - Webhook delivery endpoint
//! - `health` - Health check and readiness probes
//!
//! # Error Handling
//!
//! All handlers return standardized error responses with:
//! - Appropriate HTTP status codes
//! - A machine-readable error kind
//! - Human-readable error messages
//! - Request tracing IDs for debugging

pub mod health;
pub mod webhook;

// Re-export handlers for convenient access
pub use health::{health_check, liveness_check, readiness_check};
pub use webhook::receive_webhook;
