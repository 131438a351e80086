//! Ledgerhook API server
//!
//! HTTP ingestion endpoint for accounting webhooks. Verifies each delivery's
//! signature, acknowledges it, and hands the events to the configured
//! consumers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod server;

pub use config::Config;
pub use server::{create_router, start_server, AppState};
