//! Post-verification event dispatch.
//!
//! Once a delivery is authenticated, the service hands each event record to
//! an [`EventHandler`] chain. Handlers are observers: they log their own
//! failures and never feed errors back into the ingest path, so a broken
//! downstream consumer cannot make the platform retry a delivery.

use std::sync::Arc;

use crate::event::WebhookEvent;

/// Trait for reacting to verified webhook events.
///
/// Implementations log their own failures rather than returning errors;
/// the caller never sees a consumer fail.
#[async_trait::async_trait]
pub trait EventHandler: Send + Sync + std::fmt::Debug {
    /// Handles one verified event record.
    async fn handle_event(&self, event: &WebhookEvent);
}

/// No-op event handler that discards all events.
///
/// Used when event handling is disabled or for test scenarios where events
/// should be ignored.
#[derive(Debug, Default)]
pub struct NoOpEventHandler;

impl NoOpEventHandler {
    /// Creates a new no-op event handler.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl EventHandler for NoOpEventHandler {
    async fn handle_event(&self, _event: &WebhookEvent) {}
}

/// Logs each verified event with structured fields.
#[derive(Debug, Default)]
pub struct LoggingEventHandler;

impl LoggingEventHandler {
    /// Creates a new logging handler.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl EventHandler for LoggingEventHandler {
    async fn handle_event(&self, event: &WebhookEvent) {
        tracing::info!(
            category = %event.event_category(),
            event_type = %event.event_type(),
            resource_id = %event.resource_id(),
            tenant_id = %event.tenant_id(),
            "Received event"
        );
    }
}

/// Multicast handler that forwards events to multiple subscribers.
///
/// Subscribers run concurrently against the same event; dispatch completes
/// when the slowest subscriber finishes.
#[derive(Debug, Clone, Default)]
pub struct MulticastEventHandler {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl MulticastEventHandler {
    /// Creates a new multicast handler with no subscribers.
    pub fn new() -> Self {
        Self { handlers: Vec::new() }
    }

    /// Adds a subscriber to receive verified events.
    pub fn add_subscriber(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}

#[async_trait::async_trait]
impl EventHandler for MulticastEventHandler {
    async fn handle_event(&self, event: &WebhookEvent) {
        let futures = self.handlers.iter().map(|handler| handler.handle_event(event));

        futures::future::join_all(futures).await;
    }
}
