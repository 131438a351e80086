//! Category-based resource resolution.
//!
//! Each webhook event names a resource by category tag and identifier.
//! Resolvers turn an event into the full API resource; the registry maps
//! category tags to resolver implementations and is assembled once at
//! startup, so new categories plug in without touching the event type.
//!
//! Resolution is uncached: every call fetches fresh state from the API,
//! and callers that resolve the same event twice observe two fetches.

use std::{collections::HashMap, sync::Arc};

use ledgerhook_core::{EventHandler, WebhookEvent};
use tracing::{debug, info, warn};

use crate::{
    client::AccountingClient,
    credentials::CredentialStore,
    error::{ResolveError, Result},
};

/// Category tag carried by invoice events.
pub const CATEGORY_INVOICE: &str = "INVOICE";

/// Category tag carried by contact events.
pub const CATEGORY_CONTACT: &str = "CONTACT";

/// A fully fetched API resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    /// An invoice fetched for an `INVOICE` event.
    Invoice(crate::models::Invoice),
    /// A contact fetched for a `CONTACT` event.
    Contact(crate::models::Contact),
}

/// Trait for turning one webhook event into its full API resource.
#[async_trait::async_trait]
pub trait ResolveResource: Send + Sync + std::fmt::Debug {
    /// Resolves the event to the resource it refers to.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Authentication`] when no usable credential
    /// exists for the event's tenant, and the client's lookup errors
    /// otherwise.
    async fn resolve(&self, event: &WebhookEvent) -> Result<Resource>;
}

/// Resolves `INVOICE` events against the accounting API.
#[derive(Debug)]
pub struct InvoiceResolver {
    credentials: Arc<dyn CredentialStore>,
    client: Arc<AccountingClient>,
}

impl InvoiceResolver {
    /// Creates a resolver using the given credential store and client.
    pub fn new(credentials: Arc<dyn CredentialStore>, client: Arc<AccountingClient>) -> Self {
        Self { credentials, client }
    }
}

#[async_trait::async_trait]
impl ResolveResource for InvoiceResolver {
    async fn resolve(&self, event: &WebhookEvent) -> Result<Resource> {
        let token = self.credentials.access_token(event.tenant_id()).await?;
        let invoice =
            self.client.get_invoice(&token, event.tenant_id(), event.resource_id()).await?;

        Ok(Resource::Invoice(invoice))
    }
}

/// Resolves `CONTACT` events against the accounting API.
#[derive(Debug)]
pub struct ContactResolver {
    credentials: Arc<dyn CredentialStore>,
    client: Arc<AccountingClient>,
}

impl ContactResolver {
    /// Creates a resolver using the given credential store and client.
    pub fn new(credentials: Arc<dyn CredentialStore>, client: Arc<AccountingClient>) -> Self {
        Self { credentials, client }
    }
}

#[async_trait::async_trait]
impl ResolveResource for ContactResolver {
    async fn resolve(&self, event: &WebhookEvent) -> Result<Resource> {
        let token = self.credentials.access_token(event.tenant_id()).await?;
        let contact =
            self.client.get_contact(&token, event.tenant_id(), event.resource_id()).await?;

        Ok(Resource::Contact(contact))
    }
}

/// Maps event categories to resolver implementations.
///
/// Built once at startup; lookups are read-only afterwards, so the
/// registry can be shared behind an `Arc` without locking.
#[derive(Debug, Default)]
pub struct ResolverRegistry {
    resolvers: HashMap<String, Arc<dyn ResolveResource>>,
}

impl ResolverRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self { resolvers: HashMap::new() }
    }

    /// Creates a registry with the standard `INVOICE` and `CONTACT`
    /// resolvers wired to the given credential store and client.
    pub fn xero(credentials: Arc<dyn CredentialStore>, client: Arc<AccountingClient>) -> Self {
        let mut registry = Self::new();
        registry.register(
            CATEGORY_INVOICE,
            Arc::new(InvoiceResolver::new(credentials.clone(), client.clone())),
        );
        registry.register(CATEGORY_CONTACT, Arc::new(ContactResolver::new(credentials, client)));
        registry
    }

    /// Registers a resolver for a category, replacing any previous one.
    pub fn register(&mut self, category: impl Into<String>, resolver: Arc<dyn ResolveResource>) {
        self.resolvers.insert(category.into(), resolver);
    }

    /// Looks up the resolver for a category.
    pub fn resolver_for(&self, category: &str) -> Option<&Arc<dyn ResolveResource>> {
        self.resolvers.get(category)
    }

    /// Categories with a registered resolver, in no particular order.
    pub fn categories(&self) -> Vec<&str> {
        self.resolvers.keys().map(String::as_str).collect()
    }

    /// Resolves an event through the resolver registered for its category.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnsupportedCategory`] when no resolver is
    /// registered for the event's category, plus whatever the resolver
    /// itself raises.
    pub async fn resolve(&self, event: &WebhookEvent) -> Result<Resource> {
        let resolver = self
            .resolver_for(event.event_category())
            .ok_or_else(|| ResolveError::unsupported_category(event.event_category()))?;

        debug!(
            category = %event.event_category(),
            resource_id = %event.resource_id(),
            tenant_id = %event.tenant_id(),
            "Resolving event"
        );

        resolver.resolve(event).await
    }
}

/// Event handler that resolves every received event and logs the outcome.
///
/// Useful as a smoke consumer: it exercises credentials and API access on
/// live traffic without persisting anything. Failures are logged, never
/// propagated.
#[derive(Debug)]
pub struct ResolvingEventHandler {
    registry: Arc<ResolverRegistry>,
}

impl ResolvingEventHandler {
    /// Creates a handler resolving through the given registry.
    pub fn new(registry: Arc<ResolverRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait::async_trait]
impl EventHandler for ResolvingEventHandler {
    async fn handle_event(&self, event: &WebhookEvent) {
        match self.registry.resolve(event).await {
            Ok(Resource::Invoice(invoice)) => {
                info!(
                    invoice_id = %invoice.invoice_id,
                    category = %event.event_category(),
                    "Resolved event resource"
                );
            },
            Ok(Resource::Contact(contact)) => {
                info!(
                    contact_id = %contact.contact_id,
                    category = %event.event_category(),
                    "Resolved event resource"
                );
            },
            Err(err) => {
                warn!(
                    category = %event.event_category(),
                    resource_id = %event.resource_id(),
                    error = %err,
                    "Failed to resolve event"
                );
            },
        }
    }
}
