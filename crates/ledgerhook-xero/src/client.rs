//! HTTP client for the accounting API.
//!
//! Handles request construction, auth headers, and the platform's enveloped
//! response shape. Response statuses are mapped onto the resolution error
//! taxonomy so callers can distinguish credential problems from lookup
//! failures.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    credentials::AccessToken,
    error::{ResolveError, Result},
    models::{Contact, ContactsResponse, Invoice, InvoicesResponse},
};

/// Configuration for the accounting API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the accounting API, without a trailing slash.
    pub base_url: String,
    /// Default timeout for HTTP requests.
    pub timeout: Duration,
    /// Connect timeout for new connections.
    pub connect_timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.xero.com/api.xro/2.0".to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: "ledgerhook/0.1".to_string(),
        }
    }
}

/// HTTP client for resource lookups against the accounting API.
///
/// Uses connection pooling and configurable timeouts; lookups never follow
/// redirects, the API does not issue them for resource reads.
#[derive(Debug, Clone)]
pub struct AccountingClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl AccountingClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Config`] if the HTTP client cannot be built
    /// with the provided settings.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ResolveError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Config`] if the HTTP client cannot be built.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Base URL the client is pointed at.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Fetches one invoice by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotFound`] when the invoice does not exist,
    /// [`ResolveError::Authentication`] when the API rejects the
    /// credential, and [`ResolveError::Api`] or [`ResolveError::Http`] for
    /// other failures.
    pub async fn get_invoice(
        &self,
        token: &AccessToken,
        tenant_id: &str,
        invoice_id: &str,
    ) -> Result<Invoice> {
        let response: InvoicesResponse =
            self.fetch("Invoices", "invoice", token, tenant_id, invoice_id).await?;

        response
            .invoices
            .into_iter()
            .next()
            .ok_or_else(|| ResolveError::not_found("invoice", invoice_id))
    }

    /// Fetches one contact by identifier.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`AccountingClient::get_invoice`].
    pub async fn get_contact(
        &self,
        token: &AccessToken,
        tenant_id: &str,
        contact_id: &str,
    ) -> Result<Contact> {
        let response: ContactsResponse =
            self.fetch("Contacts", "contact", token, tenant_id, contact_id).await?;

        response
            .contacts
            .into_iter()
            .next()
            .ok_or_else(|| ResolveError::not_found("contact", contact_id))
    }

    /// Issues one authenticated GET against a collection and decodes the
    /// enveloped response.
    async fn fetch<T: DeserializeOwned>(
        &self,
        collection: &str,
        resource: &'static str,
        token: &AccessToken,
        tenant_id: &str,
        resource_id: &str,
    ) -> Result<T> {
        let url = format!("{}/{collection}/{resource_id}", self.config.base_url);

        debug!(%url, tenant_id, "Fetching resource");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token.reveal())
            .header("Xero-Tenant-Id", tenant_id)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            warn!(status = status.as_u16(), tenant_id, "Credential rejected by API");
            return Err(ResolveError::authentication(
                tenant_id,
                format!("API rejected credential with HTTP {}", status.as_u16()),
            ));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ResolveError::not_found(resource, resource_id));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResolveError::api(status.as_u16(), body));
        }

        Ok(response.json::<T>().await?)
    }
}
