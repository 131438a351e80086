//! Credential manager seam.
//!
//! Resolution needs a bearer token per tenant. Token acquisition and
//! refresh live outside this service; the [`CredentialStore`] trait is the
//! boundary to that subsystem, and [`StaticTokenStore`] is the bundled
//! in-memory implementation for development and tests.

use std::{collections::HashMap, fmt};

use crate::error::{ResolveError, Result};

/// A bearer token for the accounting API.
///
/// Debug output is redacted so tokens cannot leak into logs or error
/// messages.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token value, for constructing Authorization headers.
    pub fn reveal(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(****)")
    }
}

/// Source of per-tenant API credentials.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync + fmt::Debug {
    /// Produces a bearer token valid for the given tenant.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Authentication`] when no valid credential
    /// can be produced.
    async fn access_token(&self, tenant_id: &str) -> Result<AccessToken>;
}

/// In-memory token store keyed by tenant id.
///
/// Stands in for a real OAuth subsystem in development and tests; tokens
/// are handed out as-is and never refreshed.
#[derive(Debug, Default)]
pub struct StaticTokenStore {
    tokens: HashMap<String, AccessToken>,
}

impl StaticTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self { tokens: HashMap::new() }
    }

    /// Adds a token for a tenant, replacing any previous one.
    pub fn insert(&mut self, tenant_id: impl Into<String>, token: impl Into<String>) {
        self.tokens.insert(tenant_id.into(), AccessToken::new(token));
    }

    /// Builder-style insert for wiring code.
    #[must_use]
    pub fn with_token(mut self, tenant_id: impl Into<String>, token: impl Into<String>) -> Self {
        self.insert(tenant_id, token);
        self
    }

    /// Number of tenants with a stored token.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when no tokens are stored.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait::async_trait]
impl CredentialStore for StaticTokenStore {
    async fn access_token(&self, tenant_id: &str) -> Result<AccessToken> {
        self.tokens.get(tenant_id).cloned().ok_or_else(|| {
            ResolveError::authentication(tenant_id, "no token configured for tenant")
        })
    }
}
