//! Error types for credential lookup and resource resolution.
//!
//! Authentication failures are kept distinct from resolution failures so
//! callers can tell "the credential was bad" apart from "the lookup did
//! not work". Transport errors carry the underlying client error.

use thiserror::Error;

/// Result type alias for resolution operations.
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Errors raised while resolving webhook events against the accounting API.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No valid credential could be produced or the API rejected it.
    #[error("authentication failed for tenant {tenant_id}: {message}")]
    Authentication {
        /// Tenant the credential was requested for.
        tenant_id: String,
        /// What went wrong obtaining or using the credential.
        message: String,
    },

    /// The event's category has no registered resolver.
    #[error("no resolver registered for category {category}")]
    UnsupportedCategory {
        /// The category tag from the event record.
        category: String,
    },

    /// The API answered but the resource does not exist.
    #[error("{resource} {id} not found")]
    NotFound {
        /// Resource kind that was requested.
        resource: &'static str,
        /// Identifier that was requested.
        id: String,
    },

    /// The API rejected the request with an unexpected status.
    #[error("accounting API error: HTTP {status}: {}", body_snippet(.body))]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Response body content.
        body: String,
    },

    /// Transport-level failure talking to the API.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid client configuration.
    #[error("invalid client configuration: {message}")]
    Config {
        /// Configuration error message.
        message: String,
    },
}

impl ResolveError {
    /// Creates an authentication error for a tenant.
    pub fn authentication(tenant_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Authentication { tenant_id: tenant_id.into(), message: message.into() }
    }

    /// Creates an unsupported-category error.
    pub fn unsupported_category(category: impl Into<String>) -> Self {
        Self::UnsupportedCategory { category: category.into() }
    }

    /// Creates a not-found error for a resource kind and id.
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { resource, id: id.into() }
    }

    /// Creates an API error from an HTTP response.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api { status, body: body.into() }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// Returns true when the failure was obtaining or using a credential.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}

// Error bodies can be arbitrarily large; rendered messages carry a bounded
// snippet while the variant keeps the full text.
fn body_snippet(body: &str) -> String {
    const MAX_CHARS: usize = 200;

    let trimmed = body.trim();
    let mut snippet: String = trimmed.chars().take(MAX_CHARS).collect();
    if snippet.len() < trimmed.len() {
        snippet.push_str("...");
    }
    snippet
}
