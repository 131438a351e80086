//! Accounting API access and webhook event resolution.
//!
//! Turns verified webhook events into full API resources: credential
//! lookup through the [`CredentialStore`] seam, HTTP access through the
//! [`AccountingClient`], and category dispatch through the
//! [`ResolverRegistry`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod credentials;
pub mod error;
pub mod models;
pub mod resolve;

pub use client::{AccountingClient, ClientConfig};
pub use credentials::{AccessToken, CredentialStore, StaticTokenStore};
pub use error::{ResolveError, Result};
pub use models::{Contact, Invoice};
pub use resolve::{
    ContactResolver, InvoiceResolver, Resource, ResolveResource, ResolverRegistry,
    ResolvingEventHandler, CATEGORY_CONTACT, CATEGORY_INVOICE,
};
