//! Typed models for the accounting API.
//!
//! Field coverage is intentionally partial: only what the service reads.
//! The platform serializes members in PascalCase with `ID` spelled out in
//! identifier names, and wraps every query result in a collection envelope.

use serde::{Deserialize, Serialize};

/// An invoice as returned by the accounting API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Invoice {
    /// Unique invoice identifier.
    #[serde(rename = "InvoiceID")]
    pub invoice_id: String,

    /// Human-facing invoice number, when assigned.
    #[serde(default)]
    pub invoice_number: Option<String>,

    /// Invoice kind, `ACCREC` (sales) or `ACCPAY` (bills).
    #[serde(rename = "Type", default)]
    pub invoice_type: Option<String>,

    /// Lifecycle status, e.g. `DRAFT`, `AUTHORISED`, `PAID`.
    #[serde(default)]
    pub status: Option<String>,

    /// Invoice total including tax.
    #[serde(default)]
    pub total: Option<f64>,

    /// The contact the invoice is addressed to.
    #[serde(default)]
    pub contact: Option<Contact>,
}

/// A contact as returned by the accounting API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Contact {
    /// Unique contact identifier.
    #[serde(rename = "ContactID")]
    pub contact_id: String,

    /// Display name of the contact.
    #[serde(default)]
    pub name: Option<String>,

    /// Primary email address, when recorded.
    #[serde(default)]
    pub email_address: Option<String>,

    /// Lifecycle status, e.g. `ACTIVE` or `ARCHIVED`.
    #[serde(default)]
    pub contact_status: Option<String>,
}

/// Collection envelope for invoice queries.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct InvoicesResponse {
    #[serde(default)]
    pub invoices: Vec<Invoice>,
}

/// Collection envelope for contact queries.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ContactsResponse {
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn invoice_parses_platform_member_names() {
        let invoice: Invoice = serde_json::from_value(json!({
            "InvoiceID": "inv-1",
            "InvoiceNumber": "INV-0001",
            "Type": "ACCREC",
            "Status": "AUTHORISED",
            "Total": 125.50,
            "Contact": { "ContactID": "con-1", "Name": "Acme Ltd" }
        }))
        .unwrap();

        assert_eq!(invoice.invoice_id, "inv-1");
        assert_eq!(invoice.invoice_number.as_deref(), Some("INV-0001"));
        assert_eq!(invoice.invoice_type.as_deref(), Some("ACCREC"));
        assert_eq!(invoice.total, Some(125.50));
        assert_eq!(invoice.contact.unwrap().name.as_deref(), Some("Acme Ltd"));
    }

    #[test]
    fn optional_members_may_be_absent() {
        let contact: Contact = serde_json::from_value(json!({ "ContactID": "con-1" })).unwrap();

        assert_eq!(contact.contact_id, "con-1");
        assert_eq!(contact.name, None);
        assert_eq!(contact.email_address, None);
    }

    #[test]
    fn collection_envelopes_unwrap() {
        let response: InvoicesResponse = serde_json::from_value(json!({
            "Invoices": [{ "InvoiceID": "inv-1" }, { "InvoiceID": "inv-2" }]
        }))
        .unwrap();

        assert_eq!(response.invoices.len(), 2);
    }
}
