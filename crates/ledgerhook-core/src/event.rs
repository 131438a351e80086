//! Typed webhook event records.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One event notification from the accounting platform.
///
/// Events are plain values: two records parsed from identical JSON compare
/// equal regardless of which envelope produced them, and no field mutates
/// after construction. Field values are kept exactly as the platform sent
/// them; presence and type are enforced during envelope parsing, the values
/// themselves are opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    resource_url: String,
    resource_id: String,
    event_date_utc: String,
    event_type: String,
    event_category: String,
    tenant_id: String,
    tenant_type: String,
}

impl WebhookEvent {
    /// API URL of the resource this event refers to.
    pub fn resource_url(&self) -> &str {
        &self.resource_url
    }

    /// Identifier of the resource this event refers to.
    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    /// Timestamp of the event as sent by the platform.
    pub fn event_date_utc(&self) -> &str {
        &self.event_date_utc
    }

    /// Action tag, e.g. `CREATE` or `UPDATE`.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Resource category tag, e.g. `INVOICE` or `CONTACT`.
    pub fn event_category(&self) -> &str {
        &self.event_category
    }

    /// Identifier of the organisation the event belongs to.
    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    /// Tenant kind tag, e.g. `ORGANISATION`.
    pub fn tenant_type(&self) -> &str {
        &self.tenant_type
    }

    /// Parses the event timestamp.
    ///
    /// The platform sends timestamps both with an offset
    /// (`2021-01-01T00:00:00.000Z`) and without one
    /// (`2021-01-01T00:00:00.000`); offset-less values are read as UTC.
    ///
    /// # Errors
    ///
    /// Returns the chrono parse error when the value is not a timestamp in
    /// either form.
    pub fn event_date(&self) -> Result<DateTime<Utc>, chrono::ParseError> {
        match self.event_date_utc.parse::<DateTime<Utc>>() {
            Ok(instant) => Ok(instant),
            Err(_) => self.event_date_utc.parse::<NaiveDateTime>().map(|naive| naive.and_utc()),
        }
    }
}
