//! Response models for the Verbatim cloud API.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Token metadata returned by the "who am I" endpoint.
/// Treated as an opaque read-only result; the field set is owned by
/// the service contract.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenInfo {
    #[serde(rename = "organizationId")]
    pub organization_id: String,

    #[serde(rename = "keyId", default)]
    pub key_id: Option<String>,

    #[serde(rename = "expiresAt", default)]
    pub expires_at: Option<DateTime<Utc>>,
}
