use serde::{Deserialize, Serialize};
use specta::Type;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct Endpoint {
    pub uid: Uuid,
    pub name: String,
    pub url: String,
    pub owner_id: Option<String>,
    pub http_timeout: Option<u64>,
    pub rate_limit: Option<u64>,
    pub rate_limit_duration: Option<u64>,
    pub support_email: Option<String>,
    pub slack_webhook_url: Option<String>,
    pub advanced_signatures: bool,
    pub authentication: Option<EndpointAuth>,
    pub secrets: Vec<EndpointSecret>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Endpoint {
    /// The secret currently handed to signers: the first one the server
    /// returned with no expiry, in server order.
    pub fn active_secret(&self) -> Option<&EndpointSecret> {
        self.secrets.iter().find(|secret| secret.expires_at.is_none())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct EndpointSecret {
    pub uid: Uuid,
    pub value: String,
    pub expires_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct EndpointAuth {
    pub header_name: String,
    pub header_value: String,
}

/// Endpoint form contents as submitted by the dashboard. Optional fields
/// belong to collapsible sections; whether they are required depends on
/// which sections are visible (see `EndpointSections`).
#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct EndpointDraft {
    pub name: String,
    pub url: String,
    pub owner_id: Option<String>,
    pub secret: Option<String>,
    pub http_timeout: Option<u64>,
    pub rate_limit: Option<u64>,
    pub rate_limit_duration: Option<u64>,
    pub support_email: Option<String>,
    pub slack_webhook_url: Option<String>,
    pub authentication: Option<EndpointAuth>,
    pub advanced_signatures: Option<bool>,
}

/// Which optional configuration sections are shown on the endpoint form.
/// Hidden sections contribute no required fields.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Type)]
#[serde(default)]
pub struct EndpointSections {
    pub timeout: bool,
    pub rate_limit: bool,
    pub auth: bool,
    pub notifications: bool,
    pub signature: bool,
}
