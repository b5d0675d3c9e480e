use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use specta::Type;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct Subscription {
    pub uid: Uuid,
    pub name: String,
    pub endpoint_id: Uuid,
    pub source_id: Option<Uuid>,
    pub filter_config: FilterConfig,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Create/update body for a subscription. `name` is set on create (it is
/// synthesized from the endpoint name) and left alone on update.
#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct SubscriptionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub endpoint_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<Uuid>,
    pub filter_config: FilterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct FilterConfig {
    pub event_types: Vec<String>,
    /// Legacy single global filter. Superseded by per-event-type filters but
    /// still written for older consumers.
    pub filter: LegacyFilter,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct LegacyFilter {
    pub headers: Value,
    pub body: Value,
}

impl Default for LegacyFilter {
    fn default() -> Self {
        Self {
            headers: Value::Object(Map::new()),
            body: Value::Object(Map::new()),
        }
    }
}
