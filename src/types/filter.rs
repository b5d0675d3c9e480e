use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use specta::Type;
use uuid::Uuid;

/// A per-event-type filter as persisted by the subscriptions API. At most one
/// exists per `(subscription_id, event_type)` pair.
#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct EventTypeFilter {
    pub uid: Uuid,
    pub subscription_id: Uuid,
    pub event_type: String,
    pub headers: Value,
    pub body: Value,
    pub raw_headers: Option<Value>,
    pub raw_body: Option<Value>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A locally-held filter definition, keyed by event type in the selection.
/// `uid` is absent until the filter has been persisted at least once.
#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct FilterDraft {
    pub event_type: String,
    pub uid: Option<Uuid>,
    #[serde(default = "empty_object")]
    pub headers: Value,
    #[serde(default = "empty_object")]
    pub body: Value,
    pub raw_headers: Option<Value>,
    pub raw_body: Option<Value>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_modified: bool,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl FilterDraft {
    /// Fresh draft with empty header/body schemas.
    pub fn empty(event_type: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            uid: None,
            headers: Value::Object(Map::new()),
            body: Value::Object(Map::new()),
            raw_headers: None,
            raw_body: None,
            is_new: true,
            is_modified: false,
        }
    }

    /// Draft seeded from a persisted filter, carrying its identifier.
    pub fn from_persisted(filter: &EventTypeFilter) -> Self {
        Self {
            event_type: filter.event_type.clone(),
            uid: Some(filter.uid),
            headers: filter.headers.clone(),
            body: filter.body.clone(),
            raw_headers: filter.raw_headers.clone(),
            raw_body: filter.raw_body.clone(),
            is_new: false,
            is_modified: false,
        }
    }
}

/// Header/body schema pair produced by the filter-schema editor.
#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct FilterSchema {
    pub header_schema: Value,
    pub body_schema: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct CreateFilterRequest {
    pub event_type: String,
    pub headers: Value,
    pub body: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_headers: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_body: Option<Value>,
}

/// Update payload for a persisted filter. `event_type` is included only when
/// it differs from the persisted value, to avoid server-side uniqueness churn.
#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct UpdateFilterRequest {
    pub uid: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    pub headers: Value,
    pub body: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_headers: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_body: Option<Value>,
}
