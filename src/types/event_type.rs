use serde::{Deserialize, Serialize};
use specta::Type;
use uuid::Uuid;

/// Reserved event-type name meaning "all event types".
pub const WILDCARD_EVENT_TYPE: &str = "*";

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct EventType {
    pub uid: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub deprecated_at: Option<String>,
}

impl EventType {
    pub fn is_wildcard(&self) -> bool {
        self.name == WILDCARD_EVENT_TYPE
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated_at.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct ListEventTypesResponse {
    pub event_types: Vec<EventType>,
}
