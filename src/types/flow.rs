use serde::{Deserialize, Serialize};
use specta::Type;
use uuid::Uuid;

use super::{
    Endpoint, EndpointDraft, EndpointSecret, EndpointSections, FilterDraft, LegacyFilter,
    Subscription,
};

/// Stages of the save flow that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "snake_case")]
pub enum FlowStage {
    Validation,
    Endpoint,
    Subscription,
    Filters,
}

/// State machine for one save attempt. `Failed` is absorbing: once a stage
/// fails, no later stage runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "snake_case", tag = "status", content = "stage")]
pub enum FlowState {
    Idle,
    ValidatingEndpoint,
    SavingEndpoint,
    SavingSubscription,
    ReconcilingFilters,
    Done,
    Failed(FlowStage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// One user-facing notification. Partial failures surface as warnings so the
/// caller can tell "saved with caveats" apart from "nothing saved".
#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Everything needed for one save attempt: the endpoint form, the selected
/// event types and their filter drafts, and the ids of resources being
/// updated in place (absent on the create path).
#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct SaveSubscriptionRequest {
    pub endpoint: EndpointDraft,
    #[serde(default)]
    pub sections: EndpointSections,
    pub endpoint_id: Option<Uuid>,
    pub subscription_id: Option<Uuid>,
    pub source_id: Option<Uuid>,
    pub event_types: Vec<String>,
    pub filters: Vec<FilterDraft>,
    pub legacy_filter: Option<LegacyFilter>,
}

/// Outcome of a save attempt. The flow never rolls back, so the report keeps
/// whatever was persisted before the failing stage.
#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct FlowReport {
    pub state: FlowState,
    pub endpoint: Option<Endpoint>,
    pub subscription: Option<Subscription>,
    pub active_secret: Option<EndpointSecret>,
    pub field_errors: Vec<FieldError>,
    pub notices: Vec<Notice>,
    pub completed_at: String,
}
