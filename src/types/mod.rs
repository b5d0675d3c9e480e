pub mod api_error;
pub mod endpoint;
pub mod event_type;
pub mod filter;
pub mod flow;
pub mod subscription;

#[allow(unused_imports)]
pub use api_error::{ApiErrorCode, ApiErrorResponse};
#[allow(unused_imports)]
pub use endpoint::{Endpoint, EndpointAuth, EndpointDraft, EndpointSecret, EndpointSections};
#[allow(unused_imports)]
pub use event_type::{EventType, ListEventTypesResponse, WILDCARD_EVENT_TYPE};
#[allow(unused_imports)]
pub use filter::{
    CreateFilterRequest, EventTypeFilter, FilterDraft, FilterSchema, UpdateFilterRequest,
};
#[allow(unused_imports)]
pub use flow::{
    FieldError, FlowReport, FlowStage, FlowState, Notice, NoticeKind, SaveSubscriptionRequest,
};
#[allow(unused_imports)]
pub use subscription::{FilterConfig, LegacyFilter, Subscription, SubscriptionRequest};
