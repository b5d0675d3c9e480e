use std::sync::Arc;

use crate::stores::{EndpointStore, EventTypeCatalog, FilterStore, SubscriptionStore};

#[derive(Clone)]
pub struct AppState {
    pub endpoints: Arc<dyn EndpointStore>,
    pub subscriptions: Arc<dyn SubscriptionStore>,
    pub filters: Arc<dyn FilterStore>,
    pub event_types: Arc<dyn EventTypeCatalog>,
    /// Bearer token required on every route; `None` disables auth.
    pub api_token: Option<String>,
}
