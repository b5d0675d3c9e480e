use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::types::{
    CreateFilterRequest, Endpoint, EndpointDraft, EventType, EventTypeFilter, Subscription,
    SubscriptionRequest, UpdateFilterRequest,
};

/// Failure talking to a remote store. Callers treat every variant as terminal
/// for the current save attempt; there are no automatic retries.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("{0}")]
    NotFound(String),
    #[error("upstream rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("invalid response payload: {0}")]
    Decode(String),
}

#[async_trait]
pub trait EndpointStore: Send + Sync {
    async fn create_endpoint(&self, draft: &EndpointDraft) -> Result<Endpoint, StoreError>;
    async fn update_endpoint(
        &self,
        endpoint_id: Uuid,
        draft: &EndpointDraft,
    ) -> Result<Endpoint, StoreError>;
    async fn get_endpoint(&self, endpoint_id: Uuid) -> Result<Endpoint, StoreError>;
}

#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    async fn create_subscription(
        &self,
        req: &SubscriptionRequest,
    ) -> Result<Subscription, StoreError>;
    async fn update_subscription(
        &self,
        subscription_id: Uuid,
        req: &SubscriptionRequest,
    ) -> Result<Subscription, StoreError>;
    async fn get_subscription(&self, subscription_id: Uuid) -> Result<Subscription, StoreError>;
}

#[async_trait]
pub trait FilterStore: Send + Sync {
    async fn get_filters(&self, subscription_id: Uuid)
    -> Result<Vec<EventTypeFilter>, StoreError>;
    async fn create_filters(
        &self,
        subscription_id: Uuid,
        filters: &[CreateFilterRequest],
    ) -> Result<(), StoreError>;
    async fn update_filters(
        &self,
        subscription_id: Uuid,
        filters: &[UpdateFilterRequest],
    ) -> Result<(), StoreError>;
    /// Defined for completeness; the reconciler never calls it. Persisted
    /// filters whose event type was deselected are only logged.
    async fn delete_filter(&self, subscription_id: Uuid, filter_id: Uuid)
    -> Result<(), StoreError>;
}

#[async_trait]
pub trait EventTypeCatalog: Send + Sync {
    async fn get_event_types(&self) -> Result<Vec<EventType>, StoreError>;
}
