mod config;

pub use config::{ClientConfig, ClientConfigError, UpstreamAuth};

use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::{RequestBuilder, StatusCode, header::AUTHORIZATION};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::stores::{
    EndpointStore, EventTypeCatalog, FilterStore, StoreError, SubscriptionStore,
};
use crate::types::{
    CreateFilterRequest, Endpoint, EndpointDraft, EventType, EventTypeFilter, Subscription,
    SubscriptionRequest, UpdateFilterRequest,
};

/// JSON-over-HTTP implementation of the remote stores, scoped to one
/// project. Each call is a single awaited request; failures are terminal
/// for the caller's save attempt (no retries here).
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    project_id: Uuid,
    auth: Option<UpstreamAuth>,
}

/// The upstream wraps every success payload in `{ status, message, data }`.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct BulkFilters<'a, T> {
    filters: &'a [T],
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| StoreError::Transport(err.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project_id: config.project_id,
            auth: config.auth,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/projects/{}/{path}", self.base_url, self.project_id)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Some(UpstreamAuth::Bearer(token)) => req.bearer_auth(token),
            Some(UpstreamAuth::Basic { username, password }) => {
                let credentials = STANDARD.encode(format!("{username}:{password}"));
                req.header(AUTHORIZATION, format!("Basic {credentials}"))
            }
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, StoreError> {
        let bytes = self.exchange(req).await?;
        let envelope: ApiEnvelope<T> = serde_json::from_slice(&bytes)
            .map_err(|err| StoreError::Decode(err.to_string()))?;
        Ok(envelope.data)
    }

    async fn send_unit(&self, req: RequestBuilder) -> Result<(), StoreError> {
        self.exchange(req).await.map(|_| ())
    }

    async fn exchange(&self, req: RequestBuilder) -> Result<Vec<u8>, StoreError> {
        let response = self
            .authorize(req)
            .send()
            .await
            .map_err(|err| StoreError::Transport(err.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| StoreError::Transport(err.to_string()))?;

        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(error_message(&bytes)));
        }
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "upstream rejected request");
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message: error_message(&bytes),
            });
        }

        Ok(bytes.to_vec())
    }
}

fn error_message(bytes: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(bytes)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| String::from_utf8_lossy(bytes).into_owned())
}

#[async_trait]
impl EndpointStore for ApiClient {
    async fn create_endpoint(&self, draft: &EndpointDraft) -> Result<Endpoint, StoreError> {
        self.send(self.http.post(self.url("endpoints")).json(draft))
            .await
    }

    async fn update_endpoint(
        &self,
        endpoint_id: Uuid,
        draft: &EndpointDraft,
    ) -> Result<Endpoint, StoreError> {
        self.send(
            self.http
                .put(self.url(&format!("endpoints/{endpoint_id}")))
                .json(draft),
        )
        .await
    }

    async fn get_endpoint(&self, endpoint_id: Uuid) -> Result<Endpoint, StoreError> {
        self.send(self.http.get(self.url(&format!("endpoints/{endpoint_id}"))))
            .await
    }
}

#[async_trait]
impl SubscriptionStore for ApiClient {
    async fn create_subscription(
        &self,
        req: &SubscriptionRequest,
    ) -> Result<Subscription, StoreError> {
        self.send(self.http.post(self.url("subscriptions")).json(req))
            .await
    }

    async fn update_subscription(
        &self,
        subscription_id: Uuid,
        req: &SubscriptionRequest,
    ) -> Result<Subscription, StoreError> {
        self.send(
            self.http
                .put(self.url(&format!("subscriptions/{subscription_id}")))
                .json(req),
        )
        .await
    }

    async fn get_subscription(&self, subscription_id: Uuid) -> Result<Subscription, StoreError> {
        self.send(
            self.http
                .get(self.url(&format!("subscriptions/{subscription_id}"))),
        )
        .await
    }
}

#[async_trait]
impl FilterStore for ApiClient {
    async fn get_filters(
        &self,
        subscription_id: Uuid,
    ) -> Result<Vec<EventTypeFilter>, StoreError> {
        self.send(
            self.http
                .get(self.url(&format!("subscriptions/{subscription_id}/filters"))),
        )
        .await
    }

    async fn create_filters(
        &self,
        subscription_id: Uuid,
        filters: &[CreateFilterRequest],
    ) -> Result<(), StoreError> {
        self.send_unit(
            self.http
                .post(self.url(&format!("subscriptions/{subscription_id}/filters")))
                .json(&BulkFilters { filters }),
        )
        .await
    }

    async fn update_filters(
        &self,
        subscription_id: Uuid,
        filters: &[UpdateFilterRequest],
    ) -> Result<(), StoreError> {
        self.send_unit(
            self.http
                .put(self.url(&format!(
                    "subscriptions/{subscription_id}/filters/bulk_update"
                )))
                .json(&BulkFilters { filters }),
        )
        .await
    }

    async fn delete_filter(
        &self,
        subscription_id: Uuid,
        filter_id: Uuid,
    ) -> Result<(), StoreError> {
        self.send_unit(self.http.delete(self.url(&format!(
            "subscriptions/{subscription_id}/filters/{filter_id}"
        ))))
        .await
    }
}

#[async_trait]
impl EventTypeCatalog for ApiClient {
    async fn get_event_types(&self) -> Result<Vec<EventType>, StoreError> {
        self.send(self.http.get(self.url("event-types"))).await
    }
}
