#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::AUTHORIZATION},
    middleware,
    routing::{get, post},
};
use http_body_util::BodyExt;
use reconciler::{
    auth::api_auth,
    handlers::{event_types::list_event_types_handler, subscriptions::save_subscription_handler},
    state::AppState,
    stores::{
        EndpointStore, EventTypeCatalog, FilterStore, StoreError, SubscriptionStore,
    },
    types::{
        CreateFilterRequest, Endpoint, EndpointDraft, EventType, EventTypeFilter, Subscription,
        SubscriptionRequest, UpdateFilterRequest,
    },
};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

/// In-memory stand-in for the upstream API. Every write succeeds.
#[derive(Default)]
struct InMemoryUpstream {
    event_types: Vec<EventType>,
}

#[async_trait]
impl EndpointStore for InMemoryUpstream {
    async fn create_endpoint(&self, draft: &EndpointDraft) -> Result<Endpoint, StoreError> {
        Ok(Endpoint {
            uid: Uuid::new_v4(),
            name: draft.name.clone(),
            url: draft.url.clone(),
            owner_id: draft.owner_id.clone(),
            http_timeout: draft.http_timeout,
            rate_limit: draft.rate_limit,
            rate_limit_duration: draft.rate_limit_duration,
            support_email: draft.support_email.clone(),
            slack_webhook_url: draft.slack_webhook_url.clone(),
            advanced_signatures: draft.advanced_signatures.unwrap_or(false),
            authentication: draft.authentication.clone(),
            secrets: Vec::new(),
            created_at: None,
            updated_at: None,
        })
    }

    async fn update_endpoint(
        &self,
        endpoint_id: Uuid,
        draft: &EndpointDraft,
    ) -> Result<Endpoint, StoreError> {
        let mut endpoint = self.create_endpoint(draft).await?;
        endpoint.uid = endpoint_id;
        Ok(endpoint)
    }

    async fn get_endpoint(&self, _endpoint_id: Uuid) -> Result<Endpoint, StoreError> {
        Err(StoreError::NotFound("endpoint not found".to_string()))
    }
}

#[async_trait]
impl SubscriptionStore for InMemoryUpstream {
    async fn create_subscription(
        &self,
        req: &SubscriptionRequest,
    ) -> Result<Subscription, StoreError> {
        Ok(Subscription {
            uid: Uuid::new_v4(),
            name: req.name.clone().unwrap_or_default(),
            endpoint_id: req.endpoint_id,
            source_id: req.source_id,
            filter_config: req.filter_config.clone(),
            created_at: None,
            updated_at: None,
        })
    }

    async fn update_subscription(
        &self,
        subscription_id: Uuid,
        req: &SubscriptionRequest,
    ) -> Result<Subscription, StoreError> {
        let mut subscription = self.create_subscription(req).await?;
        subscription.uid = subscription_id;
        Ok(subscription)
    }

    async fn get_subscription(&self, _subscription_id: Uuid) -> Result<Subscription, StoreError> {
        Err(StoreError::NotFound("subscription not found".to_string()))
    }
}

#[async_trait]
impl FilterStore for InMemoryUpstream {
    async fn get_filters(
        &self,
        _subscription_id: Uuid,
    ) -> Result<Vec<EventTypeFilter>, StoreError> {
        Ok(Vec::new())
    }

    async fn create_filters(
        &self,
        _subscription_id: Uuid,
        _filters: &[CreateFilterRequest],
    ) -> Result<(), StoreError> {
        Ok(())
    }

    async fn update_filters(
        &self,
        _subscription_id: Uuid,
        _filters: &[UpdateFilterRequest],
    ) -> Result<(), StoreError> {
        Ok(())
    }

    async fn delete_filter(
        &self,
        _subscription_id: Uuid,
        _filter_id: Uuid,
    ) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl EventTypeCatalog for InMemoryUpstream {
    async fn get_event_types(&self) -> Result<Vec<EventType>, StoreError> {
        Ok(self.event_types.clone())
    }
}

fn build_app(upstream: InMemoryUpstream, api_token: Option<&str>) -> Router {
    let upstream = Arc::new(upstream);
    let state = AppState {
        endpoints: upstream.clone(),
        subscriptions: upstream.clone(),
        filters: upstream.clone(),
        event_types: upstream,
        api_token: api_token.map(str::to_string),
    };

    Router::new()
        .route("/subscriptions/save", post(save_subscription_handler))
        .route("/event-types", get(list_event_types_handler))
        .layer(middleware::from_fn_with_state(state.clone(), api_auth))
        .with_state(state)
}

fn save_body(event_types: &[&str], filter_keys: &[&str]) -> Value {
    let filters: Vec<Value> = filter_keys
        .iter()
        .map(|key| json!({"event_type": key}))
        .collect();
    json!({
        "endpoint": {
            "name": "orders-service",
            "url": "https://orders.example.com/hooks"
        },
        "event_types": event_types,
        "filters": filters
    })
}

fn save_request(body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/subscriptions/save")
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth gate
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn auth_disabled_allows_request_without_header() {
    let app = build_app(InMemoryUpstream::default(), None);
    let body = save_body(&["order.created"], &["order.created"]);

    let response = app.oneshot(save_request(&body, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_token_returns_401_when_configured() {
    let app = build_app(InMemoryUpstream::default(), Some("secret-token"));
    let body = save_body(&["order.created"], &[]);

    let response = app.oneshot(save_request(&body, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_token_returns_401() {
    let app = build_app(InMemoryUpstream::default(), Some("secret-token"));
    let body = save_body(&["order.created"], &[]);

    let response = app
        .oneshot(save_request(&body, Some("not-the-token")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_token_allows_request() {
    let app = build_app(InMemoryUpstream::default(), Some("secret-token"));
    let body = save_body(&["order.created"], &["order.created"]);

    let response = app
        .oneshot(save_request(&body, Some("secret-token")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

// ─────────────────────────────────────────────────────────────────────────────
// Boundary validation - malformed selections are rejected before the flow runs
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn wildcard_mixed_with_specific_types_is_rejected() {
    let app = build_app(InMemoryUpstream::default(), None);
    let body = save_body(&["*", "order.created"], &[]);

    let response = app.oneshot(save_request(&body, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["code"], "validation");
}

#[tokio::test]
async fn empty_event_type_list_is_rejected() {
    let app = build_app(InMemoryUpstream::default(), None);
    let body = save_body(&[], &[]);

    let response = app.oneshot(save_request(&body, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_filter_keys_are_rejected() {
    let app = build_app(InMemoryUpstream::default(), None);
    let body = save_body(&["order.created"], &["order.created", "order.created"]);

    let response = app.oneshot(save_request(&body, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn filter_for_unselected_event_type_is_rejected() {
    let app = build_app(InMemoryUpstream::default(), None);
    let body = save_body(&["order.created"], &["order.deleted"]);

    let response = app.oneshot(save_request(&body, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_body_is_rejected() {
    let app = build_app(InMemoryUpstream::default(), None);
    let request = Request::builder()
        .method("POST")
        .uri("/subscriptions/save")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ─────────────────────────────────────────────────────────────────────────────
// Successful save - the report comes back as the response body
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn successful_save_returns_done_report() {
    let app = build_app(InMemoryUpstream::default(), None);
    let body = save_body(&["order.created"], &["order.created"]);

    let response = app.oneshot(save_request(&body, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let report = response_json(response).await;
    assert_eq!(report["state"]["status"], "done");
    assert!(report["endpoint"].is_object());
    assert!(report["subscription"].is_object());
    assert_eq!(
        report["subscription"]["filter_config"]["event_types"],
        json!(["order.created"])
    );
    assert!(report["field_errors"].as_array().unwrap().is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Validation-stage failure still answers 200 with a failed report
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn endpoint_validation_failure_returns_failed_report() {
    let app = build_app(InMemoryUpstream::default(), None);
    let mut body = save_body(&["order.created"], &[]);
    body["endpoint"]["url"] = json!("not-a-url");

    let response = app.oneshot(save_request(&body, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let report = response_json(response).await;
    assert_eq!(report["state"]["status"], "failed");
    assert_eq!(report["state"]["stage"], "validation");
    assert!(!report["field_errors"].as_array().unwrap().is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Event type catalog
// ─────────────────────────────────────────────────────────────────────────────

fn catalog_entry(name: &str, deprecated_at: Option<&str>) -> EventType {
    EventType {
        uid: Uuid::new_v4(),
        name: name.to_string(),
        description: None,
        deprecated_at: deprecated_at.map(str::to_string),
    }
}

#[tokio::test]
async fn event_types_endpoint_hides_deprecated_by_default() {
    let upstream = InMemoryUpstream {
        event_types: vec![
            catalog_entry("order.created", None),
            catalog_entry("order.legacy", Some("2025-06-01T00:00:00Z")),
        ],
    };
    let app = build_app(upstream, None);

    let request = Request::builder()
        .uri("/event-types")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    let names: Vec<&str> = json["event_types"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["order.created"]);
}

#[tokio::test]
async fn event_types_endpoint_includes_deprecated_on_request() {
    let upstream = InMemoryUpstream {
        event_types: vec![
            catalog_entry("order.created", None),
            catalog_entry("order.legacy", Some("2025-06-01T00:00:00Z")),
        ],
    };
    let app = build_app(upstream, None);

    let request = Request::builder()
        .uri("/event-types?include_deprecated=true")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["event_types"].as_array().unwrap().len(), 2);
}
