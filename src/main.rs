use axum::{
    Router, middleware,
    routing::{get, post},
};
use reconciler::{
    auth::api_auth,
    client::{ApiClient, ClientConfig},
    handlers::{event_types::list_event_types_handler, subscriptions::save_subscription_handler},
    state::AppState,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let bind_addr = std::env::var("RECONCILER_BIND_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3002".to_string());
    let api_token = std::env::var("RECONCILER_API_TOKEN")
        .ok()
        .filter(|token| !token.trim().is_empty());

    let client = Arc::new(ApiClient::new(ClientConfig::from_env()?)?);

    let state = AppState {
        endpoints: client.clone(),
        subscriptions: client.clone(),
        filters: client.clone(),
        event_types: client,
        api_token,
    };

    let app = Router::new()
        .route("/subscriptions/save", post(save_subscription_handler))
        .route("/event-types", get(list_event_types_handler))
        .layer(middleware::from_fn_with_state(state.clone(), api_auth))
        .with_state(state);

    let addr: SocketAddr = bind_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
