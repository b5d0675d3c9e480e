use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{error::ApiError, handlers::map_store_error, state::AppState, types::ListEventTypesResponse};

#[derive(Debug, Deserialize)]
pub struct ListEventTypesQuery {
    include_deprecated: Option<bool>,
}

/// Catalog passthrough. Deprecated event types are filtered out unless the
/// caller explicitly asks for them.
pub async fn list_event_types_handler(
    State(state): State<AppState>,
    Query(query): Query<ListEventTypesQuery>,
) -> Result<Json<ListEventTypesResponse>, ApiError> {
    let mut event_types = state
        .event_types
        .get_event_types()
        .await
        .map_err(map_store_error)?;

    if !query.include_deprecated.unwrap_or(false) {
        event_types.retain(|event_type| !event_type.is_deprecated());
    }

    Ok(Json(ListEventTypesResponse { event_types }))
}
