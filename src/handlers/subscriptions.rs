use std::collections::HashSet;

use axum::{Json, extract::State};

use crate::{
    error::ApiError,
    extractors::ValidJson,
    flow::UpsertFlow,
    state::AppState,
    types::{FlowReport, SaveSubscriptionRequest, WILDCARD_EVENT_TYPE},
};

/// Run one save attempt end to end. Partial failures still answer 200: the
/// report carries the failed stage and the per-stage notices.
pub async fn save_subscription_handler(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<SaveSubscriptionRequest>,
) -> Result<Json<FlowReport>, ApiError> {
    validate_request(&req)?;

    let flow = UpsertFlow::new(
        state.endpoints.as_ref(),
        state.subscriptions.as_ref(),
        state.filters.as_ref(),
    );
    let report = flow.run(&req).await;

    Ok(Json(report))
}

/// Boundary checks for the invariants the selection engine maintains
/// in-process: wildcard exclusivity, a non-empty selection, and filters keyed
/// uniquely by a selected event type.
fn validate_request(req: &SaveSubscriptionRequest) -> Result<(), ApiError> {
    if req.event_types.is_empty() {
        return Err(ApiError::BadRequest(
            "at least one event type must be selected".to_string(),
        ));
    }

    let selected: HashSet<&str> = req.event_types.iter().map(String::as_str).collect();
    if selected.len() != req.event_types.len() {
        return Err(ApiError::BadRequest(
            "event_types must not contain duplicates".to_string(),
        ));
    }
    if selected.contains(WILDCARD_EVENT_TYPE) && selected.len() > 1 {
        return Err(ApiError::BadRequest(
            "the wildcard event type excludes all specific event types".to_string(),
        ));
    }

    let mut filter_keys: HashSet<&str> = HashSet::new();
    for filter in &req.filters {
        if !filter_keys.insert(filter.event_type.as_str()) {
            return Err(ApiError::BadRequest(format!(
                "duplicate filter for event type {}",
                filter.event_type
            )));
        }
        if !selected.contains(filter.event_type.as_str()) {
            return Err(ApiError::BadRequest(format!(
                "filter references unselected event type {}",
                filter.event_type
            )));
        }
    }

    Ok(())
}
