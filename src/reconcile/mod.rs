use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::stores::{FilterStore, StoreError};
use crate::types::{CreateFilterRequest, EventTypeFilter, FilterDraft, UpdateFilterRequest};

/// Create/update deltas between the local filter drafts and the persisted
/// filter set. `orphaned` holds persisted filters no local draft claims;
/// they are surfaced but never deleted (see `FilterStore::delete_filter`).
#[derive(Debug, Clone, Default)]
pub struct FilterPlan {
    pub to_create: Vec<CreateFilterRequest>,
    pub to_update: Vec<UpdateFilterRequest>,
    pub orphaned: Vec<EventTypeFilter>,
}

/// Partition local drafts against the persisted filters.
///
/// Every local draft lands in exactly one of `to_create` / `to_update`. A
/// draft matches a persisted filter by its known uid first, falling back to
/// the event-type key. Updates always carry the persisted uid; `event_type`
/// is set on the payload only when it changed.
pub fn plan_filters(local: &[FilterDraft], persisted: &[EventTypeFilter]) -> FilterPlan {
    let by_uid: HashMap<Uuid, &EventTypeFilter> =
        persisted.iter().map(|filter| (filter.uid, filter)).collect();
    let by_event_type: HashMap<&str, &EventTypeFilter> = persisted
        .iter()
        .map(|filter| (filter.event_type.as_str(), filter))
        .collect();

    let mut plan = FilterPlan::default();
    let mut claimed: HashSet<Uuid> = HashSet::new();

    for draft in local {
        let existing = draft
            .uid
            .and_then(|uid| by_uid.get(&uid).copied())
            .or_else(|| by_event_type.get(draft.event_type.as_str()).copied())
            .filter(|filter| !claimed.contains(&filter.uid));

        match existing {
            Some(filter) => {
                claimed.insert(filter.uid);
                let event_type =
                    (filter.event_type != draft.event_type).then(|| draft.event_type.clone());
                plan.to_update.push(UpdateFilterRequest {
                    uid: filter.uid,
                    event_type,
                    headers: draft.headers.clone(),
                    body: draft.body.clone(),
                    raw_headers: draft.raw_headers.clone(),
                    raw_body: draft.raw_body.clone(),
                });
            }
            None => plan.to_create.push(CreateFilterRequest {
                event_type: draft.event_type.clone(),
                headers: draft.headers.clone(),
                body: draft.body.clone(),
                raw_headers: draft.raw_headers.clone(),
                raw_body: draft.raw_body.clone(),
            }),
        }
    }

    plan.orphaned = persisted
        .iter()
        .filter(|filter| !claimed.contains(&filter.uid))
        .cloned()
        .collect();

    plan
}

/// Fetch the subscription's persisted filters and diff the local drafts
/// against them. A fetch failure propagates before any write is attempted,
/// so stale local-only state can never produce duplicate filters.
pub async fn reconcile_filters(
    store: &dyn FilterStore,
    subscription_id: Uuid,
    local: &[FilterDraft],
) -> Result<FilterPlan, StoreError> {
    let persisted = store.get_filters(subscription_id).await?;
    let plan = plan_filters(local, &persisted);

    for filter in &plan.orphaned {
        tracing::warn!(
            subscription_id = %subscription_id,
            filter_id = %filter.uid,
            event_type = %filter.event_type,
            "persisted filter has no local counterpart; leaving it in place"
        );
    }

    Ok(plan)
}

/// Push a plan to the store: bulk create, then bulk update. Empty batches
/// are skipped entirely.
pub async fn apply_plan(
    store: &dyn FilterStore,
    subscription_id: Uuid,
    plan: &FilterPlan,
) -> Result<(), StoreError> {
    if !plan.to_create.is_empty() {
        store.create_filters(subscription_id, &plan.to_create).await?;
    }
    if !plan.to_update.is_empty() {
        store.update_filters(subscription_id, &plan.to_update).await?;
    }
    Ok(())
}
