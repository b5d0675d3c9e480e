mod validate;

pub use validate::validate_endpoint;

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

use crate::reconcile::{apply_plan, reconcile_filters};
use crate::stores::{EndpointStore, FilterStore, SubscriptionStore};
use crate::types::{
    FilterConfig, FlowReport, FlowStage, FlowState, Notice, SaveSubscriptionRequest,
    SubscriptionRequest,
};

/// Orchestrates one save attempt: validate the endpoint form, save the
/// endpoint, save the subscription referencing it, then reconcile the
/// per-event-type filters — strictly in that order, each stage awaited
/// before the next starts.
///
/// The flow is deliberately best-effort: a failure never rolls back what an
/// earlier stage persisted. It is reported instead, so the user can retry
/// from where things stopped.
pub struct UpsertFlow<'a> {
    endpoints: &'a dyn EndpointStore,
    subscriptions: &'a dyn SubscriptionStore,
    filters: &'a dyn FilterStore,
}

impl<'a> UpsertFlow<'a> {
    pub fn new(
        endpoints: &'a dyn EndpointStore,
        subscriptions: &'a dyn SubscriptionStore,
        filters: &'a dyn FilterStore,
    ) -> Self {
        Self {
            endpoints,
            subscriptions,
            filters,
        }
    }

    pub async fn run(&self, req: &SaveSubscriptionRequest) -> FlowReport {
        let mut report = FlowReport {
            state: FlowState::Idle,
            endpoint: None,
            subscription: None,
            active_secret: None,
            field_errors: Vec::new(),
            notices: Vec::new(),
            completed_at: String::new(),
        };

        report.state = FlowState::ValidatingEndpoint;
        let field_errors = validate_endpoint(&req.endpoint, &req.sections);
        if !field_errors.is_empty() {
            report.state = FlowState::Failed(FlowStage::Validation);
            report.field_errors = field_errors;
            report
                .notices
                .push(Notice::error("endpoint configuration is invalid"));
            return finish(report);
        }

        report.state = FlowState::SavingEndpoint;
        let endpoint_verb = verb(req.endpoint_id.is_some());
        let saved = match req.endpoint_id {
            Some(endpoint_id) => self.endpoints.update_endpoint(endpoint_id, &req.endpoint).await,
            None => self.endpoints.create_endpoint(&req.endpoint).await,
        };
        let endpoint = match saved {
            Ok(endpoint) => endpoint,
            Err(err) => {
                tracing::error!(error = %err, "endpoint save failed");
                report.state = FlowState::Failed(FlowStage::Endpoint);
                report.notices.push(Notice::error("failed to save endpoint"));
                return finish(report);
            }
        };
        report.active_secret = endpoint.active_secret().cloned();

        report.state = FlowState::SavingSubscription;
        let subscription_verb = verb(req.subscription_id.is_some());
        let subscription_req = SubscriptionRequest {
            name: match req.subscription_id {
                Some(_) => None,
                None => Some(subscription_name(&endpoint.name)),
            },
            endpoint_id: endpoint.uid,
            source_id: req.source_id,
            filter_config: FilterConfig {
                event_types: req.event_types.clone(),
                filter: req.legacy_filter.clone().unwrap_or_default(),
            },
        };
        report.endpoint = Some(endpoint);

        let saved = match req.subscription_id {
            Some(subscription_id) => {
                self.subscriptions
                    .update_subscription(subscription_id, &subscription_req)
                    .await
            }
            None => self.subscriptions.create_subscription(&subscription_req).await,
        };
        let subscription = match saved {
            Ok(subscription) => subscription,
            Err(err) => {
                tracing::error!(error = %err, "subscription save failed");
                report.state = FlowState::Failed(FlowStage::Subscription);
                report.notices.push(Notice::warning(format!(
                    "endpoint {endpoint_verb} but subscription could not be {subscription_verb}"
                )));
                return finish(report);
            }
        };
        let subscription_id = subscription.uid;
        report.subscription = Some(subscription);

        report.state = FlowState::ReconcilingFilters;
        let reconciled = match reconcile_filters(self.filters, subscription_id, &req.filters).await
        {
            Ok(plan) => apply_plan(self.filters, subscription_id, &plan).await,
            Err(err) => Err(err),
        };
        match reconciled {
            Ok(()) => {
                report.state = FlowState::Done;
                report.notices.push(Notice::success(format!(
                    "subscription {subscription_verb} successfully"
                )));
            }
            Err(err) => {
                tracing::error!(error = %err, subscription_id = %subscription_id, "filter reconciliation failed");
                report.state = FlowState::Failed(FlowStage::Filters);
                report.notices.push(Notice::warning(format!(
                    "subscription {subscription_verb} but filters could not be added"
                )));
            }
        }

        finish(report)
    }
}

/// Subscription names are synthesized from the endpoint name plus the first
/// 8 hex characters of a fresh v4 UUID.
pub fn subscription_name(endpoint_name: &str) -> String {
    format!("{endpoint_name}-{}", name_suffix())
}

fn name_suffix() -> String {
    let id = Uuid::new_v4().simple().to_string();
    id[..8].to_string()
}

fn verb(updating: bool) -> &'static str {
    if updating { "updated" } else { "created" }
}

fn finish(mut report: FlowReport) -> FlowReport {
    report.completed_at = format_utc(Utc::now());
    report
}

fn format_utc(dt: chrono::DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}
