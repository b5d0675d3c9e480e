use std::collections::BTreeMap;

use crate::types::{
    EventType, EventTypeFilter, FilterDraft, FilterSchema, WILDCARD_EVENT_TYPE,
};

/// Selected event types and their filter drafts, kept in lockstep.
///
/// Both views live in one map: the selected set is exactly the key set, so
/// they cannot drift apart. Two rules hold after every mutation:
///
/// - the wildcard `"*"` is either the only selection or absent entirely;
/// - once initialized non-empty, the selection never becomes empty (removing
///   the last entry is a no-op).
#[derive(Debug, Clone, Default)]
pub struct EventTypeSelection {
    filters: BTreeMap<String, FilterDraft>,
}

impl EventTypeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default selection for a brand-new subscription: the wildcard when the
    /// catalog offers one, otherwise the first available event type. An empty
    /// catalog yields an empty selection.
    pub fn for_new_subscription(catalog: &[EventType]) -> Self {
        let mut selection = Self::new();
        let default = catalog
            .iter()
            .find(|event_type| event_type.is_wildcard())
            .or_else(|| catalog.first());
        if let Some(event_type) = default {
            selection.toggle(&event_type.name);
        }
        selection
    }

    /// Selection seeded from an existing subscription. Every event type gets
    /// a draft; types with a persisted filter carry its identifier and
    /// schemas, the rest start empty.
    pub fn from_existing(event_types: &[String], persisted: &[EventTypeFilter]) -> Self {
        let mut filters = BTreeMap::new();
        for name in event_types {
            let draft = persisted
                .iter()
                .find(|filter| &filter.event_type == name)
                .map_or_else(|| FilterDraft::empty(name), FilterDraft::from_persisted);
            filters.insert(name.clone(), draft);
        }
        Self { filters }
    }

    /// Flip the selection state of one event type.
    ///
    /// Removal also drops the type's filter draft; addition inserts a fresh
    /// empty draft. Selecting the wildcard clears every specific selection
    /// first, and selecting a specific type removes the wildcard first.
    pub fn toggle(&mut self, name: &str) {
        if self.filters.contains_key(name) {
            if self.filters.len() > 1 {
                self.filters.remove(name);
            }
            return;
        }

        if name == WILDCARD_EVENT_TYPE {
            self.filters.clear();
        } else {
            self.filters.remove(WILDCARD_EVENT_TYPE);
        }
        self.filters.insert(name.to_string(), FilterDraft::empty(name));
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Selected event-type names. Order is not significant.
    pub fn selected(&self) -> Vec<String> {
        self.filters.keys().cloned().collect()
    }

    /// The filter drafts as an array, for consumers that render a flat list.
    pub fn filters(&self) -> Vec<FilterDraft> {
        self.filters.values().cloned().collect()
    }

    pub fn filter(&self, name: &str) -> Option<&FilterDraft> {
        self.filters.get(name)
    }

    /// Entry point for the filter-schema editor: guarantees a draft exists
    /// for `name` and hands it out for editing.
    pub fn ensure_filter(&mut self, name: &str) -> &mut FilterDraft {
        self.filters
            .entry(name.to_string())
            .or_insert_with(|| FilterDraft::empty(name))
    }

    /// Overwrite a draft's schemas with what the editor produced and mark it
    /// modified.
    pub fn apply_schema(&mut self, name: &str, schema: &FilterSchema) {
        let draft = self.ensure_filter(name);
        draft.headers = schema.header_schema.clone();
        draft.body = schema.body_schema.clone();
        draft.is_modified = true;
    }
}
