use crate::model::{DashboardPageId, FormData};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Read-only source of dashboard-supplied form-data overrides, keyed by the
/// dashboard page that computed them. A pure read: no network, no await, and
/// the returned value is a copy, so callers never observe later writes.
///
/// The controller reads the override at merge time, never earlier; a value
/// captured at fetch start could be stale by the time the fetch resolves.
pub trait DashboardContextProvider: Send + Sync {
    fn override_for(&self, page_id: &DashboardPageId) -> Option<FormData>;
}

/// Map-backed provider. The dashboard subsystem writes entries as its filter
/// state changes; chart views only read.
#[derive(Debug, Default)]
pub struct InMemoryDashboardContext {
    entries: RwLock<HashMap<DashboardPageId, FormData>>,
}

impl InMemoryDashboardContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, page_id: DashboardPageId, form_data: FormData) {
        self.entries.write().insert(page_id, form_data);
    }

    pub fn remove(&self, page_id: &DashboardPageId) -> Option<FormData> {
        self.entries.write().remove(page_id)
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl DashboardContextProvider for InMemoryDashboardContext {
    fn override_for(&self, page_id: &DashboardPageId) -> Option<FormData> {
        self.entries.read().get(page_id).cloned()
    }
}

impl<T: DashboardContextProvider + ?Sized> DashboardContextProvider for std::sync::Arc<T> {
    fn override_for(&self, page_id: &DashboardPageId) -> Option<FormData> {
        (**self).override_for(page_id)
    }
}
