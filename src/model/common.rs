use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type DatasetId = i64;
pub type ChartId = i64;

/// Key identifying which dashboard instance supplied a context override.
/// Each open dashboard page generates its own identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DashboardPageId(pub String);

impl DashboardPageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DashboardPageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The lookup key for a chart view: the canonical dataset/explore path or
/// the legacy chart-record path. Exactly one variant is active per view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LookupKey {
    Dataset { dataset_id: DatasetId },
    Chart { chart_id: ChartId },
}

impl LookupKey {
    pub fn dataset(dataset_id: DatasetId) -> Self {
        Self::Dataset { dataset_id }
    }

    pub fn chart(chart_id: ChartId) -> Self {
        Self::Chart { chart_id }
    }

    pub fn is_dataset(&self) -> bool {
        matches!(self, Self::Dataset { .. })
    }
}

impl std::fmt::Display for LookupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dataset { dataset_id } => write!(f, "dataset:{}", dataset_id),
            Self::Chart { chart_id } => write!(f, "chart:{}", chart_id),
        }
    }
}

/// Everything the current navigation location says about which view this is:
/// the lookup key, the legacy chart identifier retained for the
/// permission-denied fallback, and the dashboard page that may supply a
/// context override.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewIdentity {
    pub key: LookupKey,

    /// Legacy chart identifier, kept even when `key` is the dataset path so
    /// the fetcher can fall back to the chart lookup.
    pub fallback_chart_id: Option<ChartId>,

    /// Selects which dashboard context override entry is active, if any.
    pub dashboard_page_id: Option<DashboardPageId>,
}

impl ViewIdentity {
    /// A navigation change qualifies for a refetch when the lookup key or the
    /// fallback chart identifier changed. A `dashboard_page_id`-only change is
    /// an override-only change: the cached base configuration stays valid.
    pub fn requires_refetch(&self, other: &ViewIdentity) -> bool {
        self.key != other.key || self.fallback_chart_id != other.fallback_chart_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_key_serde_tagging() {
        let key = LookupKey::dataset(42);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, r#"{"kind":"dataset","dataset_id":42}"#);

        let parsed: LookupKey = serde_json::from_str(r#"{"kind":"chart","chart_id":7}"#).unwrap();
        assert_eq!(parsed, LookupKey::chart(7));
    }

    #[test]
    fn test_requires_refetch_on_key_change() {
        let a = ViewIdentity {
            key: LookupKey::dataset(1),
            fallback_chart_id: Some(7),
            dashboard_page_id: None,
        };
        let mut b = a.clone();
        assert!(!a.requires_refetch(&b));

        b.key = LookupKey::dataset(2);
        assert!(a.requires_refetch(&b));
    }

    #[test]
    fn test_requires_refetch_on_fallback_change() {
        let a = ViewIdentity {
            key: LookupKey::dataset(1),
            fallback_chart_id: Some(7),
            dashboard_page_id: None,
        };
        let mut b = a.clone();
        b.fallback_chart_id = None;
        assert!(a.requires_refetch(&b));
    }

    #[test]
    fn test_page_id_only_change_does_not_refetch() {
        let a = ViewIdentity {
            key: LookupKey::dataset(1),
            fallback_chart_id: Some(7),
            dashboard_page_id: Some(DashboardPageId::new("page-a")),
        };
        let mut b = a.clone();
        b.dashboard_page_id = Some(DashboardPageId::new("page-b"));
        assert!(!a.requires_refetch(&b));
    }

    #[test]
    fn test_generated_page_ids_are_unique() {
        assert_ne!(DashboardPageId::generate(), DashboardPageId::generate());
    }
}
