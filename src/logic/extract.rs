use crate::error::ResolveError;
use crate::model::{DashboardPageId, LookupKey, ViewIdentity};
use std::collections::HashMap;

pub const DATASET_ID_PARAM: &str = "dataset_id";
/// Older links carry the dataset identifier under this name.
pub const DATASOURCE_ID_PARAM: &str = "datasource_id";
pub const SLICE_ID_PARAM: &str = "slice_id";
pub const DASHBOARD_PAGE_ID_PARAM: &str = "dashboard_page_id";

/// A navigation location: path plus decoded query parameters. On duplicate
/// parameter names the last occurrence wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub path: String,
    pub query: HashMap<String, String>,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: HashMap::new(),
        }
    }

    /// Parse a path with an optional query string, e.g.
    /// `/explore/?dataset_id=1&slice_id=7`.
    pub fn parse(path_and_query: &str) -> Self {
        let (path, query_string) = match path_and_query.split_once('?') {
            Some((path, query)) => (path, query),
            None => (path_and_query, ""),
        };
        let query = url::form_urlencoded::parse(query_string.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self {
            path: path.to_string(),
            query,
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    fn numeric_param(&self, name: &str) -> Option<i64> {
        // Unparseable values are treated as absent.
        self.param(name).and_then(|value| value.parse().ok())
    }
}

/// Derive which lookup key and dashboard page apply to the current location.
///
/// The dataset/explore identifier is the canonical path and wins when both
/// identifiers are present; the legacy chart identifier is retained either
/// way so the fetcher can fall back to the chart lookup on a permission
/// denial. Pure function of the location.
pub fn extract_identity(location: &Location) -> Result<ViewIdentity, ResolveError> {
    let dataset_id = location
        .numeric_param(DATASET_ID_PARAM)
        .or_else(|| location.numeric_param(DATASOURCE_ID_PARAM));
    let chart_id = location.numeric_param(SLICE_ID_PARAM);
    let dashboard_page_id = location
        .param(DASHBOARD_PAGE_ID_PARAM)
        .map(DashboardPageId::new);

    let key = match (dataset_id, chart_id) {
        (Some(dataset_id), _) => LookupKey::dataset(dataset_id),
        (None, Some(chart_id)) => LookupKey::chart(chart_id),
        (None, None) => return Err(ResolveError::MissingIdentity),
    };

    Ok(ViewIdentity {
        key,
        fallback_chart_id: chart_id,
        dashboard_page_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_path_and_query() {
        let location = Location::parse("/explore/?dataset_id=1&slice_id=7");
        assert_eq!(location.path, "/explore/");
        assert_eq!(location.param("dataset_id"), Some("1"));
        assert_eq!(location.param("slice_id"), Some("7"));

        let bare = Location::parse("/explore/");
        assert_eq!(bare.path, "/explore/");
        assert!(bare.query.is_empty());
    }

    #[test]
    fn test_parse_decodes_percent_encoding() {
        let location = Location::parse("/explore/?dashboard_page_id=page%2D1");
        assert_eq!(location.param("dashboard_page_id"), Some("page-1"));
    }

    #[test]
    fn test_dataset_id_extraction() {
        let identity =
            extract_identity(&Location::parse("/explore/?dataset_id=1")).unwrap();
        assert_eq!(identity.key, LookupKey::dataset(1));
        assert_eq!(identity.fallback_chart_id, None);
        assert_eq!(identity.dashboard_page_id, None);
    }

    #[test]
    fn test_legacy_datasource_id_alias() {
        let identity =
            extract_identity(&Location::parse("/explore/?datasource_id=9")).unwrap();
        assert_eq!(identity.key, LookupKey::dataset(9));
    }

    #[test]
    fn test_slice_id_only() {
        let identity = extract_identity(&Location::parse("/explore/?slice_id=7")).unwrap();
        assert_eq!(identity.key, LookupKey::chart(7));
        assert_eq!(identity.fallback_chart_id, Some(7));
    }

    #[test]
    fn test_dataset_takes_precedence_and_retains_fallback() {
        let identity =
            extract_identity(&Location::parse("/explore/?dataset_id=1&slice_id=7")).unwrap();
        assert_eq!(identity.key, LookupKey::dataset(1));
        assert_eq!(identity.fallback_chart_id, Some(7));
    }

    #[test]
    fn test_missing_identity() {
        let err = extract_identity(&Location::parse("/explore/")).unwrap_err();
        assert_eq!(err, ResolveError::MissingIdentity);
    }

    #[test]
    fn test_unparseable_ids_treated_as_absent() {
        let err = extract_identity(&Location::parse("/explore/?dataset_id=abc")).unwrap_err();
        assert_eq!(err, ResolveError::MissingIdentity);

        // A bad dataset id still falls through to a usable slice id.
        let identity =
            extract_identity(&Location::parse("/explore/?dataset_id=abc&slice_id=7")).unwrap();
        assert_eq!(identity.key, LookupKey::chart(7));
    }

    #[test]
    fn test_dashboard_page_id_extraction() {
        let identity = extract_identity(&Location::parse(
            "/explore/?dataset_id=1&dashboard_page_id=mockPageId",
        ))
        .unwrap();
        assert_eq!(
            identity.dashboard_page_id,
            Some(DashboardPageId::new("mockPageId"))
        );
    }
}
