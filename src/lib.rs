pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod logic;
pub mod model;

// Export API types
pub use api::{ChartApi, ExploreApi, HttpMetadataApi, MetadataApi};

// Export context types
pub use context::{DashboardContextProvider, InMemoryDashboardContext};

// Export error types
pub use error::{FetchError, PermissionExtra, ResolveError};

// Export logic types
pub use logic::{
    extract_identity, merge_form_data, run_view, ChartViewController, FetchOutcome, Location,
    MetadataFetcher, NavigationAction,
};

// Export all model types
pub use model::*;

#[cfg(test)]
mod tests {
    use crate::error::PermissionExtra;
    use crate::model::{ChartMetadata, ExploreMetadata, FormData, LookupKey};
    use serde_json::json;

    #[test]
    fn test_explore_wire_shape_round_trip() {
        // Shape of the /api/v1/explore/ result payload as the backend sends it.
        let json = r#"{
            "dataset": {"id": 1, "name": "cleaned_sales_data"},
            "form_data": {"viz_type": "table", "show_cell_bars": true}
        }"#;

        let metadata: ExploreMetadata = serde_json::from_str(json).unwrap();
        let round_tripped: ExploreMetadata =
            serde_json::from_value(serde_json::to_value(&metadata).unwrap()).unwrap();
        assert_eq!(round_tripped, metadata);
    }

    #[test]
    fn test_chart_wire_shape_matches_fallback_fixture() {
        // The fallback path only needs id, slice_name and url to be present.
        let json = r#"{"id": 7, "slice_name": "X", "url": "/explore/?slice_id=7"}"#;
        let chart: ChartMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(chart.id, 7);
        assert_eq!(chart.slice_name, "X");
        assert!(chart.form_data.is_none());
    }

    #[test]
    fn test_permission_extra_presence_is_distinguishable_from_empty() {
        let with_name: PermissionExtra =
            serde_json::from_value(json!({"datasource": 123, "datasource_name": ""})).unwrap();
        assert_eq!(with_name.datasource_name, Some(String::new()));

        let without_name: PermissionExtra =
            serde_json::from_value(json!({"datasource": 123})).unwrap();
        assert_eq!(without_name.datasource_name, None);
    }

    #[test]
    fn test_lookup_key_and_form_data_serde() {
        let key: LookupKey =
            serde_json::from_value(json!({"kind": "dataset", "dataset_id": 1})).unwrap();
        assert!(key.is_dataset());

        let form_data: FormData =
            serde_json::from_value(json!({"datasource": 123, "viz_type": "table"})).unwrap();
        assert_eq!(form_data.len(), 2);
    }
}
