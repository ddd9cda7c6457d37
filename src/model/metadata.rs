use crate::model::{ChartId, DatasetId, FormData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result payload of the primary lookup: `GET /api/v1/explore/?dataset_id=…`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExploreMetadata {
    pub dataset: DatasetRef,
    pub form_data: FormData,
}

/// The dataset record embedded in an explore response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRef {
    pub id: DatasetId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Result payload of the secondary lookup: `GET /api/v1/chart/{id}`.
/// `form_data` is optional on the wire; older chart records may carry none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartMetadata {
    pub id: ChartId,
    pub slice_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_data: Option<FormData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_on: Option<DateTime<Utc>>,
}
