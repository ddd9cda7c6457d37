use crate::error::FetchError;
use crate::model::{ChartId, ChartMetadata, DatasetId, ExploreMetadata};

/// Primary lookup: explore metadata by dataset identifier.
#[async_trait::async_trait]
pub trait ExploreApi: Send + Sync {
    async fn fetch_explore_metadata(
        &self,
        dataset_id: DatasetId,
    ) -> Result<ExploreMetadata, FetchError>;
}

/// Secondary/fallback lookup: chart record by legacy chart identifier.
#[async_trait::async_trait]
pub trait ChartApi: Send + Sync {
    async fn fetch_chart_metadata(&self, chart_id: ChartId) -> Result<ChartMetadata, FetchError>;
}

pub trait MetadataApi: ExploreApi + ChartApi + Send + Sync {}
impl<T: ExploreApi + ChartApi + Send + Sync> MetadataApi for T {}
