use crate::api::traits::{ChartApi, ExploreApi};
use crate::config::AppConfig;
use crate::error::{FetchError, PermissionExtra};
use crate::model::{ChartId, ChartMetadata, DatasetId, ExploreMetadata};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// All API responses arrive wrapped in a `result` envelope.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    result: T,
}

/// Body shape of a 403 from the explore endpoint.
#[derive(Debug, Deserialize)]
struct PermissionBody {
    message: String,
    extra: PermissionExtra,
}

/// HTTP-backed implementation of the explore and chart lookups.
pub struct HttpMetadataApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMetadataApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Self::new(
            config.api.base_url.clone(),
            Duration::from_secs(config.api.timeout_secs),
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, FetchError> {
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            let body: PermissionBody = response
                .json()
                .await
                .map_err(|e| FetchError::Malformed(format!("403 body: {}", e)))?;
            return Err(FetchError::PermissionDenied {
                message: body.message,
                extra: body.extra,
            });
        }
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url));
        }
        if !status.is_success() {
            return Err(FetchError::Transport(format!("{} from {}", status, url)));
        }

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))?;
        Ok(envelope.result)
    }
}

#[async_trait::async_trait]
impl ExploreApi for HttpMetadataApi {
    async fn fetch_explore_metadata(
        &self,
        dataset_id: DatasetId,
    ) -> Result<ExploreMetadata, FetchError> {
        let url = format!("{}/api/v1/explore/?dataset_id={}", self.base_url, dataset_id);
        self.get_json(url).await
    }
}

#[async_trait::async_trait]
impl ChartApi for HttpMetadataApi {
    async fn fetch_chart_metadata(&self, chart_id: ChartId) -> Result<ChartMetadata, FetchError> {
        let url = format!("{}/api/v1/chart/{}", self.base_url, chart_id);
        self.get_json(url).await
    }
}
