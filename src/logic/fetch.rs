use crate::api::MetadataApi;
use crate::error::{FetchError, ResolveError};
use crate::model::{ChartId, FormData, LookupKey, ViewIdentity};
use std::sync::Arc;

/// What one fetch cycle produced. Fed back to the view controller tagged with
/// the generation that launched it.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Base form data and display name, from either the explore lookup or a
    /// successful chart fallback.
    Resolved {
        base: FormData,
        display_name: Option<String>,
    },
    /// The backend refused access and no fallback could recover the record;
    /// `datasource_name` carries whatever name was salvaged.
    PermissionDenied { datasource_name: Option<String> },
    Failed(ResolveError),
}

/// Resolves a view identity to its base form data, applying the
/// permission-denied fallback policy.
pub struct MetadataFetcher<A> {
    api: Arc<A>,
}

impl<A> Clone for MetadataFetcher<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<A: MetadataApi> MetadataFetcher<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub async fn fetch(&self, identity: &ViewIdentity) -> FetchOutcome {
        match identity.key {
            LookupKey::Dataset { dataset_id } => {
                match self.api.fetch_explore_metadata(dataset_id).await {
                    Ok(metadata) => FetchOutcome::Resolved {
                        base: metadata.form_data,
                        display_name: metadata.dataset.name,
                    },
                    Err(FetchError::PermissionDenied { message, extra }) => {
                        // The gate is literal presence/absence of the name:
                        // a present-but-empty name still suppresses fallback.
                        if extra.datasource_name.is_some() {
                            log::info!(
                                "explore lookup for dataset {} denied, datasource name salvaged",
                                dataset_id
                            );
                            FetchOutcome::PermissionDenied {
                                datasource_name: extra.datasource_name,
                            }
                        } else if let Some(chart_id) = identity.fallback_chart_id {
                            log::info!(
                                "explore lookup for dataset {} denied without a name, \
                                 falling back to chart {}",
                                dataset_id,
                                chart_id
                            );
                            self.fetch_chart(chart_id).await
                        } else {
                            log::warn!(
                                "explore lookup for dataset {} denied: {}",
                                dataset_id,
                                message
                            );
                            FetchOutcome::PermissionDenied {
                                datasource_name: None,
                            }
                        }
                    }
                    Err(err) => {
                        log::warn!("explore lookup for dataset {} failed: {}", dataset_id, err);
                        FetchOutcome::Failed(err.into())
                    }
                }
            }
            LookupKey::Chart { chart_id } => self.fetch_chart(chart_id).await,
        }
    }

    async fn fetch_chart(&self, chart_id: ChartId) -> FetchOutcome {
        match self.api.fetch_chart_metadata(chart_id).await {
            Ok(chart) => FetchOutcome::Resolved {
                base: chart.form_data.unwrap_or_default(),
                display_name: Some(chart.slice_name),
            },
            Err(err) => {
                log::warn!("chart lookup for chart {} failed: {}", chart_id, err);
                FetchOutcome::Failed(err.into())
            }
        }
    }
}
