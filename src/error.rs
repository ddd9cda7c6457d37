use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The structured `extra` payload the backend attaches to a permission
/// denial: the datasource it refused, and optionally its display name.
/// The fallback gate keys on the literal presence/absence of
/// `datasource_name`, so it stays an `Option` rather than a string checked
/// for emptiness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionExtra {
    pub datasource: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasource_name: Option<String>,
}

/// Failures of the explore/chart lookups. Payloads are strings so the
/// variants stay `Clone + PartialEq` and can live inside `ResolutionState`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The backend refused access to the record. Recoverable via the chart
    /// fallback when a legacy chart identifier is available.
    #[error("permission denied: {message}")]
    PermissionDenied {
        message: String,
        extra: PermissionExtra,
    },

    #[error("not found: {0}")]
    NotFound(String),

    /// Network and 5xx-class failures. No retry happens at this layer; the
    /// view re-attempts only on the next qualifying navigation event.
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}

/// Failures of the resolution pipeline as a whole. Captured inside
/// `ResolutionState::Failed`, never propagated past the view controller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// The navigation location carries neither a dataset identifier nor a
    /// legacy chart identifier. Fatal to the view.
    #[error("location does not identify a dataset or chart")]
    MissingIdentity,

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
