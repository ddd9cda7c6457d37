use crate::error::ResolveError;
use crate::model::FormData;

/// The configuration a view resolves to: the effective form data (base merged
/// with any dashboard override) and whatever display name was recovered.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub form_data: FormData,
    pub display_name: Option<String>,
}

/// State machine of a mounted chart view. Created fresh on mount, transitions
/// on every navigation-triggered fetch cycle, never persisted.
///
/// `Idle → Loading → Ready | PermissionDenied | Failed`, with any terminal
/// state returning to `Loading` on the next qualifying navigation event.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionState {
    Idle,
    Loading,
    Ready(Resolution),
    /// The backend refused access to the primary record but the record
    /// exists; the salvaged datasource name, if any, drives user messaging.
    PermissionDenied { datasource_name: Option<String> },
    Failed(ResolveError),
}

impl ResolutionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Ready(_) | Self::PermissionDenied { .. } | Self::Failed(_)
        )
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        match self {
            Self::Ready(resolution) => Some(resolution),
            _ => None,
        }
    }

    /// The display name exposed to the rendering boundary, regardless of
    /// which path produced it.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::Ready(resolution) => resolution.display_name.as_deref(),
            Self::PermissionDenied { datasource_name } => datasource_name.as_deref(),
            _ => None,
        }
    }
}
