use crate::api::MetadataApi;
use crate::context::DashboardContextProvider;
use crate::logic::extract::{extract_identity, Location};
use crate::logic::fetch::{FetchOutcome, MetadataFetcher};
use crate::logic::merge::merge_form_data;
use crate::model::{FormData, LookupKey, Resolution, ResolutionState, ViewIdentity};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// What the controller decided in response to a navigation event.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationAction {
    /// Nothing qualifying changed, or the change is handled internally.
    None,
    /// A fetch cycle must be launched for this identity. Its completion must
    /// be reported back via `complete` with the same generation.
    Refetch {
        generation: u64,
        identity: ViewIdentity,
    },
    /// Override-only change served from the cached base, no network fetch.
    Remerged,
}

/// Base form data cached for the lifetime of the identity that fetched it,
/// so override-only navigation re-merges without re-issuing the lookup.
#[derive(Debug, Clone)]
struct CachedBase {
    key: LookupKey,
    base: FormData,
    display_name: Option<String>,
}

/// Owns the resolution lifecycle of one mounted chart view: reacts to
/// navigation events, launches generation-tagged fetch cycles, discards
/// superseded results, and tracks the exposed `ResolutionState`.
///
/// The transition core is synchronous; `run_view` wires it to the async
/// world. Results whose generation is no longer current are dropped silently,
/// which is what keeps an earlier trigger's response from ever overwriting a
/// later trigger's state.
pub struct ChartViewController<C> {
    context: C,
    state: ResolutionState,
    generation: u64,
    identity: Option<ViewIdentity>,
    cached_base: Option<CachedBase>,
}

impl<C: DashboardContextProvider> ChartViewController<C> {
    pub fn new(context: C) -> Self {
        Self {
            context,
            state: ResolutionState::Idle,
            generation: 0,
            identity: None,
            cached_base: None,
        }
    }

    pub fn state(&self) -> &ResolutionState {
        &self.state
    }

    pub fn current_identity(&self) -> Option<&ViewIdentity> {
        self.identity.as_ref()
    }

    /// Process a mount or navigation event.
    ///
    /// Identity changes start a new fetch cycle under a fresh generation.
    /// A `dashboard_page_id`-only change re-merges the cached base against a
    /// fresh override read; with no cached base yet (fetch in flight) the
    /// pending completion will pick up the new page id, and from a terminal
    /// failure state it re-attempts the fetch.
    pub fn navigate(&mut self, location: &Location) -> NavigationAction {
        let identity = match extract_identity(location) {
            Ok(identity) => identity,
            Err(err) => {
                // Fatal to this view; also invalidates in-flight results.
                self.generation += 1;
                self.identity = None;
                self.cached_base = None;
                self.state = ResolutionState::Failed(err);
                return NavigationAction::None;
            }
        };

        let needs_refetch = match &self.identity {
            None => true,
            Some(current) => current.requires_refetch(&identity),
        };
        if needs_refetch {
            self.generation += 1;
            self.cached_base = None;
            self.identity = Some(identity.clone());
            self.state = ResolutionState::Loading;
            log::info!(
                "resolving {} (generation {})",
                identity.key,
                self.generation
            );
            return NavigationAction::Refetch {
                generation: self.generation,
                identity,
            };
        }

        let page_changed = self
            .identity
            .as_ref()
            .is_some_and(|current| current.dashboard_page_id != identity.dashboard_page_id);
        self.identity = Some(identity.clone());
        if !page_changed {
            return NavigationAction::None;
        }

        if let Some(cached) = self.cached_base.clone() {
            log::debug!("override-only change for {}, re-merging cached base", cached.key);
            self.state = ResolutionState::Ready(self.merged(&cached.base, &cached.display_name));
            return NavigationAction::Remerged;
        }

        if self.state.is_loading() {
            // The in-flight fetch is for this same key; its completion reads
            // the override that is current at merge time.
            return NavigationAction::None;
        }

        // Terminal state with no reusable base: the page change is a
        // qualifying navigation event, so re-attempt the fetch.
        self.generation += 1;
        self.state = ResolutionState::Loading;
        NavigationAction::Refetch {
            generation: self.generation,
            identity,
        }
    }

    /// Apply the outcome of a fetch cycle. Outcomes from superseded cycles
    /// are dropped without any state transition.
    pub fn complete(&mut self, generation: u64, outcome: FetchOutcome) {
        if generation != self.generation {
            log::debug!(
                "dropping superseded fetch result (generation {}, current {})",
                generation,
                self.generation
            );
            return;
        }

        match outcome {
            FetchOutcome::Resolved { base, display_name } => {
                let resolution = self.merged(&base, &display_name);
                if let Some(identity) = &self.identity {
                    self.cached_base = Some(CachedBase {
                        key: identity.key.clone(),
                        base,
                        display_name,
                    });
                }
                self.state = ResolutionState::Ready(resolution);
            }
            FetchOutcome::PermissionDenied { datasource_name } => {
                self.state = ResolutionState::PermissionDenied { datasource_name };
            }
            FetchOutcome::Failed(err) => {
                self.state = ResolutionState::Failed(err);
            }
        }
    }

    /// Merge the base against the override active right now. The override is
    /// read at merge time, never captured earlier.
    fn merged(&self, base: &FormData, display_name: &Option<String>) -> Resolution {
        let overlay = self
            .identity
            .as_ref()
            .and_then(|identity| identity.dashboard_page_id.as_ref())
            .and_then(|page_id| self.context.override_for(page_id));
        Resolution {
            form_data: merge_form_data(base, overlay.as_ref()),
            display_name: display_name.clone(),
        }
    }
}

/// Drive a chart view for its whole mounted lifetime: subscribe to location
/// changes, launch a fetch task per qualifying navigation event, and publish
/// every state transition. Returns once the location sender is dropped
/// (the view unmounted). Superseded fetches are not aborted; their results
/// are simply ignored by the generation check.
pub async fn run_view<A, C>(
    api: Arc<A>,
    context: C,
    mut locations: watch::Receiver<Location>,
    states: watch::Sender<ResolutionState>,
) -> anyhow::Result<()>
where
    A: MetadataApi + 'static,
    C: DashboardContextProvider,
{
    let fetcher = MetadataFetcher::new(api);
    let mut controller = ChartViewController::new(context);
    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<(u64, FetchOutcome)>();

    let initial = locations.borrow_and_update().clone();
    launch_fetch(&fetcher, controller.navigate(&initial), &outcome_tx);
    let _ = states.send(controller.state().clone());

    loop {
        tokio::select! {
            changed = locations.changed() => {
                if changed.is_err() {
                    break;
                }
                let location = locations.borrow_and_update().clone();
                launch_fetch(&fetcher, controller.navigate(&location), &outcome_tx);
                let _ = states.send(controller.state().clone());
            }
            outcome = outcome_rx.recv() => {
                // outcome_tx is held by this loop, so the channel stays open.
                if let Some((generation, outcome)) = outcome {
                    controller.complete(generation, outcome);
                    let _ = states.send(controller.state().clone());
                }
            }
        }
    }

    Ok(())
}

fn launch_fetch<A: MetadataApi + 'static>(
    fetcher: &MetadataFetcher<A>,
    action: NavigationAction,
    outcome_tx: &mpsc::UnboundedSender<(u64, FetchOutcome)>,
) {
    if let NavigationAction::Refetch {
        generation,
        identity,
    } = action
    {
        let fetcher = fetcher.clone();
        let outcome_tx = outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = fetcher.fetch(&identity).await;
            let _ = outcome_tx.send((generation, outcome));
        });
    }
}
