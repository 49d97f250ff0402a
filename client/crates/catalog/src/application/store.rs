//! Catalog Store
//!
//! Owns the known problems, the current problem and the persistent filter.
//! Fetches replace the relevant slice wholesale; nothing is merged.

use kernel::lifecycle::RequestState;
use platform::RequestSequence;
use tokio::sync::watch;

use crate::domain::entities::Problem;
use crate::domain::value_objects::ProblemFilter;

/// Mutable state behind a [`CatalogStore`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogState {
    /// Last accepted list, in server order
    pub problems: Vec<Problem>,
    /// Server-side total for the last accepted list, when reported
    pub total: Option<u64>,
    pub current_problem: Option<Problem>,
    pub filter: ProblemFilter,
    pub list: RequestState,
    pub detail: RequestState,
    pub mutation: RequestState,
}

/// Catalog store
pub struct CatalogStore<G> {
    pub(crate) gateway: G,
    pub(crate) state: watch::Sender<CatalogState>,
    pub(crate) list_sequence: RequestSequence,
    pub(crate) detail_sequence: RequestSequence,
}

impl<G> CatalogStore<G> {
    pub fn new(gateway: G) -> Self {
        let (state, _) = watch::channel(CatalogState::default());
        Self {
            gateway,
            state,
            list_sequence: RequestSequence::new(),
            detail_sequence: RequestSequence::new(),
        }
    }

    pub fn state(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    pub fn problems(&self) -> Vec<Problem> {
        self.state.borrow().problems.clone()
    }

    pub fn current_problem(&self) -> Option<Problem> {
        self.state.borrow().current_problem.clone()
    }

    /// Drop the results of every in-flight fetch
    ///
    /// The requests still run to completion. Loading lifecycles go back to
    /// idle.
    pub fn abandon_pending(&self) {
        self.list_sequence.abandon();
        self.detail_sequence.abandon();
        self.state.send_if_modified(|state| {
            let loading = state.list.is_loading() || state.detail.is_loading();
            if state.list.is_loading() {
                state.list.reset();
            }
            if state.detail.is_loading() {
                state.detail.reset();
            }
            loading
        });
        tracing::debug!("Abandoned in-flight catalog fetches");
    }
}
