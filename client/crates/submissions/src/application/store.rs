//! Submission Store
//!
//! Owns the caller's submissions (newest first) and the one currently
//! viewed. Records are merged by id through [`SubmissionStore::apply`];
//! a known record is replaced wholesale, never field by field.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use kernel::id::SubmissionId;
use kernel::lifecycle::RequestState;
use platform::{RequestSequence, Ticket};
use tokio::sync::watch;

use crate::domain::entities::Submission;

/// Mutable state behind a [`SubmissionStore`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionState {
    pub submissions: Vec<Submission>,
    pub current_submission: Option<Submission>,
    pub list: RequestState,
    pub detail: RequestState,
    pub create: RequestState,
}

impl SubmissionState {
    pub fn find(&self, id: &SubmissionId) -> Option<&Submission> {
        self.submissions.iter().find(|s| &s.id == id)
    }

    /// The listed record, or the current one when no listing holds it
    pub fn known(&self, id: &SubmissionId) -> Option<&Submission> {
        self.find(id).or_else(|| {
            self.current_submission
                .as_ref()
                .filter(|current| &current.id == id)
        })
    }
}

/// Submission store
pub struct SubmissionStore<G> {
    pub(crate) gateway: G,
    pub(crate) state: watch::Sender<SubmissionState>,
    pub(crate) list_sequence: RequestSequence,
    pub(crate) detail_sequence: RequestSequence,
    /// Latest detail ticket issued per submission
    pub(crate) detail_tickets: Mutex<HashMap<SubmissionId, Ticket>>,
}

impl<G> SubmissionStore<G> {
    pub fn new(gateway: G) -> Self {
        let (state, _) = watch::channel(SubmissionState::default());
        Self {
            gateway,
            state,
            list_sequence: RequestSequence::new(),
            detail_sequence: RequestSequence::new(),
            detail_tickets: Mutex::new(HashMap::new()),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.state.borrow().submissions.clone()
    }

    pub fn submission(&self, id: &SubmissionId) -> Option<Submission> {
        self.state.borrow().find(id).cloned()
    }

    pub fn current_submission(&self) -> Option<Submission> {
        self.state.borrow().current_submission.clone()
    }

    pub fn clear_current(&self) {
        self.state.send_if_modified(|state| state.current_submission.take().is_some());
    }

    /// Drop the results of every in-flight fetch
    ///
    /// The requests still run to completion. Creates are not affected: an
    /// acknowledged submission always enters the store.
    pub fn abandon_pending(&self) {
        self.list_sequence.abandon();
        self.detail_sequence.abandon();
        self.detail_tickets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
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
        tracing::debug!("Abandoned in-flight submission fetches");
    }

    pub(crate) fn track_detail(&self, id: &SubmissionId, ticket: Ticket) {
        self.detail_tickets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), ticket);
    }

    /// Whether `ticket` is the latest detail fetch of `id`; settles it if so
    pub(crate) fn settle_detail(&self, id: &SubmissionId, ticket: Ticket) -> bool {
        let mut tickets = self
            .detail_tickets
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if tickets.get(id) == Some(&ticket) {
            tickets.remove(id);
            true
        } else {
            false
        }
    }
}
