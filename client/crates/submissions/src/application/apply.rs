//! Merge Rules
//!
//! Every record that reaches the store passes through here. Unknown ids
//! are inserted at the front, known ids are replaced wholesale, and an
//! update the status machine forbids is dropped without error. The current
//! submission counts as known even after a listing dropped it.

use std::collections::HashMap;

use kernel::id::SubmissionId;

use crate::application::store::{SubmissionState, SubmissionStore};
use crate::domain::entities::Submission;

/// What [`SubmissionStore::apply`] did with a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Inserted,
    Replaced,
    /// Stale or otherwise unusable; the store is unchanged
    Rejected,
}

impl<G> SubmissionStore<G> {
    /// Merge one incoming record into the store
    pub fn apply(&self, incoming: Submission) -> Applied {
        let mut applied = Applied::Rejected;
        self.state.send_if_modified(|state| {
            applied = merge(state, incoming);
            applied != Applied::Rejected
        });
        applied
    }
}

pub(crate) fn merge(state: &mut SubmissionState, incoming: Submission) -> Applied {
    if incoming.id.is_empty() {
        tracing::warn!("Dropping submission record without an id");
        return Applied::Rejected;
    }

    let position = state.submissions.iter().position(|s| s.id == incoming.id);
    let current = state
        .current_submission
        .as_ref()
        .filter(|current| current.id == incoming.id);
    let known = position.map(|index| &state.submissions[index]).into_iter().chain(current);
    for known in known {
        if !known.status.can_transition_to(incoming.status) {
            tracing::debug!(
                submission_id = %incoming.id,
                from = %known.status,
                to = %incoming.status,
                "Ignoring stale submission update"
            );
            return Applied::Rejected;
        }
    }

    let applied = match position {
        Some(index) => {
            state.submissions[index] = incoming.clone();
            Applied::Replaced
        }
        None => {
            state.submissions.insert(0, incoming.clone());
            Applied::Inserted
        }
    };

    if let Some(current) = state.current_submission.as_mut() {
        if current.id == incoming.id {
            *current = incoming;
        }
    }
    applied
}

/// Replace the list with a server listing, keeping terminal stickiness
///
/// The listing decides membership and order. A listed record that would
/// move a known submission backwards is swapped for the known one.
/// Returns the number of such rejections.
pub(crate) fn replace_all(state: &mut SubmissionState, incoming: Vec<Submission>) -> usize {
    let mut known: HashMap<SubmissionId, Submission> = std::mem::take(&mut state.submissions)
        .into_iter()
        .map(|s| (s.id.clone(), s))
        .collect();
    let mut rejected = 0;

    state.submissions = incoming
        .into_iter()
        .filter(|record| !record.id.is_empty())
        .map(|record| match known.remove(&record.id) {
            Some(existing) if !existing.status.can_transition_to(record.status) => {
                rejected += 1;
                existing
            }
            _ => record,
        })
        .collect();

    if let Some(current) = state.current_submission.as_mut() {
        let listed = state.submissions.iter().find(|s| s.id == current.id);
        if let Some(listed) = listed.filter(|l| current.status.can_transition_to(l.status)) {
            *current = listed.clone();
        }
    }
    rejected
}
