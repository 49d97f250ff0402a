//! Fetch Submissions
//!
//! Each fetch holds a ticket; only the most recently issued fetch of an
//! operation may write its result. Detail fetches are additionally tracked
//! per submission id. Accepted results still go through the
//! merge rules, so a terminal status is never overwritten.

use kernel::id::SubmissionId;

use crate::application::apply::{merge, replace_all};
use crate::application::store::SubmissionStore;
use crate::domain::entities::Submission;
use crate::domain::repository::SubmissionGateway;
use crate::domain::services::normalize;
use crate::error::{SubmissionError, SubmissionResult};

impl<G> SubmissionStore<G>
where
    G: SubmissionGateway + Sync,
{
    /// Load the caller's submissions; the listing replaces the list
    #[tracing::instrument(name = "submissions.fetch_mine", skip_all)]
    pub async fn fetch_mine(&self) -> SubmissionResult<Vec<Submission>> {
        let ticket = self.list_sequence.issue();
        self.state.send_modify(|state| state.list.begin());

        let result = self.gateway.list_mine().await;

        if !self.list_sequence.is_current(ticket) {
            tracing::debug!(%ticket, "Discarding superseded submission list");
            return Err(SubmissionError::Superseded);
        }

        match result {
            Ok(raw) => {
                let incoming: Vec<Submission> = raw.into_iter().map(normalize).collect();
                let mut submissions = Vec::new();
                self.state.send_modify(|state| {
                    let rejected = replace_all(state, incoming);
                    if rejected > 0 {
                        tracing::debug!(rejected, "Kept terminal statuses over stale listing");
                    }
                    submissions = state.submissions.clone();
                    state.list.succeed();
                });
                tracing::debug!(count = submissions.len(), "Submissions loaded");
                Ok(submissions)
            }
            Err(err) => {
                self.state.send_modify(|state| {
                    state.list.fail(err.message());
                });
                let err = SubmissionError::from(err);
                err.log();
                Err(err)
            }
        }
    }

    /// Load one submission and make it current
    ///
    /// Returns the record as stored, which is the known one when the
    /// server's copy was stale. When a fetch of another submission was
    /// issued meanwhile, the record is still merged into the list as long
    /// as no newer fetch of the same id is pending, but it neither becomes
    /// current nor settles the detail lifecycle.
    #[tracing::instrument(name = "submissions.fetch_one", skip_all, fields(submission_id = %id))]
    pub async fn fetch_one(&self, id: &SubmissionId) -> SubmissionResult<Submission> {
        let ticket = self.detail_sequence.issue();
        self.track_detail(id, ticket);
        self.state.send_modify(|state| state.detail.begin());

        let result = self.gateway.get(id).await;
        let latest_for_id = self.settle_detail(id, ticket);

        if !self.detail_sequence.is_current(ticket) {
            match result {
                Ok(raw) if latest_for_id => {
                    let applied = self.apply(normalize(raw));
                    tracing::debug!(%ticket, ?applied, "Merged superseded submission into the list");
                }
                _ => tracing::debug!(%ticket, "Discarding superseded submission"),
            }
            return Err(SubmissionError::Superseded);
        }

        match result {
            Ok(raw) => {
                let submission = normalize(raw);
                let mut stored = submission.clone();
                self.state.send_modify(|state| {
                    merge(state, submission);
                    if let Some(known) = state.known(id) {
                        stored = known.clone();
                    }
                    state.current_submission = Some(stored.clone());
                    state.detail.succeed();
                });
                Ok(stored)
            }
            Err(err) => {
                self.state.send_modify(|state| {
                    state.detail.fail(err.message());
                });
                let err = SubmissionError::from(err);
                err.log();
                Err(err)
            }
        }
    }
}
