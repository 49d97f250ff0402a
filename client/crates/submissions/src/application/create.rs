//! Create Submission
//!
//! The new record enters the store only after the server acknowledges it,
//! in whatever status the server assigned. A listing that already reported
//! a verdict for it wins over the acknowledgement.

use crate::application::apply::merge;
use crate::application::store::SubmissionStore;
use crate::domain::entities::{Submission, SubmissionDraft};
use crate::domain::repository::SubmissionGateway;
use crate::domain::services::{SubmissionPayload, normalize};
use crate::error::{SubmissionError, SubmissionResult};

impl<G> SubmissionStore<G>
where
    G: SubmissionGateway + Sync,
{
    #[tracing::instrument(
        name = "submissions.create",
        skip_all,
        fields(problem_id = %draft.problem_id, language = %draft.language)
    )]
    pub async fn create(&self, draft: &SubmissionDraft) -> SubmissionResult<Submission> {
        draft.validate()?;
        self.state.send_modify(|state| state.create.begin());

        let result = self.gateway.create(&SubmissionPayload::from(draft)).await;

        match result {
            Ok(raw) => {
                let incoming = normalize(raw);
                let mut submission = incoming.clone();
                self.state.send_modify(|state| {
                    merge(state, incoming);
                    if let Some(known) = state.known(&submission.id) {
                        submission = known.clone();
                    }
                    state.current_submission = Some(submission.clone());
                    state.create.succeed();
                });
                tracing::info!(submission_id = %submission.id, status = %submission.status, "Submission accepted");
                Ok(submission)
            }
            Err(err) => {
                self.state.send_modify(|state| {
                    state.create.fail(err.message());
                });
                let err = SubmissionError::from(err);
                err.log();
                Err(err)
            }
        }
    }
}
