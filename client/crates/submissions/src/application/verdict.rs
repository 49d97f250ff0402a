//! Verdict Polling
//!
//! Re-fetches a submission until the judge settles on a terminal status.

use std::time::Duration;

use kernel::id::SubmissionId;

use crate::application::store::SubmissionStore;
use crate::domain::entities::Submission;
use crate::domain::repository::SubmissionGateway;
use crate::error::{SubmissionError, SubmissionResult};

impl<G> SubmissionStore<G>
where
    G: SubmissionGateway + Sync,
{
    /// Poll until the submission is terminal, at most `max_attempts` times
    ///
    /// A superseded check counts as an attempt, though a verdict it merged
    /// into the list is still picked up. Any other failure ends the wait.
    #[tracing::instrument(name = "submissions.await_verdict", skip_all, fields(submission_id = %id))]
    pub async fn await_verdict(
        &self,
        id: &SubmissionId,
        interval: Duration,
        max_attempts: u32,
    ) -> SubmissionResult<Submission> {
        for attempt in 1..=max_attempts {
            match self.fetch_one(id).await {
                Ok(submission) if submission.is_terminal() => {
                    tracing::info!(attempt, status = %submission.status, "Verdict reached");
                    return Ok(submission);
                }
                Ok(submission) => {
                    tracing::debug!(attempt, status = %submission.status, "Still judging");
                }
                Err(SubmissionError::Superseded) => {
                    let known = self.state.borrow().known(id).cloned();
                    if let Some(submission) = known.filter(Submission::is_terminal) {
                        tracing::info!(attempt, status = %submission.status, "Verdict reached");
                        return Ok(submission);
                    }
                    tracing::debug!(attempt, "Check superseded");
                }
                Err(err) => return Err(err),
            }
            if attempt < max_attempts {
                tokio::time::sleep(interval).await;
            }
        }

        let err = SubmissionError::VerdictTimeout {
            id: id.clone(),
            attempts: max_attempts,
        };
        err.log();
        Err(err)
    }
}
