//! Problem Management (admin)
//!
//! Writes go through the denormalizer. The bulk list is never patched;
//! callers refetch to see the change there.

use kernel::id::ProblemId;

use crate::application::store::CatalogStore;
use crate::domain::entities::{Problem, ProblemDraft, ProblemPatch};
use crate::domain::repository::CatalogGateway;
use crate::domain::services::{draft_payload, normalize, patch_payload};
use crate::error::{CatalogError, CatalogResult};

impl<G> CatalogStore<G>
where
    G: CatalogGateway + Sync,
{
    #[tracing::instrument(name = "catalog.create", skip_all, fields(title = %draft.title))]
    pub async fn create(&self, draft: &ProblemDraft) -> CatalogResult<Problem> {
        draft.validate()?;
        self.state.send_modify(|state| state.mutation.begin());

        let result = self.gateway.create(&draft_payload(draft)).await;
        let problem = self.settle_mutation(result.map(normalize))?;

        self.state.send_modify(|state| {
            state.current_problem = Some(problem.clone());
        });
        tracing::info!(problem_id = %problem.id, "Problem created");
        Ok(problem)
    }

    #[tracing::instrument(name = "catalog.update", skip_all, fields(problem_id = %id))]
    pub async fn update(&self, id: &ProblemId, patch: &ProblemPatch) -> CatalogResult<Problem> {
        patch.validate()?;
        self.state.send_modify(|state| state.mutation.begin());

        let result = self.gateway.update(id, &patch_payload(patch)).await;
        let problem = self.settle_mutation(result.map(normalize))?;

        self.state.send_modify(|state| {
            state.current_problem = Some(problem.clone());
        });
        tracing::info!("Problem updated");
        Ok(problem)
    }

    #[tracing::instrument(name = "catalog.delete", skip_all, fields(problem_id = %id))]
    pub async fn delete(&self, id: &ProblemId) -> CatalogResult<()> {
        self.state.send_modify(|state| state.mutation.begin());

        let result = self.gateway.delete(id).await;
        self.settle_mutation(result)?;

        self.state.send_if_modified(|state| {
            if state.current_problem.as_ref().is_some_and(|p| &p.id == id) {
                state.current_problem = None;
                return true;
            }
            false
        });
        tracing::info!("Problem deleted");
        Ok(())
    }

    fn settle_mutation<T>(&self, result: platform::TransportResult<T>) -> CatalogResult<T> {
        match result {
            Ok(value) => {
                self.state.send_modify(|state| {
                    state.mutation.succeed();
                });
                Ok(value)
            }
            Err(err) => {
                self.state.send_modify(|state| {
                    state.mutation.fail(err.message());
                });
                let err = CatalogError::from(err);
                err.log();
                Err(err)
            }
        }
    }
}
