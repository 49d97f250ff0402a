//! Fetch Problems
//!
//! Each fetch holds a ticket; only the most recently issued fetch of an
//! operation may write its result. A superseded response changes nothing.

use kernel::id::ProblemId;

use crate::application::store::CatalogStore;
use crate::domain::entities::{Problem, ProblemPage};
use crate::domain::repository::CatalogGateway;
use crate::domain::services::{normalize, normalize_page};
use crate::domain::value_objects::ProblemFilter;
use crate::error::{CatalogError, CatalogResult};

impl<G> CatalogStore<G>
where
    G: CatalogGateway + Sync,
{
    /// Fetch one filtered page and replace the list with it
    ///
    /// On failure the previously loaded list is kept.
    #[tracing::instrument(name = "catalog.fetch_all", skip_all)]
    pub async fn fetch_all(&self, filter: &ProblemFilter) -> CatalogResult<ProblemPage> {
        let ticket = self.list_sequence.issue();
        self.state.send_modify(|state| state.list.begin());

        let result = self.gateway.list(filter).await;

        if !self.list_sequence.is_current(ticket) {
            tracing::debug!(%ticket, "Discarding superseded problem list");
            return Err(CatalogError::Superseded);
        }

        match result {
            Ok(raw) => {
                let page = normalize_page(raw);
                self.state.send_modify(|state| {
                    state.problems = page.items.clone();
                    state.total = page.total;
                    state.list.succeed();
                });
                tracing::debug!(count = page.items.len(), total = ?page.total, "Problem list loaded");
                Ok(page)
            }
            Err(err) => {
                self.state.send_modify(|state| {
                    state.list.fail(err.message());
                });
                let err = CatalogError::from(err);
                err.log();
                Err(err)
            }
        }
    }

    /// Fetch with the stored filter
    pub async fn refresh(&self) -> CatalogResult<ProblemPage> {
        let filter = self.state.borrow().filter.clone();
        self.fetch_all(&filter).await
    }

    /// Fetch one problem into `current_problem`; the list is left alone
    #[tracing::instrument(name = "catalog.fetch_one", skip_all, fields(problem_id = %id))]
    pub async fn fetch_one(&self, id: &ProblemId) -> CatalogResult<Problem> {
        let ticket = self.detail_sequence.issue();
        self.state.send_modify(|state| state.detail.begin());

        let result = self.gateway.get(id).await;

        if !self.detail_sequence.is_current(ticket) {
            tracing::debug!(%ticket, "Discarding superseded problem");
            return Err(CatalogError::Superseded);
        }

        match result {
            Ok(raw) => {
                let problem = normalize(raw);
                self.state.send_modify(|state| {
                    state.current_problem = Some(problem.clone());
                    state.detail.succeed();
                });
                Ok(problem)
            }
            Err(err) => {
                self.state.send_modify(|state| {
                    state.detail.fail(err.message());
                });
                let err = CatalogError::from(err);
                err.log();
                Err(err)
            }
        }
    }
}
