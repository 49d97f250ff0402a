//! HTTP Catalog Gateway

use std::sync::Arc;

use kernel::id::ProblemId;
use platform::{HttpBackend, Transport, TransportError, TransportResult};
use serde_json::Value;

use crate::domain::repository::CatalogGateway;
use crate::domain::services::{ProblemPayload, RawProblem, RawProblemPage};
use crate::domain::value_objects::ProblemFilter;

/// [`CatalogGateway`] over the shared [`Transport`]
pub struct HttpCatalogGateway<B> {
    transport: Arc<Transport<B>>,
}

impl<B> HttpCatalogGateway<B> {
    pub fn new(transport: Arc<Transport<B>>) -> Self {
        Self { transport }
    }
}

fn problem_path(id: &ProblemId) -> String {
    format!("/problems/{id}")
}

impl<B> CatalogGateway for HttpCatalogGateway<B>
where
    B: HttpBackend + Sync,
{
    async fn list(&self, filter: &ProblemFilter) -> TransportResult<RawProblemPage> {
        let body: Value = self.transport.get("/problems", filter.query_params()).await?;
        RawProblemPage::from_json(body).ok_or_else(|| {
            let err = TransportError::Decode("expected a problem list".to_string());
            err.log();
            err
        })
    }

    async fn get(&self, id: &ProblemId) -> TransportResult<RawProblem> {
        let body: Value = self.transport.get(&problem_path(id), Vec::new()).await?;
        Ok(RawProblem::from_value(body))
    }

    async fn create(&self, payload: &ProblemPayload) -> TransportResult<RawProblem> {
        let body: Value = self.transport.post("/problems", payload).await?;
        Ok(RawProblem::from_value(body))
    }

    async fn update(&self, id: &ProblemId, payload: &ProblemPayload) -> TransportResult<RawProblem> {
        let body: Value = self.transport.put(&problem_path(id), payload).await?;
        Ok(RawProblem::from_value(body))
    }

    async fn delete(&self, id: &ProblemId) -> TransportResult<()> {
        // The server echoes the deleted record; it is not needed.
        let _: Value = self.transport.delete(&problem_path(id)).await?;
        Ok(())
    }
}
