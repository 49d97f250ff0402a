//! HTTP Submission Gateway

use std::sync::Arc;

use kernel::id::SubmissionId;
use platform::{HttpBackend, Transport, TransportError, TransportResult};
use serde_json::Value;

use crate::domain::repository::SubmissionGateway;
use crate::domain::services::{RawSubmission, SubmissionPayload, raw_list};

/// [`SubmissionGateway`] over the shared [`Transport`]
pub struct HttpSubmissionGateway<B> {
    transport: Arc<Transport<B>>,
}

impl<B> HttpSubmissionGateway<B> {
    pub fn new(transport: Arc<Transport<B>>) -> Self {
        Self { transport }
    }
}

impl<B> SubmissionGateway for HttpSubmissionGateway<B>
where
    B: HttpBackend + Sync,
{
    async fn list_mine(&self) -> TransportResult<Vec<RawSubmission>> {
        let body: Value = self.transport.get("/submissions", Vec::new()).await?;
        raw_list(body).ok_or_else(|| {
            let err = TransportError::Decode("expected a submission list".to_string());
            err.log();
            err
        })
    }

    async fn get(&self, id: &SubmissionId) -> TransportResult<RawSubmission> {
        let body: Value = self.transport.get(&format!("/submissions/{id}"), Vec::new()).await?;
        Ok(RawSubmission::from_value(body))
    }

    async fn create(&self, payload: &SubmissionPayload) -> TransportResult<RawSubmission> {
        let body: Value = self.transport.post("/submissions", payload).await?;
        Ok(RawSubmission::from_value(body))
    }
}
