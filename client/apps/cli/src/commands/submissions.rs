//! Submission commands

use std::path::Path;

use auth::RouteRequirement;
use kernel::error::{app_error::ResultExt, kind::ErrorKind};
use kernel::id::{ProblemId, SubmissionId};
use submissions::{AppError, SubmissionDraft};

use crate::app::{App, print_json};

pub async fn submit(
    app: &App,
    problem_id: &str,
    language: &str,
    file: &Path,
    wait: bool,
) -> anyhow::Result<()> {
    app.require(RouteRequirement::authenticated()).await?;

    let code = tokio::fs::read_to_string(file)
        .await
        .map_app_err(ErrorKind::BadRequest, format!("Failed to read {}", file.display()))?;
    let draft = SubmissionDraft::new(ProblemId::new(problem_id), code, language);

    let submission = app
        .submissions
        .create(&draft)
        .await
        .map_err(AppError::from)?;
    if !wait || submission.is_terminal() {
        return print_json(&submission);
    }

    tracing::info!(submission_id = %submission.id, "Waiting for the verdict");
    let verdict = app
        .submissions
        .await_verdict(
            &submission.id,
            app.config.poll_interval,
            app.config.poll_max_attempts,
        )
        .await
        .map_err(AppError::from)?;
    print_json(&verdict)
}

pub async fn list(app: &App) -> anyhow::Result<()> {
    app.require(RouteRequirement::authenticated()).await?;
    let submissions = app.submissions.fetch_mine().await.map_err(AppError::from)?;
    print_json(&submissions)
}

pub async fn show(app: &App, id: &str) -> anyhow::Result<()> {
    app.require(RouteRequirement::authenticated()).await?;
    let submission = app
        .submissions
        .fetch_one(&SubmissionId::new(id))
        .await
        .map_err(AppError::from)?;
    print_json(&submission)
}
