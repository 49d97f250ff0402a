//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::error::validation::{ValidationError, require_non_blank};
use kernel::id::{ProblemId, SubmissionId};
use serde::Serialize;

use crate::domain::value_objects::SubmissionStatus;

/// Submission entity (post-normalization)
///
/// `problem_id` is a reference only; the problem lives in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub problem_id: ProblemId,
    pub code: String,
    pub language: String,
    pub status: SubmissionStatus,
    /// Milliseconds, when the judge reports it
    pub runtime: Option<f64>,
    /// Kilobytes, when the judge reports it
    pub memory: Option<f64>,
    /// 0 to 100
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Submission {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// A solution about to be submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionDraft {
    pub problem_id: ProblemId,
    pub code: String,
    pub language: String,
}

impl SubmissionDraft {
    pub fn new(problem_id: ProblemId, code: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            problem_id,
            code: code.into(),
            language: language.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("problem_id", self.problem_id.as_str())?;
        require_non_blank("code", &self.code)?;
        require_non_blank("language", &self.language)?;
        Ok(())
    }
}
