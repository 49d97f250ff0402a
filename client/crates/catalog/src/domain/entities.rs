//! Domain Entities
//!
//! Canonical problem shape plus the admin authoring inputs.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use kernel::error::validation::{ValidationError, require_non_blank};
use kernel::id::ProblemId;
use serde::Serialize;

use crate::domain::value_objects::{Difficulty, ProblemType};

/// Problem entity (post-normalization)
///
/// Never mutated in place; every fetch produces fresh values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub id: ProblemId,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub problem_type: ProblemType,
    pub difficulty: Difficulty,
    pub tags: BTreeSet<String>,
    pub company_id: Option<String>,
    pub sample_test_cases: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A new problem authored by an admin
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProblemDraft {
    pub title: String,
    pub description: String,
    pub problem_type: ProblemType,
    pub difficulty: Difficulty,
    pub tags: BTreeSet<String>,
    pub company_id: Option<String>,
    pub sample_test_cases: Option<String>,
}

impl ProblemDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        problem_type: ProblemType,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            problem_type,
            difficulty,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("title", &self.title)?;
        require_non_blank("description", &self.description)?;
        Ok(())
    }
}

impl From<&Problem> for ProblemDraft {
    fn from(problem: &Problem) -> Self {
        Self {
            title: problem.title.clone(),
            description: problem.description.clone(),
            problem_type: problem.problem_type,
            difficulty: problem.difficulty,
            tags: problem.tags.clone(),
            company_id: problem.company_id.clone(),
            sample_test_cases: problem.sample_test_cases.clone(),
        }
    }
}

/// Partial update; `None` fields are left untouched server-side
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProblemPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub problem_type: Option<ProblemType>,
    pub difficulty: Option<Difficulty>,
    pub tags: Option<BTreeSet<String>>,
    pub company_id: Option<String>,
}

impl ProblemPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::new("patch", "must change at least one field"));
        }
        if let Some(title) = &self.title {
            require_non_blank("title", title)?;
        }
        if let Some(description) = &self.description {
            require_non_blank("description", description)?;
        }
        Ok(())
    }
}

/// One page of the catalog as the server returned it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProblemPage {
    pub items: Vec<Problem>,
    pub total: Option<u64>,
}
