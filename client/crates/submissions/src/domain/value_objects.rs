//! Submission Status
//!
//! The judging lifecycle of one submission:
//!
//! ```text
//! Pending -> Running -> Accepted | WrongAnswer | RuntimeError
//!                       | TimeLimitExceeded | CompilationError
//! ```
//!
//! A terminal status is sticky. Transitions may skip `Running`, never go
//! backwards, and never move between two different terminal statuses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Judging status of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    /// Accepted by the server, not yet picked up by a judge
    #[default]
    Pending,

    /// Being judged
    Running,

    Accepted,
    WrongAnswer,
    RuntimeError,
    TimeLimitExceeded,
    CompilationError,
}

impl SubmissionStatus {
    pub const ALL: [SubmissionStatus; 7] = [
        Self::Pending,
        Self::Running,
        Self::Accepted,
        Self::WrongAnswer,
        Self::RuntimeError,
        Self::TimeLimitExceeded,
        Self::CompilationError,
    ];

    /// Canonical upper-case code
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Accepted => "ACCEPTED",
            Self::WrongAnswer => "WRONG_ANSWER",
            Self::RuntimeError => "RUNTIME_ERROR",
            Self::TimeLimitExceeded => "TIME_LIMIT_EXCEEDED",
            Self::CompilationError => "COMPILATION_ERROR",
        }
    }

    /// Check if this is a terminal state (cannot transition out)
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending | Self::Running)
    }

    /// Check if the verdict is a pass
    #[inline]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    const fn stage(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Running => 1,
            _ => 2,
        }
    }

    /// Whether a record in this status may be replaced by one in `next`
    ///
    /// Same-status replacements are allowed so late fields (runtime,
    /// feedback) can still arrive for a finished submission.
    pub const fn can_transition_to(&self, next: SubmissionStatus) -> bool {
        if self.is_terminal() {
            return *self as u8 == next as u8;
        }
        next.stage() >= self.stage()
    }

    /// Create from a status code
    ///
    /// Case-insensitive. Also understands the judge backend's own codes
    /// (`rejected`, `error`, `memory_limit_exceeded`, `processing`, ...).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "pending" | "queued" => Some(Self::Pending),
            "running" | "processing" | "judging" => Some(Self::Running),
            "accepted" => Some(Self::Accepted),
            "wrong_answer" | "rejected" => Some(Self::WrongAnswer),
            "runtime_error" | "error" | "memory_limit_exceeded" => Some(Self::RuntimeError),
            "time_limit_exceeded" => Some(Self::TimeLimitExceeded),
            "compilation_error" => Some(Self::CompilationError),
            _ => None,
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
