//! Request Lifecycle
//!
//! The idle/loading/succeeded/failed shape every store tracks per logical
//! operation.
//!
//! ## Transitions
//! - `begin`: any state → `Loading` (clears the error)
//! - `succeed`: `Loading` → `Succeeded`
//! - `fail`: `Loading` → `Failed` (records the error)
//! - `reset`: any state → `Idle`
//!
//! `Loading` is only ever left through `succeed` or `fail`, or through an
//! explicit `reset`. Completing a request that is not loading is refused.

use serde::Serialize;
use std::fmt;

/// Status of one logical remote operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl RequestStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }

    #[inline]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// `Succeeded` or `Failed`
    #[inline]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Lifecycle of one logical operation, with its error when failed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RequestState {
    status: RequestStatus,
    error: Option<String>,
}

impl RequestState {
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Populated only while `Failed`
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    /// Enter `Loading`
    pub fn begin(&mut self) {
        self.status = RequestStatus::Loading;
        self.error = None;
    }

    /// `Loading` → `Succeeded`; returns whether the transition happened
    pub fn succeed(&mut self) -> bool {
        if !self.status.is_loading() {
            return false;
        }
        self.status = RequestStatus::Succeeded;
        self.error = None;
        true
    }

    /// `Loading` → `Failed`; returns whether the transition happened
    pub fn fail(&mut self, error: impl Into<String>) -> bool {
        if !self.status.is_loading() {
            return false;
        }
        self.status = RequestStatus::Failed;
        self.error = Some(error.into());
        true
    }

    /// Explicit reset back to `Idle`
    pub fn reset(&mut self) {
        self.status = RequestStatus::Idle;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut state = RequestState::default();
        assert_eq!(state.status(), RequestStatus::Idle);

        state.begin();
        assert!(state.is_loading());
        assert!(state.succeed());
        assert_eq!(state.status(), RequestStatus::Succeeded);
        assert!(state.error().is_none());
    }

    #[test]
    fn test_failure_records_error() {
        let mut state = RequestState::default();
        state.begin();
        assert!(state.fail("Invalid credentials"));
        assert_eq!(state.status(), RequestStatus::Failed);
        assert_eq!(state.error(), Some("Invalid credentials"));
    }

    #[test]
    fn test_loading_is_left_exactly_once() {
        let mut state = RequestState::default();
        state.begin();
        assert!(state.succeed());
        assert!(!state.fail("late failure"));
        assert!(!state.succeed());
        assert_eq!(state.status(), RequestStatus::Succeeded);
    }

    #[test]
    fn test_cannot_settle_from_idle() {
        let mut state = RequestState::default();
        assert!(!state.succeed());
        assert!(!state.fail("nope"));
        assert_eq!(state.status(), RequestStatus::Idle);
    }

    #[test]
    fn test_begin_clears_previous_error() {
        let mut state = RequestState::default();
        state.begin();
        state.fail("boom");
        state.begin();
        assert!(state.error().is_none());
        state.reset();
        assert_eq!(state.status(), RequestStatus::Idle);
    }
}
