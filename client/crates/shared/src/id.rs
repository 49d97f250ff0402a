//! Common ID Types
//!
//! Type-safe, string-typed ID wrappers for client entities.
//!
//! The backend may hand out numeric ids; the client always keeps the
//! server-issued value as a string and never renumbers or reuses it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type ProblemId = Id<markers::Problem>;
///
/// let id = ProblemId::from_number(42);
/// assert_eq!(id.as_str(), "42");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Wrap a server-issued id
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    /// Wrap a numeric server id, keeping its decimal representation
    pub fn from_number(value: i64) -> Self {
        Self::new(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    /// Ids degraded from malformed records are empty
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Read an id from a loosely typed payload field
    ///
    /// Accepts a non-blank string or an integer; anything else yields `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(Self::new(s.trim())),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::from_number)
                .or_else(|| n.as_u64().map(|v| Self::new(v.to_string()))),
            _ => None,
        }
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> From<String> for Id<T> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<T> From<&str> for Id<T> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct User;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Problem;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Submission;
}

pub type UserId = Id<markers::User>;
pub type ProblemId = Id<markers::Problem>;
pub type SubmissionId = Id<markers::Submission>;
