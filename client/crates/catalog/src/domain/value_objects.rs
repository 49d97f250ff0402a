//! Domain Value Objects
//!
//! Problem classification enums and the catalog filter.
//!
//! Canonical values are upper-case; the backend speaks lower-case wire
//! codes. Parsing is case-insensitive.

use serde::Serialize;
use std::fmt;

use crate::domain::entities::Problem;

// ============================================================================
// ProblemType
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProblemType {
    #[default]
    Dsa,
    Lld,
    Hld,
    Sql,
    Devops,
}

impl ProblemType {
    pub const ALL: [ProblemType; 5] = [Self::Dsa, Self::Lld, Self::Hld, Self::Sql, Self::Devops];

    /// Canonical upper-case value
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Dsa => "DSA",
            Self::Lld => "LLD",
            Self::Hld => "HLD",
            Self::Sql => "SQL",
            Self::Devops => "DEVOPS",
        }
    }

    /// Lower-case value the backend expects
    #[inline]
    pub const fn wire_code(&self) -> &'static str {
        match self {
            Self::Dsa => "dsa",
            Self::Lld => "lld",
            Self::Hld => "hld",
            Self::Sql => "sql",
            Self::Devops => "devops",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Difficulty
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }

    #[inline]
    pub const fn wire_code(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// The backend's `expert` level has no client counterpart and maps to `Hard`
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.eq_ignore_ascii_case("expert") {
            return Some(Self::Hard);
        }
        Self::ALL
            .into_iter()
            .find(|d| d.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// ProblemFilter
// ============================================================================

/// Catalog query
///
/// Applied server-side through query parameters. [`ProblemFilter::matches`]
/// is the same predicate for instant feedback on an already cached list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ProblemFilter {
    pub problem_type: Option<ProblemType>,
    pub difficulty: Option<Difficulty>,
    pub search: Option<String>,
    pub tags: Vec<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ProblemFilter {
    pub fn with_type(mut self, problem_type: ProblemType) -> Self {
        self.problem_type = Some(problem_type);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Query string parameters; unset fields are omitted
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(t) = self.problem_type {
            params.push(("type".to_string(), t.wire_code().to_string()));
        }
        if let Some(d) = self.difficulty {
            params.push(("difficulty".to_string(), d.wire_code().to_string()));
        }
        if let Some(search) = self.search_term() {
            params.push(("search".to_string(), search.to_string()));
        }
        if !self.tags.is_empty() {
            params.push(("tags".to_string(), self.tags.join(",")));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset".to_string(), offset.to_string()));
        }
        params
    }

    /// Client-side counterpart of the server filter
    ///
    /// Exact match on type and difficulty, case-insensitive substring on
    /// title or description for `search`, and every requested tag present.
    /// Pagination is not applied.
    pub fn matches(&self, problem: &Problem) -> bool {
        if self.problem_type.is_some_and(|t| t != problem.problem_type) {
            return false;
        }
        if self.difficulty.is_some_and(|d| d != problem.difficulty) {
            return false;
        }
        if let Some(term) = self.search_term() {
            let term = term.to_lowercase();
            if !problem.title.to_lowercase().contains(&term)
                && !problem.description.to_lowercase().contains(&term)
            {
                return false;
            }
        }
        self.tags.iter().all(|wanted| {
            problem
                .tags
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case(wanted.trim()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_codes_are_case_insensitive() {
        assert_eq!(ProblemType::from_code("lld"), Some(ProblemType::Lld));
        assert_eq!(ProblemType::from_code("DevOps"), Some(ProblemType::Devops));
        assert_eq!(ProblemType::from_code("frontend"), None);
        assert_eq!(ProblemType::Sql.wire_code(), "sql");
        assert_eq!(ProblemType::default(), ProblemType::Dsa);
    }

    #[test]
    fn test_difficulty_codes() {
        assert_eq!(Difficulty::from_code("easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_code(" HARD "), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_code("expert"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_code(""), None);
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn test_query_params_use_wire_codes() {
        let filter = ProblemFilter {
            limit: Some(20),
            offset: Some(40),
            ..ProblemFilter::default()
        }
        .with_type(ProblemType::Lld)
        .with_difficulty(Difficulty::Easy)
        .with_search("  cache ")
        .with_tag("design")
        .with_tag("lru");

        assert_eq!(
            filter.query_params(),
            vec![
                ("type".to_string(), "lld".to_string()),
                ("difficulty".to_string(), "easy".to_string()),
                ("search".to_string(), "cache".to_string()),
                ("tags".to_string(), "design,lru".to_string()),
                ("limit".to_string(), "20".to_string()),
                ("offset".to_string(), "40".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_filter_sends_nothing() {
        let filter = ProblemFilter::default().with_search("   ");
        assert!(filter.query_params().is_empty());
        assert!(ProblemFilter::default().is_empty());
    }
}
