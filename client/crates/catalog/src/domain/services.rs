//! Problem Normalization
//!
//! The only crossing between the backend's loosely typed problem records
//! and the canonical [`Problem`]. [`normalize`] is total: every malformed
//! field degrades to a default and the rest of the record is still built.
//! [`denormalize`] goes the other way for admin writes.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDateTime, Utc};
use kernel::id::ProblemId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::entities::{Problem, ProblemDraft, ProblemPage, ProblemPatch};
use crate::domain::value_objects::{Difficulty, ProblemType};

const SAMPLE_TEST_CASES_KEYS: [&str; 2] = ["sampleTestCases", "sample_test_cases"];

/// Problem record as the server sends it
///
/// Every field is kept as raw JSON so no single bad field can fail the
/// decode of the whole record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawProblem {
    pub id: Value,
    pub title: Value,
    pub description: Value,
    pub problem_type: Value,
    /// Some payloads already use the client field name
    #[serde(rename = "type")]
    pub type_field: Value,
    pub difficulty: Value,
    pub tags: Value,
    pub problem_metadata: Value,
    pub company_id: Value,
    pub created_at: Value,
    pub updated_at: Value,
}

impl RawProblem {
    /// Decode one list element; non-object values become an empty record
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Problem record is not an object");
            Self::default()
        })
    }
}

/// A page of raw records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawProblemPage {
    pub items: Vec<RawProblem>,
    pub total: Option<u64>,
}

impl RawProblemPage {
    /// Accepts `{"items": [...], "total": n}` or a bare array
    pub fn from_json(value: Value) -> Option<Self> {
        let (items, total) = match value {
            Value::Array(items) => (items, None),
            Value::Object(mut envelope) => {
                let total = envelope.get("total").and_then(Value::as_u64);
                match envelope.remove("items") {
                    Some(Value::Array(items)) => (items, total),
                    _ => return None,
                }
            }
            _ => return None,
        };
        Some(Self {
            items: items.into_iter().map(RawProblem::from_value).collect(),
            total,
        })
    }
}

/// Write body for `POST /problems` and `PUT /problems/{id}`
///
/// Lower-case enum values under the backend's `problem_type` field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProblemPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_metadata: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<Value>,
}

// ============================================================================
// Raw → canonical
// ============================================================================

/// Build a canonical problem from a raw record; never fails
pub fn normalize(raw: RawProblem) -> Problem {
    let id = ProblemId::from_json(&raw.id).unwrap_or_else(|| {
        tracing::warn!("Problem record without a usable id");
        ProblemId::new("")
    });

    let type_value = if raw.problem_type.is_null() {
        &raw.type_field
    } else {
        &raw.problem_type
    };
    let problem_type = text(type_value)
        .and_then(|code| ProblemType::from_code(&code))
        .unwrap_or_else(|| {
            tracing::warn!(problem_id = %id, value = %type_value, "Unknown problem type, using default");
            ProblemType::default()
        });

    let difficulty = text(&raw.difficulty)
        .and_then(|code| Difficulty::from_code(&code))
        .unwrap_or_else(|| {
            tracing::warn!(problem_id = %id, value = %raw.difficulty, "Unknown difficulty, using default");
            Difficulty::default()
        });

    let metadata = raw.problem_metadata.as_object();
    let tags = metadata
        .and_then(|m| m.get("tags"))
        .map(tag_set)
        .filter(|tags| !tags.is_empty())
        .unwrap_or_else(|| tag_set(&raw.tags));

    let sample_test_cases = metadata.and_then(|m| {
        SAMPLE_TEST_CASES_KEYS
            .iter()
            .find_map(|key| m.get(*key))
            .and_then(sample_text)
    });

    let created_at = timestamp(&raw.created_at);
    let updated_at = timestamp(&raw.updated_at).or(created_at);

    Problem {
        title: text(&raw.title).unwrap_or_default(),
        description: text(&raw.description).unwrap_or_default(),
        problem_type,
        difficulty,
        tags,
        company_id: text(&raw.company_id).filter(|id| !id.trim().is_empty()),
        sample_test_cases,
        created_at: created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        updated_at: updated_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        id,
    }
}

/// Normalize every record of a page, keeping server order
pub fn normalize_page(raw: RawProblemPage) -> ProblemPage {
    ProblemPage {
        items: raw.items.into_iter().map(normalize).collect(),
        total: raw.total,
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Tags as an array of strings or a comma-separated string
fn tag_set(value: &Value) -> BTreeSet<String> {
    let clean = |s: &str| Some(s.trim().to_string()).filter(|s| !s.is_empty());
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .filter_map(clean)
            .collect(),
        Value::String(joined) => joined.split(',').filter_map(clean).collect(),
        _ => BTreeSet::new(),
    }
}

fn sample_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// RFC 3339, or naive ISO 8601 read as UTC
fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let raw = value.as_str()?.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

// ============================================================================
// Canonical → wire
// ============================================================================

/// Write body for an existing problem
pub fn denormalize(problem: &Problem) -> ProblemPayload {
    draft_payload(&ProblemDraft::from(problem))
}

/// Write body for a new problem
pub fn draft_payload(draft: &ProblemDraft) -> ProblemPayload {
    let mut metadata = Map::new();
    metadata.insert("tags".to_string(), tags_value(&draft.tags));
    if let Some(samples) = &draft.sample_test_cases {
        metadata.insert(
            SAMPLE_TEST_CASES_KEYS[0].to_string(),
            Value::String(samples.clone()),
        );
    }

    ProblemPayload {
        title: Some(draft.title.trim().to_string()),
        description: Some(draft.description.clone()),
        problem_type: Some(draft.problem_type.wire_code().to_string()),
        difficulty: Some(draft.difficulty.wire_code().to_string()),
        problem_metadata: Some(metadata),
        company_id: draft.company_id.as_deref().map(company_value),
    }
}

/// Write body for a partial update; untouched fields are omitted
pub fn patch_payload(patch: &ProblemPatch) -> ProblemPayload {
    ProblemPayload {
        title: patch.title.as_ref().map(|t| t.trim().to_string()),
        description: patch.description.clone(),
        problem_type: patch.problem_type.map(|t| t.wire_code().to_string()),
        difficulty: patch.difficulty.map(|d| d.wire_code().to_string()),
        problem_metadata: patch.tags.as_ref().map(|tags| {
            let mut metadata = Map::new();
            metadata.insert("tags".to_string(), tags_value(tags));
            metadata
        }),
        company_id: patch.company_id.as_deref().map(company_value),
    }
}

fn tags_value(tags: &BTreeSet<String>) -> Value {
    Value::Array(tags.iter().cloned().map(Value::String).collect())
}

/// Numeric company ids go back as numbers
fn company_value(id: &str) -> Value {
    id.parse::<i64>()
        .map(Value::from)
        .unwrap_or_else(|_| Value::String(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn raw(value: Value) -> RawProblem {
        RawProblem::from_value(value)
    }

    #[test]
    fn test_missing_or_invalid_difficulty_is_medium() {
        for difficulty in [json!(null), json!("impossible"), json!(3), json!(""), json!({})] {
            let problem = normalize(raw(json!({"id": 1, "difficulty": difficulty})));
            assert_eq!(problem.difficulty, Difficulty::Medium);
        }
        let problem = normalize(raw(json!({"id": 1})));
        assert_eq!(problem.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_lower_case_type_is_canonicalized() {
        let problem = normalize(raw(json!({"id": 1, "problem_type": "lld"})));
        assert_eq!(problem.problem_type, ProblemType::Lld);
        assert_eq!(serde_json::to_value(&problem).unwrap()["type"], "LLD");
    }

    #[test]
    fn test_unknown_type_defaults_to_dsa() {
        let problem = normalize(raw(json!({"id": 1, "problem_type": "frontend"})));
        assert_eq!(problem.problem_type, ProblemType::Dsa);
    }

    #[test]
    fn test_client_type_field_is_accepted() {
        let problem = normalize(raw(json!({"id": 1, "type": "SQL"})));
        assert_eq!(problem.problem_type, ProblemType::Sql);
    }

    #[test]
    fn test_expert_maps_to_hard() {
        let problem = normalize(raw(json!({"id": 1, "difficulty": "expert"})));
        assert_eq!(problem.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_full_record() {
        let problem = normalize(raw(json!({
            "id": 42,
            "title": "LRU Cache",
            "description": "Design an LRU cache",
            "problem_type": "lld",
            "difficulty": "hard",
            "problem_metadata": {"tags": ["design", " cache ", ""], "sampleTestCases": "get(1) -> 1"},
            "company_id": 7,
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-02T11:30:00.123456"
        })));

        assert_eq!(problem.id.as_str(), "42");
        assert_eq!(problem.title, "LRU Cache");
        assert_eq!(
            problem.tags,
            BTreeSet::from(["cache".to_string(), "design".to_string()])
        );
        assert_eq!(problem.company_id.as_deref(), Some("7"));
        assert_eq!(problem.sample_test_cases.as_deref(), Some("get(1) -> 1"));
        assert_eq!(
            problem.created_at,
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
        );
        assert!(problem.updated_at > problem.created_at);
    }

    #[test]
    fn test_top_level_tags_and_timestamp_fallbacks() {
        let problem = normalize(raw(json!({
            "id": "p-9",
            "tags": "sql, joins",
            "created_at": "2024-01-05 08:00:00"
        })));
        assert_eq!(problem.tags.len(), 2);
        assert_eq!(problem.updated_at, problem.created_at);

        let problem = normalize(raw(json!({"id": 1, "created_at": "yesterday"})));
        assert_eq!(problem.created_at, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(problem.updated_at, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_garbage_record_still_normalizes() {
        let problem = normalize(raw(json!("not an object")));
        assert!(problem.id.is_empty());
        assert_eq!(problem.title, "");
        assert_eq!(problem.problem_type, ProblemType::Dsa);
        assert_eq!(problem.difficulty, Difficulty::Medium);

        let problem = normalize(raw(json!({"id": 3, "title": 12, "tags": [1, "ok"]})));
        assert_eq!(problem.title, "12");
        assert_eq!(problem.tags, BTreeSet::from(["ok".to_string()]));
    }

    #[test]
    fn test_page_envelopes() {
        let page = RawProblemPage::from_json(json!({"items": [{"id": 1}, {"id": 2}], "total": 9})).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, Some(9));

        let page = RawProblemPage::from_json(json!([{"id": 1}, null])).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, None);

        assert!(RawProblemPage::from_json(json!({"detail": "nope"})).is_none());
        assert!(RawProblemPage::from_json(json!("nope")).is_none());
    }

    #[test]
    fn test_denormalize_round_trip() {
        let original = json!({
            "id": 5,
            "title": "Rate Limiter",
            "description": "Design a token bucket",
            "problem_type": "hld",
            "difficulty": "easy",
            "problem_metadata": {"tags": ["design"]},
            "company_id": 3
        });

        let payload = denormalize(&normalize(raw(original.clone())));
        let body = serde_json::to_value(&payload).unwrap();

        assert_eq!(body["problem_type"], original["problem_type"]);
        assert_eq!(body["difficulty"], original["difficulty"]);
        assert_eq!(body["title"], original["title"]);
        assert_eq!(body["company_id"], original["company_id"]);
        assert_eq!(body["problem_metadata"]["tags"], json!(["design"]));
        assert!(body.get("type").is_none());
    }

    #[test]
    fn test_patch_payload_omits_untouched_fields() {
        let patch = ProblemPatch {
            difficulty: Some(Difficulty::Hard),
            problem_type: Some(ProblemType::Devops),
            ..ProblemPatch::default()
        };
        let body = serde_json::to_value(patch_payload(&patch)).unwrap();
        assert_eq!(body, json!({"problem_type": "devops", "difficulty": "hard"}));
    }
}
