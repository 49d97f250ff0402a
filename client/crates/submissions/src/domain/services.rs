//! Submission Normalization
//!
//! Server records come in two dialects: the client's own camelCase shape
//! (`problemId`, `code`, upper-case statuses) and the judge backend's
//! (`problem_id`, `content`, lower-case statuses, metrics under `results`).
//! [`normalize`] accepts both and never fails.

use chrono::{DateTime, NaiveDateTime, Utc};
use kernel::id::{ProblemId, SubmissionId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::entities::{Submission, SubmissionDraft};
use crate::domain::value_objects::SubmissionStatus;

/// Submission record as the server sends it
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawSubmission {
    pub id: Value,
    #[serde(rename = "problemId")]
    pub problem_id_camel: Value,
    pub problem_id: Value,
    pub code: Value,
    pub content: Value,
    pub language: Value,
    pub status: Value,
    pub runtime: Value,
    pub memory: Value,
    pub score: Value,
    pub feedback: Value,
    /// Judge output; may carry `runtime`, `memory` and `feedback`
    pub results: Value,
    #[serde(rename = "createdAt")]
    pub created_at_camel: Value,
    pub created_at: Value,
    #[serde(rename = "updatedAt")]
    pub updated_at_camel: Value,
    pub updated_at: Value,
}

impl RawSubmission {
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Submission record is not an object");
            Self::default()
        })
    }
}

/// Accepts a bare array or an `{"items": [...]}` envelope
pub fn raw_list(value: Value) -> Option<Vec<RawSubmission>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut envelope) => match envelope.remove("items") {
            Some(Value::Array(items)) => items,
            _ => return None,
        },
        _ => return None,
    };
    Some(items.into_iter().map(RawSubmission::from_value).collect())
}

/// Body for `POST /submissions`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    /// Numeric ids go out as numbers
    pub problem_id: Value,
    pub code: String,
    pub language: String,
}

impl From<&SubmissionDraft> for SubmissionPayload {
    fn from(draft: &SubmissionDraft) -> Self {
        let id = draft.problem_id.as_str();
        Self {
            problem_id: id
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(id.to_string())),
            code: draft.code.clone(),
            language: draft.language.trim().to_string(),
        }
    }
}

/// Build a canonical submission from a raw record; never fails
pub fn normalize(raw: RawSubmission) -> Submission {
    let id = SubmissionId::from_json(&raw.id).unwrap_or_else(|| {
        tracing::warn!("Submission record without a usable id");
        SubmissionId::new("")
    });

    let problem_id = ProblemId::from_json(first(&raw.problem_id_camel, &raw.problem_id))
        .unwrap_or_else(|| {
            tracing::warn!(submission_id = %id, "Submission without a problem reference");
            ProblemId::new("")
        });

    let status = raw
        .status
        .as_str()
        .and_then(SubmissionStatus::from_code)
        .unwrap_or_else(|| {
            tracing::warn!(submission_id = %id, value = %raw.status, "Unknown submission status, using default");
            SubmissionStatus::default()
        });

    let results = raw.results.as_object();

    let created_at = timestamp(first(&raw.created_at_camel, &raw.created_at));
    let updated_at = timestamp(first(&raw.updated_at_camel, &raw.updated_at)).or(created_at);

    Submission {
        problem_id,
        code: first(&raw.code, &raw.content)
            .as_str()
            .unwrap_or_default()
            .to_string(),
        language: raw.language.as_str().unwrap_or_default().to_string(),
        status,
        runtime: first(&raw.runtime, field(results, "runtime")).as_f64(),
        memory: first(&raw.memory, field(results, "memory")).as_f64(),
        score: raw.score.as_f64(),
        feedback: first(&raw.feedback, field(results, "feedback"))
            .as_str()
            .map(str::to_string)
            .filter(|f| !f.trim().is_empty()),
        created_at: created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        updated_at: updated_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        id,
    }
}

fn field<'a>(object: Option<&'a Map<String, Value>>, key: &str) -> &'a Value {
    object.and_then(|o| o.get(key)).unwrap_or(&Value::Null)
}

fn first<'a>(preferred: &'a Value, fallback: &'a Value) -> &'a Value {
    if preferred.is_null() { fallback } else { preferred }
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn from(value: Value) -> Submission {
        normalize(RawSubmission::from_value(value))
    }

    #[test]
    fn test_client_dialect() {
        let submission = from(json!({
            "id": "s-1",
            "problemId": "7",
            "code": "print(1)",
            "language": "python",
            "status": "RUNNING",
            "runtime": 12.5,
            "createdAt": "2024-03-01T10:00:00Z"
        }));

        assert_eq!(submission.id.as_str(), "s-1");
        assert_eq!(submission.problem_id.as_str(), "7");
        assert_eq!(submission.code, "print(1)");
        assert_eq!(submission.status, SubmissionStatus::Running);
        assert_eq!(submission.runtime, Some(12.5));
        assert_eq!(
            submission.created_at,
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
        );
        assert_eq!(submission.updated_at, submission.created_at);
    }

    #[test]
    fn test_backend_dialect() {
        let submission = from(json!({
            "id": 42,
            "problem_id": 7,
            "user_id": 3,
            "content": "SELECT 1;",
            "language": "sql",
            "status": "rejected",
            "score": 40.0,
            "results": {"runtime": 8, "memory": 1024, "feedback": "2 of 5 tests passed"},
            "created_at": "2024-03-01T10:00:00.123456",
            "updated_at": null
        }));

        assert_eq!(submission.id.as_str(), "42");
        assert_eq!(submission.problem_id.as_str(), "7");
        assert_eq!(submission.code, "SELECT 1;");
        assert_eq!(submission.status, SubmissionStatus::WrongAnswer);
        assert_eq!(submission.score, Some(40.0));
        assert_eq!(submission.runtime, Some(8.0));
        assert_eq!(submission.memory, Some(1024.0));
        assert_eq!(submission.feedback.as_deref(), Some("2 of 5 tests passed"));
    }

    #[test]
    fn test_malformed_record_degrades() {
        let submission = from(json!({"id": 1, "status": 3, "code": ["x"]}));

        assert_eq!(submission.status, SubmissionStatus::Pending);
        assert!(submission.problem_id.is_empty());
        assert!(submission.code.is_empty());
        assert_eq!(submission.created_at, DateTime::<Utc>::UNIX_EPOCH);

        let empty = from(json!("not a record"));
        assert!(empty.id.is_empty());
    }

    #[test]
    fn test_raw_list_shapes() {
        assert_eq!(raw_list(json!([{"id": 1}, {"id": 2}])).unwrap().len(), 2);
        assert_eq!(raw_list(json!({"items": [{"id": 1}], "total": 1})).unwrap().len(), 1);
        assert!(raw_list(json!({"detail": "nope"})).is_none());
        assert!(raw_list(json!(null)).is_none());
    }

    #[test]
    fn test_payload_shape() {
        let draft = SubmissionDraft::new(ProblemId::new("7"), "print(1)", " python ");
        let body = serde_json::to_value(SubmissionPayload::from(&draft)).unwrap();
        assert_eq!(
            body,
            json!({"problemId": 7, "code": "print(1)", "language": "python"})
        );

        let draft = SubmissionDraft::new(ProblemId::new("two-sum"), "x", "rust");
        let body = serde_json::to_value(SubmissionPayload::from(&draft)).unwrap();
        assert_eq!(body["problemId"], "two-sum");
    }
}
