//! Data model for the question generation pipeline.
//!
//! `Candidate` is the ephemeral shape a completion provider returns for one
//! attempt; it is never persisted. `ValidatedQuestion` is a candidate that
//! passed the structural validator and is eligible for storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Vector type shared with pgvector.
pub use pgvector::Vector;

/// A correct-answer reference as the provider emits it: either a zero-based
/// index into the choice list or the answer text itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerRef {
    /// Zero-based index into `choices`.
    Index(i64),
    /// Literal answer text.
    Text(String),
}

/// Unvalidated question content returned by the completion provider for one
/// attempt. Discarded immediately if invalid or duplicate.
///
/// Field names follow the provider's JSON payload (`question`, `options`,
/// `correctAnswer`); snake_case spellings are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Question text.
    #[serde(rename = "question", alias = "text")]
    pub text: String,

    /// Ordered answer choices. At least 2 required; uniqueness is not.
    #[serde(rename = "options", alias = "choices")]
    pub choices: Vec<String>,

    /// Correct answer, as index or text. `None` fails validation.
    #[serde(rename = "correctAnswer", alias = "correct_answer", default)]
    pub correct_answer: Option<AnswerRef>,

    /// Optional explanation of the correct answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    /// Suggested answering time in seconds.
    #[serde(
        rename = "estimatedTimeSeconds",
        alias = "estimated_time_seconds",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_time_seconds: Option<i64>,
}

/// A candidate that passed structural validation.
///
/// The `id` is content-independent (UUIDv7 from the validator); an id
/// collision would be a correctness bug, never a duplicate-content signal.
/// The raw provider candidate is preserved under `metadata.candidate` for
/// forensic replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedQuestion {
    pub id: Uuid,
    pub topic: String,
    pub difficulty: String,
    pub text: String,
    pub choices: Vec<String>,
    /// Always the text of the correct choice; index answers are normalized
    /// away during validation.
    pub correct_answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub estimated_time_seconds: i32,
    /// Opaque bag, includes the raw provider candidate.
    pub metadata: JsonValue,
    pub created_at: DateTime<Utc>,
}

/// Why a candidate was judged a duplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateReason {
    /// Nearest stored vector scored at or above the similarity threshold.
    EmbeddingMatch,
    /// Normalized question text matched a recent record exactly.
    ExactText,
    /// Normalized choice list matched a recent record exactly.
    ChoiceSetMatch,
}

impl std::fmt::Display for DuplicateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DuplicateReason::EmbeddingMatch => "embedding_match",
            DuplicateReason::ExactText => "exact_text",
            DuplicateReason::ChoiceSetMatch => "choice_set_match",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of a duplicate check. Consumed synchronously by the
/// orchestrator, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityVerdict {
    pub is_duplicate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DuplicateReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl SimilarityVerdict {
    /// Verdict for a candidate with no match in the corpus.
    pub fn unique() -> Self {
        Self {
            is_duplicate: false,
            reason: None,
            match_id: None,
            score: None,
        }
    }

    /// Verdict for a matched candidate.
    pub fn duplicate(reason: DuplicateReason, match_id: Uuid, score: f32) -> Self {
        Self {
            is_duplicate: true,
            reason: Some(reason),
            match_id: Some(match_id),
            score: Some(score),
        }
    }
}

/// One nearest-neighbour hit from the stored corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarHit {
    pub question_id: Uuid,
    /// Cosine similarity to the query vector, higher is closer.
    pub score: f32,
}

/// Append-only audit record of one generation attempt, regardless of
/// outcome. Never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptLog {
    pub id: Uuid,
    pub prompt: String,
    /// Request parameters: topic, difficulty, requester.
    pub params: JsonValue,
    pub model: String,
    /// Raw provider response, when one was received.
    pub response: Option<String>,
    pub success: bool,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for appending a new attempt-log row.
#[derive(Debug, Clone)]
pub struct NewAttemptLog {
    pub prompt: String,
    pub params: JsonValue,
    pub model: String,
    pub response: Option<String>,
    pub success: bool,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_candidate_deserializes_provider_keys() {
        let raw = json!({
            "question": "What is 2+2?",
            "options": ["1", "2", "4", "5"],
            "correctAnswer": "4"
        });

        let candidate: Candidate = serde_json::from_value(raw).unwrap();
        assert_eq!(candidate.text, "What is 2+2?");
        assert_eq!(candidate.choices.len(), 4);
        assert_eq!(
            candidate.correct_answer,
            Some(AnswerRef::Text("4".to_string()))
        );
        assert!(candidate.explanation.is_none());
        assert!(candidate.estimated_time_seconds.is_none());
    }

    #[test]
    fn test_candidate_accepts_numeric_answer() {
        let raw = json!({
            "question": "Pick one",
            "options": ["a", "b"],
            "correctAnswer": 1
        });

        let candidate: Candidate = serde_json::from_value(raw).unwrap();
        assert_eq!(candidate.correct_answer, Some(AnswerRef::Index(1)));
    }

    #[test]
    fn test_candidate_accepts_snake_case_aliases() {
        let raw = json!({
            "text": "Pick one",
            "choices": ["a", "b"],
            "correct_answer": "a",
            "estimated_time_seconds": 30
        });

        let candidate: Candidate = serde_json::from_value(raw).unwrap();
        assert_eq!(candidate.text, "Pick one");
        assert_eq!(candidate.estimated_time_seconds, Some(30));
    }

    #[test]
    fn test_candidate_missing_answer_is_none() {
        let raw = json!({
            "question": "Pick one",
            "options": ["a", "b"]
        });

        let candidate: Candidate = serde_json::from_value(raw).unwrap();
        assert!(candidate.correct_answer.is_none());
    }

    #[test]
    fn test_candidate_roundtrip_preserves_provider_keys() {
        let candidate = Candidate {
            text: "Q".to_string(),
            choices: vec!["a".into(), "b".into()],
            correct_answer: Some(AnswerRef::Index(0)),
            explanation: Some("because".to_string()),
            estimated_time_seconds: Some(45),
        };

        let value = serde_json::to_value(&candidate).unwrap();
        assert!(value.get("question").is_some());
        assert!(value.get("options").is_some());
        assert!(value.get("correctAnswer").is_some());
        assert!(value.get("estimatedTimeSeconds").is_some());

        let back: Candidate = serde_json::from_value(value).unwrap();
        assert_eq!(back, candidate);
    }

    #[test]
    fn test_duplicate_reason_display() {
        assert_eq!(DuplicateReason::EmbeddingMatch.to_string(), "embedding_match");
        assert_eq!(DuplicateReason::ExactText.to_string(), "exact_text");
        assert_eq!(DuplicateReason::ChoiceSetMatch.to_string(), "choice_set_match");
    }

    #[test]
    fn test_duplicate_reason_serializes_snake_case() {
        let json = serde_json::to_string(&DuplicateReason::ExactText).unwrap();
        assert_eq!(json, "\"exact_text\"");
    }

    #[test]
    fn test_verdict_unique() {
        let verdict = SimilarityVerdict::unique();
        assert!(!verdict.is_duplicate);
        assert!(verdict.reason.is_none());
        assert!(verdict.match_id.is_none());
        assert!(verdict.score.is_none());
    }

    #[test]
    fn test_verdict_duplicate() {
        let id = Uuid::new_v4();
        let verdict = SimilarityVerdict::duplicate(DuplicateReason::EmbeddingMatch, id, 0.91);
        assert!(verdict.is_duplicate);
        assert_eq!(verdict.reason, Some(DuplicateReason::EmbeddingMatch));
        assert_eq!(verdict.match_id, Some(id));
        assert_eq!(verdict.score, Some(0.91));
    }

    #[test]
    fn test_validated_question_serialization() {
        let q = ValidatedQuestion {
            id: Uuid::new_v4(),
            topic: "Algebra".to_string(),
            difficulty: "beginner".to_string(),
            text: "What is 2+2?".to_string(),
            choices: vec!["3".into(), "4".into()],
            correct_answer: "4".to_string(),
            explanation: None,
            estimated_time_seconds: 60,
            metadata: json!({"candidate": {"question": "What is 2+2?"}}),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&q).unwrap();
        let back: ValidatedQuestion = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, q.id);
        assert_eq!(back.correct_answer, "4");
        assert_eq!(back.metadata["candidate"]["question"], "What is 2+2?");
    }
}
