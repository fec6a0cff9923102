//! Structural validation of provider candidates.
//!
//! This is the single gatekeeper between "anything the provider returned"
//! and "a record that can ever be persisted". Rules are applied in order;
//! each failure maps to a distinct [`SchemaError`] variant.

use chrono::Utc;
use serde_json::json;

use crate::defaults;
use crate::error::SchemaError;
use crate::models::{AnswerRef, Candidate, ValidatedQuestion};
use crate::uuid_utils::new_v7;

/// Validate a provider candidate into a [`ValidatedQuestion`].
///
/// Rules, in order:
/// 1. `text` must be non-empty after trimming.
/// 2. `choices` must contain at least 2 entries.
/// 3. `correct_answer` must be present. A numeric answer is a zero-based
///    index into `choices` (rejected if out of range) and is normalized to
///    the choice text. A string answer must exactly match one choice after
///    trimming both sides.
/// 4. `estimated_time_seconds`, if present, must be positive; if absent it
///    defaults to 60.
///
/// Validation is idempotent over the normalized fields: feeding the output
/// back through produces the same text, choices, answer, and time. Apart
/// from stamping a fresh content-independent id and timestamp, it has no
/// side effects.
pub fn validate(
    candidate: &Candidate,
    topic: &str,
    difficulty: &str,
) -> Result<ValidatedQuestion, SchemaError> {
    let text = candidate.text.trim();
    if text.is_empty() {
        return Err(SchemaError::EmptyText);
    }

    if candidate.choices.len() < 2 {
        return Err(SchemaError::TooFewChoices(candidate.choices.len()));
    }

    let correct_answer = match &candidate.correct_answer {
        None => return Err(SchemaError::MissingAnswer),
        Some(AnswerRef::Index(i)) => {
            let idx = usize::try_from(*i).map_err(|_| SchemaError::AnswerNotInChoices)?;
            candidate
                .choices
                .get(idx)
                .cloned()
                .ok_or(SchemaError::AnswerNotInChoices)?
        }
        Some(AnswerRef::Text(s)) => candidate
            .choices
            .iter()
            .find(|choice| choice.trim() == s.trim())
            .cloned()
            .ok_or(SchemaError::AnswerNotInChoices)?,
    };

    let estimated_time_seconds = match candidate.estimated_time_seconds {
        None => defaults::ESTIMATED_TIME_SECS,
        Some(t) if t > 0 => i32::try_from(t).map_err(|_| SchemaError::InvalidEstimatedTime(t))?,
        Some(t) => return Err(SchemaError::InvalidEstimatedTime(t)),
    };

    Ok(ValidatedQuestion {
        id: new_v7(),
        topic: topic.to_string(),
        difficulty: difficulty.to_string(),
        text: text.to_string(),
        choices: candidate.choices.clone(),
        correct_answer,
        explanation: candidate.explanation.clone(),
        estimated_time_seconds,
        metadata: json!({ "candidate": candidate }),
        created_at: Utc::now(),
    })
}
