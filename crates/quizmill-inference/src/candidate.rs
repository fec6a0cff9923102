//! Parsing of best-effort JSON provider output into a [`Candidate`].
//!
//! Completion models wrap their JSON in markdown fences or lead-in prose
//! often enough that a strict `from_str` on the raw response is useless.
//! The scrubbing here is deliberately forgiving; everything structural is
//! enforced by the validator afterwards.

use regex::Regex;

use quizmill_core::{Candidate, Error, Result};

/// Parse a raw completion response into a [`Candidate`].
///
/// Strips markdown code fences, slices the outermost JSON object out of any
/// surrounding prose, and deserializes it. Fails with
/// [`Error::Completion`] when no parseable object is present — the
/// provider returned malformed output, which the orchestrator treats as a
/// retryable attempt failure.
pub fn parse_candidate(raw: &str) -> Result<Candidate> {
    let text = strip_code_fences(raw);

    let start = text
        .find('{')
        .ok_or_else(|| Error::Completion("no JSON object in provider response".to_string()))?;
    let end = text
        .rfind('}')
        .filter(|&end| end > start)
        .ok_or_else(|| Error::Completion("unterminated JSON object in provider response".to_string()))?;

    serde_json::from_str(&text[start..=end])
        .map_err(|e| Error::Completion(format!("malformed candidate JSON: {}", e)))
}

/// Remove markdown code fences, keeping their contents.
fn strip_code_fences(raw: &str) -> String {
    let fence = Regex::new(r"```[a-zA-Z]*").unwrap();
    fence.replace_all(raw, "").into_owned()
}
