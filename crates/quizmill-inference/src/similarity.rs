//! Pure vector similarity math.

use tracing::warn;

/// Cosine similarity between two vectors, in `[-1, 1]`.
///
/// Operates over the shorter of the two lengths. A length mismatch is a
/// yellow flag (the providers disagree on dimension) and is logged at WARN,
/// but never an error: callers treat the score as advisory and the
/// duplicate-check path must not fail on degraded input. Empty inputs and
/// zero vectors yield 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    if a.len() != b.len() {
        warn!(
            subsystem = "inference",
            component = "similarity",
            len_a = a.len(),
            len_b = b.len(),
            "Cosine over mismatched dimensions, truncating to shorter"
        );
    }

    let n = a.len().min(b.len());
    let a = &a[..n];
    let b = &b[..n];

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
