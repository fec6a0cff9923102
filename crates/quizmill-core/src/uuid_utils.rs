//! UUID v7 utilities for time-ordered identifiers.
//!
//! Question and attempt-log ids are UUIDv7: content-independent (an id
//! collision is a correctness bug, never a duplicate-content signal) and
//! time-ordered, which suits the `created_at`-ordered recent-window queries
//! in the fingerprint duplicate check.

use uuid::Uuid;

/// Generate a new UUIDv7 identifier.
///
/// UUIDv7 embeds a Unix timestamp (milliseconds) in the first 48 bits,
/// providing natural time-ordering.
///
/// # Example
///
/// ```
/// use quizmill_core::uuid_utils::new_v7;
///
/// let id = new_v7();
/// // IDs generated later will be lexicographically greater
/// ```
#[inline]
pub fn new_v7() -> Uuid {
    Uuid::now_v7()
}
