use serde::Serialize;

/// How an operation that may race with session changes ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Completion {
    /// The result was committed to the session.
    Applied,
    /// Nothing to do (empty source text, invalid query, unresolved selection).
    Skipped,
    /// The response arrived for a session that no longer exists.
    Discarded,
}

impl Completion {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}
