//! Search query parsing.
//!
//! Queries may carry reserved prefix tokens (`template:`, `vault:`,
//! `initial-prompt:`, `refined-prompt:`, `content:`). They are hints for the
//! remote service and stay in the query string that is sent.

use regex::Regex;
use std::sync::LazyLock;

use super::model::SearchCategory;

static PREFIX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(template|vault|initial-prompt|refined-prompt|content):")
        .expect("prefix pattern is valid")
});

/// A query split into its prefix hints and free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    categories: Vec<SearchCategory>,
    text: String,
}

impl SearchQuery {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let mut categories = Vec::new();
        for captures in PREFIX_PATTERN.captures_iter(&raw) {
            if let Ok(category) = captures[1].parse::<SearchCategory>() {
                if !categories.contains(&category) {
                    categories.push(category);
                }
            }
        }
        let text = PREFIX_PATTERN.replace_all(&raw, "").trim().to_string();
        Self {
            raw,
            categories,
            text,
        }
    }

    /// The query exactly as typed; this is what the service receives.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Categories hinted by prefix tokens, in order of first appearance.
    pub fn categories(&self) -> &[SearchCategory] {
        &self.categories
    }

    /// Free text left after stripping every prefix token.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_valid(&self) -> bool {
        !self.text.is_empty()
    }
}

/// Valid iff something other than prefix tokens remains after trimming.
pub fn is_valid_query(query: &str) -> bool {
    SearchQuery::parse(query).is_valid()
}
