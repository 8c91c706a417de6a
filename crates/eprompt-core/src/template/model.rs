//! Template domain model.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A prompt template as served by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub required_fields: Vec<String>,
    #[serde(default)]
    pub optional_fields: Vec<String>,
    /// Template body with `{{field}}` placeholders. Rendering happens remotely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

impl Template {
    /// Returns the required fields whose value in `input` is missing or blank.
    ///
    /// Order follows `required_fields`.
    pub fn missing_required_fields(&self, input: &HashMap<String, String>) -> Vec<String> {
        self.required_fields
            .iter()
            .filter(|field| {
                input
                    .get(field.as_str())
                    .map(|value| value.trim().is_empty())
                    .unwrap_or(true)
            })
            .cloned()
            .collect()
    }

    /// Whether `field` belongs to this template's question set.
    pub fn has_field(&self, field: &str) -> bool {
        self.required_fields.iter().any(|f| f == field)
            || self.optional_fields.iter().any(|f| f == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> Template {
        Template {
            id: "global-code-review".to_string(),
            name: "Review Code".to_string(),
            description: String::new(),
            role: "Senior Software Engineer".to_string(),
            tags: vec![],
            required_fields: vec!["language".to_string(), "code".to_string()],
            optional_fields: vec!["focus".to_string()],
            template: None,
        }
    }

    #[test]
    fn test_missing_required_fields_treats_blank_as_missing() {
        let mut input = HashMap::new();
        input.insert("language".to_string(), "   ".to_string());

        let missing = template().missing_required_fields(&input);
        assert_eq!(missing, vec!["language".to_string(), "code".to_string()]);
    }

    #[test]
    fn test_missing_required_fields_ignores_optional() {
        let mut input = HashMap::new();
        input.insert("language".to_string(), "Rust".to_string());
        input.insert("code".to_string(), "fn main() {}".to_string());

        assert!(template().missing_required_fields(&input).is_empty());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "id": "t1",
            "name": "Unit Tests",
            "requiredFields": ["language"],
            "optionalFields": ["framework"]
        }"#;
        let parsed: Template = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.required_fields, vec!["language"]);
        assert!(parsed.has_field("framework"));
        assert!(!parsed.has_field("tone"));
    }
}
