//! Vault item models.

use serde::{Deserialize, Serialize};

use crate::session::Stage;

/// Persisted identity and artifacts of a named session.
///
/// `vault_id` is assigned by the server on the first successful generation;
/// the hint sent before that carries only name, description and template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refined_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl VaultItem {
    /// Creates the naming hint sent along with the first generation.
    pub fn named(
        template_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            template_id: Some(template_id.into()),
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Deepest stage with stored content (Content > RefinedPrompt > InitialPrompt > Form).
    pub fn deepest_stage(&self) -> Stage {
        if non_empty(&self.generated_content) {
            Stage::Content
        } else if non_empty(&self.refined_prompt) {
            Stage::RefinedPrompt
        } else if non_empty(&self.initial_prompt) {
            Stage::InitialPrompt
        } else {
            Stage::Form
        }
    }

    pub fn status(&self) -> VaultStatus {
        match self.deepest_stage() {
            Stage::Content => VaultStatus::Complete,
            Stage::RefinedPrompt => VaultStatus::Refined,
            Stage::InitialPrompt => VaultStatus::Generated,
            Stage::Form => VaultStatus::Draft,
        }
    }

    /// Shallow-merges `other` into `self`: fields present in `other` win.
    pub fn merge(&mut self, other: VaultItem) {
        if other.vault_id.is_some() {
            self.vault_id = other.vault_id;
        }
        if other.template_id.is_some() {
            self.template_id = other.template_id;
        }
        if other.user_id.is_some() {
            self.user_id = other.user_id;
        }
        if !other.name.is_empty() {
            self.name = other.name;
        }
        if !other.description.is_empty() {
            self.description = other.description;
        }
        if other.initial_prompt.is_some() {
            self.initial_prompt = other.initial_prompt;
        }
        if other.refined_prompt.is_some() {
            self.refined_prompt = other.refined_prompt;
        }
        if other.generated_content.is_some() {
            self.generated_content = other.generated_content;
        }
        if other.created_at.is_some() {
            self.created_at = other.created_at;
        }
        if other.updated_at.is_some() {
            self.updated_at = other.updated_at;
        }
    }

    /// Applies an in-place metadata edit.
    pub fn apply_patch(&mut self, patch: VaultMetaPatch) {
        if let Some(vault_id) = patch.vault_id {
            self.vault_id = Some(vault_id);
        }
        if let Some(template_id) = patch.template_id {
            self.template_id = Some(template_id);
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Partial vault metadata used for rename/description edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultMetaPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl VaultMetaPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Progress label shown in the vault browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum VaultStatus {
    Complete,
    Refined,
    Generated,
    Draft,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deepest_stage_prefers_content() {
        let item = VaultItem {
            initial_prompt: Some("p".into()),
            generated_content: Some("c".into()),
            ..VaultItem::default()
        };
        assert_eq!(item.deepest_stage(), Stage::Content);
        assert_eq!(item.status(), VaultStatus::Complete);
    }

    #[test]
    fn test_deepest_stage_ignores_empty_strings() {
        let item = VaultItem {
            initial_prompt: Some("p".into()),
            refined_prompt: Some(String::new()),
            ..VaultItem::default()
        };
        assert_eq!(item.deepest_stage(), Stage::InitialPrompt);
        assert_eq!(VaultItem::default().status(), VaultStatus::Draft);
    }

    #[test]
    fn test_merge_keeps_existing_when_absent() {
        let mut item = VaultItem::named("t1", "Cats", "About cats");
        item.merge(VaultItem {
            vault_id: Some("v1".into()),
            updated_at: Some("2024-01-01T00:00:00Z".into()),
            ..VaultItem::default()
        });

        assert_eq!(item.vault_id.as_deref(), Some("v1"));
        assert_eq!(item.name, "Cats");
        assert_eq!(item.template_id.as_deref(), Some("t1"));
    }

    #[test]
    fn test_apply_patch() {
        let mut item = VaultItem::named("t1", "Cats", "About cats");
        item.apply_patch(VaultMetaPatch::rename("Dogs"));
        assert_eq!(item.name, "Dogs");
        assert_eq!(item.description, "About cats");
    }
}
