//! Session aggregate and stage types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{EpromptError, Result};
use crate::template::Template;
use crate::vault::VaultItem;

/// The furthest point reached in the generate → refine pipeline.
///
/// Variants are ordered, so `Stage::Content > Stage::Form`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Stage {
    #[default]
    Form,
    InitialPrompt,
    RefinedPrompt,
    Content,
}

/// A stage backed by generated text that the user can edit and refine.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EditableStage {
    InitialPrompt,
    RefinedPrompt,
    Content,
}

impl From<EditableStage> for Stage {
    fn from(stage: EditableStage) -> Self {
        match stage {
            EditableStage::InitialPrompt => Stage::InitialPrompt,
            EditableStage::RefinedPrompt => Stage::RefinedPrompt,
            EditableStage::Content => Stage::Content,
        }
    }
}

impl TryFrom<Stage> for EditableStage {
    type Error = EpromptError;

    fn try_from(stage: Stage) -> Result<Self> {
        match stage {
            Stage::Form => Err(EpromptError::invalid_state(
                "the form stage has no editable text",
            )),
            Stage::InitialPrompt => Ok(EditableStage::InitialPrompt),
            Stage::RefinedPrompt => Ok(EditableStage::RefinedPrompt),
            Stage::Content => Ok(EditableStage::Content),
        }
    }
}

/// The single in-memory authoring context.
///
/// Only [`SessionStore`](super::SessionStore) mutates a session; everything
/// else reads it by reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub template: Option<Template>,
    pub input: HashMap<String, String>,
    pub initial_prompt: Option<String>,
    pub refined_prompt: Option<String>,
    pub generated_content: Option<String>,
    pub active_stage: Stage,
    pub vault_item: Option<VaultItem>,
    /// Identity of this session; changes on every reset so late remote
    /// responses can be recognised and dropped.
    pub epoch: u64,
}

impl Session {
    /// Committed text backing an editable stage.
    pub fn field(&self, stage: EditableStage) -> Option<&str> {
        match stage {
            EditableStage::InitialPrompt => self.initial_prompt.as_deref(),
            EditableStage::RefinedPrompt => self.refined_prompt.as_deref(),
            EditableStage::Content => self.generated_content.as_deref(),
        }
    }

    /// Tab-enablement rule: the form is always reachable, later stages only
    /// once their backing field is non-null.
    pub fn stage_enabled(&self, stage: Stage) -> bool {
        match EditableStage::try_from(stage) {
            Ok(editable) => self.field(editable).is_some(),
            Err(_) => true,
        }
    }

    pub fn template_id(&self) -> Option<&str> {
        self.template.as_ref().map(|t| t.id.as_str())
    }

    pub fn vault_id(&self) -> Option<&str> {
        self.vault_item
            .as_ref()
            .and_then(|item| item.vault_id.as_deref())
    }

    /// Required template fields that are still blank.
    pub fn missing_required_fields(&self) -> Vec<String> {
        self.template
            .as_ref()
            .map(|t| t.missing_required_fields(&self.input))
            .unwrap_or_default()
    }
}
