use serde::{Deserialize, Serialize};

use crate::error::{EpromptError, Result};
use crate::session::{EditableStage, Stage};

/// Which remote refinement endpoint handles the text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RefinementKind {
    Prompt,
    Content,
}

/// Source and target of a refinement started from a given stage.
///
/// Prompt refinement always lands in the refined prompt: refining the initial
/// prompt promotes it, refining the refined prompt iterates in place. Content
/// refinement rewrites the content itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefinementRoute {
    pub kind: RefinementKind,
    pub source: EditableStage,
    pub target: EditableStage,
}

impl RefinementRoute {
    pub fn for_stage(stage: Stage) -> Result<Self> {
        let route = match stage {
            Stage::Form => {
                return Err(EpromptError::invalid_state(
                    "nothing to refine on the form stage",
                ));
            }
            Stage::InitialPrompt => Self {
                kind: RefinementKind::Prompt,
                source: EditableStage::InitialPrompt,
                target: EditableStage::RefinedPrompt,
            },
            Stage::RefinedPrompt => Self {
                kind: RefinementKind::Prompt,
                source: EditableStage::RefinedPrompt,
                target: EditableStage::RefinedPrompt,
            },
            Stage::Content => Self {
                kind: RefinementKind::Content,
                source: EditableStage::Content,
                target: EditableStage::Content,
            },
        };
        Ok(route)
    }
}

/// A refinement offered by the service for one mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementTool {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: String,
}
