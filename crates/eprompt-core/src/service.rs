//! Remote prompt service contract.
//!
//! The generation, refinement, search and vault endpoints are an external
//! collaborator. Implementations live in the infrastructure layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;
use crate::refine::{RefinementKind, RefinementTool};
use crate::search::SearchResultSet;
use crate::template::Template;
use crate::vault::VaultItem;

/// Outcome of a prompt generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPrompt {
    pub prompt: String,
    #[serde(default)]
    pub vault_item: Option<VaultItem>,
}

/// Service for every remote operation the workbench needs.
#[async_trait]
pub trait PromptService: Send + Sync {
    /// Renders `template` with `input` into a prompt.
    ///
    /// `vault_hint` names the vault item the result belongs to; the service
    /// answers with the canonical item.
    async fn generate(
        &self,
        template: &Template,
        input: &HashMap<String, String>,
        vault_hint: Option<&VaultItem>,
    ) -> Result<GeneratedPrompt>;

    /// Applies `refinement_type` to `text`, returning the refined text.
    async fn refine(
        &self,
        kind: RefinementKind,
        text: &str,
        refinement_type: &str,
        vault_id: Option<&str>,
    ) -> Result<String>;

    /// Runs `prompt` against the model and returns the generated content.
    async fn generate_content(
        &self,
        prompt: &str,
        is_refined: bool,
        vault_id: Option<&str>,
    ) -> Result<String>;

    async fn search(&self, query: &str, limit: usize) -> Result<SearchResultSet>;

    async fn list_vault_items(&self, user_id: &str) -> Result<Vec<VaultItem>>;

    /// Pushes a full snapshot and returns the server's canonical copy.
    async fn save_vault_item(&self, item: &VaultItem) -> Result<VaultItem>;

    async fn delete_vault_item(&self, vault_id: &str) -> Result<()>;

    async fn list_templates(&self) -> Result<Vec<Template>>;

    async fn list_refinement_tools(&self, kind: RefinementKind) -> Result<Vec<RefinementTool>>;
}
