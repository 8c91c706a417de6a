//! Wire shapes of the remote prompt service.
//!
//! Field names follow the service's camelCase JSON. Domain types that already
//! match the wire format (`Template`, `VaultItem`, `SearchResultSet`) are used
//! directly.

use eprompt_core::refine::RefinementTool;
use eprompt_core::template::Template;
use eprompt_core::vault::VaultItem;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateRequest<'a> {
    pub template: &'a Template,
    pub context: &'a HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault_item: Option<&'a VaultItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub vault_item: Option<VaultItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefinePromptRequest<'a> {
    pub prompt: &'a str,
    pub refinement_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefinePromptResponse {
    #[serde(default)]
    pub refined_prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefineContentRequest<'a> {
    pub content: &'a str,
    pub refinement_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefineContentResponse {
    #[serde(default)]
    pub refined_content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest<'a> {
    pub text: &'a str,
    pub is_refined_prompt: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub result: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest<'a> {
    pub query: &'a str,
    pub limit: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SaveVaultResponse {
    pub vault_item: Option<VaultItem>,
}

/// Types and tools offered for one refinement mode.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RefineModeTools {
    #[serde(default)]
    #[allow(dead_code)]
    pub types: Vec<String>,
    #[serde(default)]
    pub tools: Vec<RefinementTool>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RefineTypesResponse {
    #[serde(default)]
    pub prompt: RefineModeTools,
    #[serde(default)]
    pub content: RefineModeTools,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}
