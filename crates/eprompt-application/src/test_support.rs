//! In-memory `PromptService` used by the use case tests.

use async_trait::async_trait;
use eprompt_core::refine::{RefinementKind, RefinementTool};
use eprompt_core::search::SearchResultSet;
use eprompt_core::service::GeneratedPrompt;
use eprompt_core::template::Template;
use eprompt_core::vault::VaultItem;
use eprompt_core::{EpromptError, PromptService, Result};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tokio::sync::Notify;

#[derive(Default)]
struct MockState {
    calls: Vec<String>,
    templates: Vec<Template>,
    search_results: HashMap<String, SearchResultSet>,
    vault_items: Vec<VaultItem>,
    refine_result: Option<String>,
    failure: Option<EpromptError>,
    keyed_failures: HashMap<String, EpromptError>,
    generated_prompt: Option<String>,
    gated: HashSet<String>,
}

/// Records every call and answers from canned data.
///
/// `generate` answers `Write about <topic>` with vault id `v1`. Gated
/// operations signal `entered` and then wait for `release`.
#[derive(Default)]
pub struct MockPromptService {
    state: Mutex<MockState>,
    pub entered: Notify,
    pub release: Notify,
}

impl MockPromptService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_templates(self, templates: Vec<Template>) -> Self {
        self.state.lock().unwrap().templates = templates;
        self
    }

    pub fn with_search_results(self, query: &str, results: SearchResultSet) -> Self {
        self.state
            .lock()
            .unwrap()
            .search_results
            .insert(query.to_string(), results);
        self
    }

    pub fn with_vault_items(self, items: Vec<VaultItem>) -> Self {
        self.state.lock().unwrap().vault_items = items;
        self
    }

    pub fn with_refine_result(self, text: &str) -> Self {
        self.state.lock().unwrap().refine_result = Some(text.to_string());
        self
    }

    /// `generate` answers `prompt` instead of the topic sentence.
    pub fn with_generated_prompt(self, prompt: &str) -> Self {
        self.state.lock().unwrap().generated_prompt = Some(prompt.to_string());
        self
    }

    /// Every later call fails with `err`.
    pub fn fail_with(&self, err: EpromptError) {
        self.state.lock().unwrap().failure = Some(err);
    }

    /// Only calls to `key` fail with `err`.
    pub fn fail_on(&self, key: &str, err: EpromptError) {
        self.state
            .lock()
            .unwrap()
            .keyed_failures
            .insert(key.to_string(), err);
    }

    /// Blocks calls to `key` (an operation name, or `search:<query>`).
    pub fn gate(&self, key: &str) {
        self.state.lock().unwrap().gated.insert(key.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    async fn enter(&self, operation: &str, gate_key: &str) -> Result<()> {
        let (gated, failure) = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(operation.to_string());
            let failure = state
                .keyed_failures
                .get(gate_key)
                .cloned()
                .or_else(|| state.failure.clone());
            (state.gated.contains(gate_key), failure)
        };
        if gated {
            self.entered.notify_one();
            self.release.notified().await;
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PromptService for MockPromptService {
    async fn generate(
        &self,
        _template: &Template,
        input: &HashMap<String, String>,
        vault_hint: Option<&VaultItem>,
    ) -> Result<GeneratedPrompt> {
        self.enter("generate", "generate").await?;
        let topic = input.get("topic").cloned().unwrap_or_default();
        let canned = self.state.lock().unwrap().generated_prompt.clone();
        let mut item = vault_hint.cloned().unwrap_or_default();
        item.vault_id.get_or_insert_with(|| "v1".to_string());
        Ok(GeneratedPrompt {
            prompt: canned.unwrap_or_else(|| format!("Write about {}", topic)),
            vault_item: Some(item),
        })
    }

    async fn refine(
        &self,
        kind: RefinementKind,
        text: &str,
        refinement_type: &str,
        _vault_id: Option<&str>,
    ) -> Result<String> {
        self.enter("refine", "refine").await?;
        let canned = self.state.lock().unwrap().refine_result.clone();
        Ok(canned.unwrap_or_else(|| format!("{} [{} {}]", text, kind, refinement_type)))
    }

    async fn generate_content(
        &self,
        prompt: &str,
        is_refined: bool,
        _vault_id: Option<&str>,
    ) -> Result<String> {
        self.enter("generate_content", "generate_content").await?;
        let source = if is_refined { "refined" } else { "initial" };
        Ok(format!("Content for '{}' ({})", prompt, source))
    }

    async fn search(&self, query: &str, _limit: usize) -> Result<SearchResultSet> {
        self.enter("search", &format!("search:{}", query)).await?;
        let results = self.state.lock().unwrap().search_results.get(query).cloned();
        Ok(results.unwrap_or_default())
    }

    async fn list_vault_items(&self, _user_id: &str) -> Result<Vec<VaultItem>> {
        self.enter("list_vault_items", "list_vault_items").await?;
        Ok(self.state.lock().unwrap().vault_items.clone())
    }

    async fn save_vault_item(&self, item: &VaultItem) -> Result<VaultItem> {
        self.enter("save_vault_item", "save_vault_item").await?;
        let mut saved = item.clone();
        saved.updated_at = Some("2024-01-01T00:00:00Z".to_string());
        Ok(saved)
    }

    async fn delete_vault_item(&self, vault_id: &str) -> Result<()> {
        self.enter("delete_vault_item", "delete_vault_item").await?;
        self.state
            .lock()
            .unwrap()
            .vault_items
            .retain(|item| item.vault_id.as_deref() != Some(vault_id));
        Ok(())
    }

    async fn list_templates(&self) -> Result<Vec<Template>> {
        self.enter("list_templates", "list_templates").await?;
        Ok(self.state.lock().unwrap().templates.clone())
    }

    async fn list_refinement_tools(&self, kind: RefinementKind) -> Result<Vec<RefinementTool>> {
        self.enter("list_refinement_tools", "list_refinement_tools").await?;
        let id = match kind {
            RefinementKind::Prompt => "shorter",
            RefinementKind::Content => "formal",
        };
        Ok(vec![RefinementTool {
            id: id.to_string(),
            name: id.to_string(),
            icon: String::new(),
            color: String::new(),
            description: String::new(),
        }])
    }
}

pub fn writer_template() -> Template {
    Template {
        id: "t1".to_string(),
        name: "Writer".to_string(),
        description: "Writes about a topic".to_string(),
        role: "Writer".to_string(),
        tags: vec![],
        required_fields: vec!["topic".to_string()],
        optional_fields: vec!["tone".to_string()],
        template: None,
    }
}
