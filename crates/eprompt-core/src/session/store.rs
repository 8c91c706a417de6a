//! The Session Store: single source of truth for the authoring session.

use tracing::{debug, info};

use super::model::{EditableStage, Session, Stage};
use crate::error::{EpromptError, Result};
use crate::template::Template;
use crate::vault::{VaultItem, VaultMetaPatch};

/// Holds the active session and mediates every stage transition.
///
/// `active_stage` moves forward only through the `commit_*` operations and
/// vault loads. Moving backward is a user action (`set_active_stage`).
#[derive(Debug, Default)]
pub struct SessionStore {
    session: Session,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn epoch(&self) -> u64 {
        self.session.epoch
    }

    /// Starts a fresh session on `template`.
    ///
    /// Resets input, every generated field, the vault item and the stage.
    pub fn select_template(&mut self, template: Template) {
        info!(template_id = %template.id, "Selecting template");
        self.reset_with(Some(template));
    }

    /// Upserts one input field. No stage effect.
    pub fn set_input(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.session.input.insert(field.into(), value.into());
    }

    /// Commits a freshly generated prompt.
    ///
    /// Empty text is a no-op; callers validate required fields beforehand.
    pub fn commit_initial_prompt(&mut self, text: impl Into<String>, vault_item: Option<VaultItem>) {
        let text = text.into();
        if text.is_empty() {
            debug!("Ignoring empty initial prompt");
            return;
        }
        self.session.initial_prompt = Some(text);
        self.session.active_stage = Stage::InitialPrompt;
        if let Some(item) = vault_item {
            self.merge_vault_item(item);
        }
    }

    pub fn commit_refined_prompt(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            debug!("Ignoring empty refined prompt");
            return;
        }
        self.session.refined_prompt = Some(text);
        self.session.active_stage = Stage::RefinedPrompt;
    }

    pub fn commit_content(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            debug!("Ignoring empty content");
            return;
        }
        self.session.generated_content = Some(text);
        self.session.active_stage = Stage::Content;
    }

    /// Commits `text` into the field backing `stage`.
    pub fn commit(&mut self, stage: EditableStage, text: impl Into<String>) {
        match stage {
            EditableStage::InitialPrompt => self.commit_initial_prompt(text, None),
            EditableStage::RefinedPrompt => self.commit_refined_prompt(text),
            EditableStage::Content => self.commit_content(text),
        }
    }

    /// User-driven navigation. The tab-enablement rule lives with the caller.
    pub fn set_active_stage(&mut self, stage: Stage) {
        self.session.active_stage = stage;
    }

    /// Navigation that enforces the tab-enablement rule.
    pub fn navigate(&mut self, stage: Stage) -> Result<()> {
        if !self.session.stage_enabled(stage) {
            return Err(EpromptError::invalid_state(format!(
                "stage '{}' has no content yet",
                stage
            )));
        }
        self.set_active_stage(stage);
        Ok(())
    }

    /// Shallow-merges `patch` into the vault item, creating one if absent.
    pub fn attach_vault_meta(&mut self, patch: VaultMetaPatch) {
        self.session
            .vault_item
            .get_or_insert_with(VaultItem::default)
            .apply_patch(patch);
    }

    /// Replaces the vault item with the server's canonical copy.
    pub fn replace_vault_item(&mut self, item: VaultItem) {
        self.session.vault_item = Some(item);
    }

    fn merge_vault_item(&mut self, item: VaultItem) {
        match self.session.vault_item.as_mut() {
            Some(existing) => existing.merge(item),
            None => self.session.vault_item = Some(item),
        }
    }

    /// Loads a stored vault item on top of `template`.
    ///
    /// The stage becomes the deepest stage present in the item.
    pub fn load_vault_item(&mut self, template: Template, item: VaultItem) {
        info!(
            template_id = %template.id,
            vault_id = item.vault_id.as_deref().unwrap_or("-"),
            "Loading vault item"
        );
        self.reset_with(Some(template));
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());
        self.session.initial_prompt = non_empty(&item.initial_prompt);
        self.session.refined_prompt = non_empty(&item.refined_prompt);
        self.session.generated_content = non_empty(&item.generated_content);
        self.session.active_stage = item.deepest_stage();
        self.session.vault_item = Some(item);
    }

    /// Full reset to the initial state.
    pub fn clear_session(&mut self) {
        info!("Clearing session");
        self.reset_with(None);
    }

    /// Current session as a vault item, ready to be saved or exported.
    pub fn snapshot(&self) -> VaultItem {
        let mut item = self.session.vault_item.clone().unwrap_or_default();
        if let Some(template_id) = self.session.template_id() {
            item.template_id = Some(template_id.to_string());
        }
        item.initial_prompt = self.session.initial_prompt.clone();
        item.refined_prompt = self.session.refined_prompt.clone();
        item.generated_content = self.session.generated_content.clone();
        item
    }

    fn reset_with(&mut self, template: Option<Template>) {
        let epoch = self.session.epoch.wrapping_add(1);
        self.session = Session {
            template,
            epoch,
            ..Session::default()
        };
    }
}
