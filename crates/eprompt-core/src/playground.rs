//! The playground context: Session Store plus Editing Overlay.
//!
//! `Playground` is the explicit context object handed to handlers. Every
//! committed change goes through it so the edit buffers keep following the
//! store.

use serde::Serialize;

use crate::editing::{EditBuffer, EditingOverlay};
use crate::error::{EpromptError, Result};
use crate::session::{EditableStage, Session, SessionStore, Stage};
use crate::template::Template;
use crate::vault::{VaultItem, VaultMetaPatch};

#[derive(Debug, Default)]
pub struct Playground {
    store: SessionStore,
    overlay: EditingOverlay,
}

/// Read-only view of the playground for rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaygroundView {
    pub session: Session,
    pub overlay: EditingOverlay,
}

impl Playground {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Session {
        self.store.session()
    }

    pub fn overlay(&self) -> &EditingOverlay {
        &self.overlay
    }

    pub fn buffer(&self, stage: EditableStage) -> &EditBuffer {
        self.overlay.buffer(stage)
    }

    pub fn epoch(&self) -> u64 {
        self.store.epoch()
    }

    pub fn view(&self) -> PlaygroundView {
        PlaygroundView {
            session: self.store.session().clone(),
            overlay: self.overlay.clone(),
        }
    }

    // ---------------------------------------------------------------------
    // Session Store operations
    // ---------------------------------------------------------------------

    pub fn select_template(&mut self, template: Template) {
        self.store.select_template(template);
        self.overlay.reset(self.store.session());
    }

    pub fn set_input(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.store.set_input(field, value);
    }

    pub fn commit_initial_prompt(&mut self, text: impl Into<String>, vault_item: Option<VaultItem>) {
        self.store.commit_initial_prompt(text, vault_item);
        self.overlay.follow(self.store.session());
    }

    pub fn commit_refined_prompt(&mut self, text: impl Into<String>) {
        self.store.commit_refined_prompt(text);
        self.overlay.follow(self.store.session());
    }

    pub fn commit_content(&mut self, text: impl Into<String>) {
        self.store.commit_content(text);
        self.overlay.follow(self.store.session());
    }

    pub fn set_active_stage(&mut self, stage: Stage) {
        self.store.set_active_stage(stage);
    }

    pub fn navigate(&mut self, stage: Stage) -> Result<()> {
        self.store.navigate(stage)
    }

    pub fn attach_vault_meta(&mut self, patch: VaultMetaPatch) {
        self.store.attach_vault_meta(patch);
    }

    pub fn replace_vault_item(&mut self, item: VaultItem) {
        self.store.replace_vault_item(item);
    }

    pub fn load_vault_item(&mut self, template: Template, item: VaultItem) {
        self.store.load_vault_item(template, item);
        self.overlay.reset(self.store.session());
    }

    pub fn clear_session(&mut self) {
        self.store.clear_session();
        self.overlay.reset(self.store.session());
    }

    pub fn snapshot(&self) -> VaultItem {
        self.store.snapshot()
    }

    /// Form-stage validation: every required field must be non-blank.
    pub fn validate_form(&self) -> Result<()> {
        let session = self.store.session();
        if session.template.is_none() {
            return Err(EpromptError::invalid_state("no template selected"));
        }
        let missing = session.missing_required_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(EpromptError::validation(missing))
        }
    }

    // ---------------------------------------------------------------------
    // Editing Overlay operations
    // ---------------------------------------------------------------------

    pub fn enter_edit(&mut self, stage: EditableStage) {
        self.overlay.enter_edit(stage);
    }

    pub fn set_live_text(&mut self, stage: EditableStage, text: impl Into<String>) -> Result<()> {
        self.overlay.set_live_text(stage, text)
    }

    pub fn save_edit(&mut self, stage: EditableStage) -> Result<()> {
        self.overlay.save_edit(stage, &mut self.store)
    }

    pub fn discard_edit(&mut self, stage: EditableStage) {
        self.overlay.discard_edit(stage, self.store.session());
    }

    pub fn toggle_edit(&mut self, stage: EditableStage) {
        self.overlay.toggle_edit(stage, self.store.session());
    }

    /// Buffer text while editing, committed text otherwise.
    pub fn authoritative_text(&self, stage: EditableStage) -> Option<String> {
        self.overlay
            .authoritative_text(stage, self.store.session())
            .map(str::to_string)
    }

    /// Reconciles a remote refinement result.
    ///
    /// The text replaces both the committed field and the buffer underneath;
    /// the buffer's edit flag is left as it is.
    pub fn apply_refinement(&mut self, target: EditableStage, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.store.commit(target, text.clone());
        self.overlay.follow(self.store.session());
        self.overlay.replace_live_text(target, text);
    }
}
