//! Playground use case.
//!
//! Drives the form, prompt generation, content generation and the vault
//! operations of the active session. Refinement lives in
//! [`RefinementOrchestrator`](crate::RefinementOrchestrator).

use crate::context::AppContext;
use crate::outcome::Completion;
use anyhow::Result;
use eprompt_core::export::ExportContent;
use eprompt_core::session::{EditableStage, Stage};
use eprompt_core::vault::{VaultItem, VaultMetaPatch};
use eprompt_core::{EpromptError, PlaygroundView};
use tracing::{info, warn};

pub struct PlaygroundUseCase {
    ctx: AppContext,
}

impl PlaygroundUseCase {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    pub async fn view(&self) -> PlaygroundView {
        self.ctx.playground.read().await.view()
    }

    /// Starts a fresh session on a catalog template.
    pub async fn select_template(&self, template_id: &str) -> Result<()> {
        let template = self
            .ctx
            .catalog
            .read()
            .await
            .find(template_id)
            .cloned()
            .ok_or_else(|| EpromptError::reference("template", template_id))?;

        self.ctx.playground.write().await.select_template(template);
        Ok(())
    }

    pub async fn set_input(&self, field: &str, value: &str) {
        self.ctx.playground.write().await.set_input(field, value);
    }

    /// Renders the form into the initial prompt.
    ///
    /// The first generation of a session names its vault item through
    /// `vault_meta`, which must carry a name and a description. Later
    /// generations reuse the attached item.
    pub async fn generate_prompt(&self, vault_meta: Option<VaultMetaPatch>) -> Result<Completion> {
        let (template, input, hint, epoch) = {
            let playground = self.ctx.playground.read().await;
            playground
                .validate_form()
                .map_err(|e| self.ctx.report("generate", e))?;

            let session = playground.session();
            let template = session
                .template
                .clone()
                .ok_or_else(|| EpromptError::invalid_state("no template selected"))?;
            let hint = vault_hint(session.vault_item.clone(), &template.id, vault_meta)
                .map_err(|e| self.ctx.report("generate", e))?;
            (template, session.input.clone(), hint, playground.epoch())
        };

        let _guard = self
            .ctx
            .busy
            .try_acquire()
            .map_err(|e| self.ctx.report("generate", e))?;

        info!(template_id = %template.id, "Generating prompt");
        let generated = self
            .ctx
            .service
            .generate(&template, &input, Some(&hint))
            .await
            .map_err(|e| self.ctx.report("generate", e))?;

        let mut playground = self.ctx.playground.write().await;
        if !AppContext::is_current(&playground, epoch) {
            warn!(operation = "generate", "Discarding response for a replaced session");
            return Ok(Completion::Discarded);
        }
        if generated.prompt.is_empty() {
            warn!(template_id = %template.id, "Service returned an empty prompt");
            return Ok(Completion::Skipped);
        }

        let mut item = hint;
        if let Some(canonical) = generated.vault_item {
            item.merge(canonical);
        }
        playground.commit_initial_prompt(generated.prompt, Some(item));
        self.ctx.notifier.success("Prompt generated");
        Ok(Completion::Applied)
    }

    /// Runs the refined prompt (when asked for and present) or the initial
    /// prompt against the model.
    pub async fn generate_content(&self, from_refined: bool) -> Result<Completion> {
        let (prompt, is_refined, vault_id, epoch) = {
            let playground = self.ctx.playground.read().await;
            let session = playground.session();
            let refined = session
                .refined_prompt
                .clone()
                .filter(|p| from_refined && !p.is_empty());
            let (prompt, is_refined) = match refined {
                Some(prompt) => (prompt, true),
                None => match session.initial_prompt.clone().filter(|p| !p.is_empty()) {
                    Some(prompt) => (prompt, false),
                    None => {
                        return Err(self.ctx.report(
                            "generate_content",
                            EpromptError::invalid_state("generate a prompt first"),
                        ));
                    }
                },
            };
            (
                prompt,
                is_refined,
                session.vault_id().map(str::to_string),
                playground.epoch(),
            )
        };

        let _guard = self
            .ctx
            .busy
            .try_acquire()
            .map_err(|e| self.ctx.report("generate_content", e))?;

        info!(is_refined, "Generating content");
        let content = self
            .ctx
            .service
            .generate_content(&prompt, is_refined, vault_id.as_deref())
            .await
            .map_err(|e| self.ctx.report("generate_content", e))?;

        let mut playground = self.ctx.playground.write().await;
        if !AppContext::is_current(&playground, epoch) {
            warn!(operation = "generate_content", "Discarding response for a replaced session");
            return Ok(Completion::Discarded);
        }
        if content.is_empty() {
            warn!("Service returned empty content");
            return Ok(Completion::Skipped);
        }
        playground.commit_content(content);
        self.ctx.notifier.success("Content generated");
        Ok(Completion::Applied)
    }

    /// Pushes the session snapshot and adopts the server's canonical copy.
    pub async fn save_vault(&self) -> Result<Completion> {
        let (snapshot, epoch) = {
            let playground = self.ctx.playground.read().await;
            if playground.session().vault_item.is_none() {
                return Err(self.ctx.report(
                    "save_vault_item",
                    EpromptError::invalid_state("no vault item to save"),
                ));
            }
            (playground.snapshot(), playground.epoch())
        };

        let saved = self
            .ctx
            .service
            .save_vault_item(&snapshot)
            .await
            .map_err(|e| self.ctx.report("save_vault_item", e))?;

        let mut playground = self.ctx.playground.write().await;
        if !AppContext::is_current(&playground, epoch) {
            warn!(operation = "save_vault_item", "Discarding response for a replaced session");
            return Ok(Completion::Discarded);
        }
        playground.replace_vault_item(saved);
        self.ctx.notifier.success("Saved to vault");
        Ok(Completion::Applied)
    }

    /// Edits the vault name or description locally; `save_vault` pushes it.
    pub async fn rename_vault(&self, name: Option<String>, description: Option<String>) -> Result<()> {
        if name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(self.ctx.report("rename_vault", EpromptError::validation(["name"])));
        }
        let patch = VaultMetaPatch {
            name,
            description,
            ..VaultMetaPatch::default()
        };
        self.ctx.playground.write().await.attach_vault_meta(patch);
        Ok(())
    }

    /// Deletes the session's vault item remotely and clears the session.
    pub async fn delete_vault(&self) -> Result<()> {
        let vault_id = self
            .ctx
            .playground
            .read()
            .await
            .session()
            .vault_id()
            .map(str::to_string)
            .ok_or_else(|| {
                self.ctx.report(
                    "delete_vault_item",
                    EpromptError::invalid_state("session has no saved vault item"),
                )
            })?;

        self.ctx
            .service
            .delete_vault_item(&vault_id)
            .await
            .map_err(|e| self.ctx.report("delete_vault_item", e))?;

        let mut playground = self.ctx.playground.write().await;
        if playground.session().vault_id() == Some(vault_id.as_str()) {
            playground.clear_session();
        }
        info!(%vault_id, "Vault item deleted");
        self.ctx.notifier.success("Deleted from vault");
        Ok(())
    }

    pub async fn navigate(&self, stage: Stage) -> Result<()> {
        Ok(self.ctx.playground.write().await.navigate(stage)?)
    }

    pub async fn clear_session(&self) {
        self.ctx.playground.write().await.clear_session();
    }

    pub async fn enter_edit(&self, stage: EditableStage) {
        self.ctx.playground.write().await.enter_edit(stage);
    }

    pub async fn set_live_text(&self, stage: EditableStage, text: &str) -> Result<()> {
        Ok(self.ctx.playground.write().await.set_live_text(stage, text)?)
    }

    pub async fn save_edit(&self, stage: EditableStage) -> Result<()> {
        let result = self.ctx.playground.write().await.save_edit(stage);
        result.map_err(|e| self.ctx.report("save_edit", e))
    }

    pub async fn discard_edit(&self, stage: EditableStage) {
        self.ctx.playground.write().await.discard_edit(stage);
    }

    pub async fn toggle_edit(&self, stage: EditableStage) {
        self.ctx.playground.write().await.toggle_edit(stage);
    }

    /// The committed artifacts, ready for export.
    pub async fn export_content(&self) -> ExportContent {
        ExportContent::from_session(self.ctx.playground.read().await.session())
    }
}

/// Vault item sent along with a generation.
fn vault_hint(
    current: Option<VaultItem>,
    template_id: &str,
    meta: Option<VaultMetaPatch>,
) -> eprompt_core::Result<VaultItem> {
    match (current, meta) {
        (Some(mut item), meta) => {
            if let Some(meta) = meta {
                item.apply_patch(meta);
            }
            Ok(item)
        }
        (None, meta) => {
            let meta = meta.unwrap_or_default();
            let filled = |value: &Option<String>| {
                value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
            };
            match (filled(&meta.name), filled(&meta.description)) {
                (Some(name), Some(description)) => {
                    Ok(VaultItem::named(template_id, name, description))
                }
                (name, description) => Err(EpromptError::validation(
                    [("name", name.is_none()), ("description", description.is_none())]
                        .into_iter()
                        .filter(|(_, missing)| *missing)
                        .map(|(field, _)| field),
                )),
            }
        }
    }
}
