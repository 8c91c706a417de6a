//! Vault browser: the user's saved sessions.

use crate::context::AppContext;
use anyhow::Result;
use eprompt_core::EpromptError;
use eprompt_core::vault::{VaultItem, VaultStatus};
use serde::Serialize;
use tracing::info;

/// A listed vault item with its progress label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VaultEntry {
    pub item: VaultItem,
    pub status: VaultStatus,
}

impl From<VaultItem> for VaultEntry {
    fn from(item: VaultItem) -> Self {
        let status = item.status();
        Self { item, status }
    }
}

pub struct VaultBrowser {
    ctx: AppContext,
}

impl VaultBrowser {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<VaultEntry>> {
        let items = self
            .ctx
            .service
            .list_vault_items(user_id)
            .await
            .map_err(|e| self.ctx.report("list_vault_items", e))?;
        info!(user_id, count = items.len(), "Vault items listed");
        Ok(items.into_iter().map(VaultEntry::from).collect())
    }

    /// Deletes an item; the playground is cleared when it was showing it.
    pub async fn delete(&self, vault_id: &str) -> Result<()> {
        self.ctx
            .service
            .delete_vault_item(vault_id)
            .await
            .map_err(|e| self.ctx.report("delete_vault_item", e))?;

        let mut playground = self.ctx.playground.write().await;
        if playground.session().vault_id() == Some(vault_id) {
            playground.clear_session();
        }
        self.ctx.notifier.success("Deleted from vault");
        Ok(())
    }

    /// Opens a stored item in the playground on top of its template.
    pub async fn open(&self, item: VaultItem) -> Result<()> {
        let template_id = item
            .template_id
            .clone()
            .ok_or_else(|| EpromptError::invalid_state("vault item has no template"))?;
        let template = self
            .ctx
            .catalog
            .read()
            .await
            .find(&template_id)
            .cloned()
            .ok_or_else(|| {
                self.ctx
                    .report("open_vault_item", EpromptError::reference("template", &template_id))
            })?;

        self.ctx.playground.write().await.load_vault_item(template, item);
        Ok(())
    }
}
