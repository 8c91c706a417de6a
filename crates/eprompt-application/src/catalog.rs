//! Template catalog loading.

use crate::context::AppContext;
use anyhow::Result;
use eprompt_core::EpromptError;
use eprompt_core::template::Template;
use tracing::info;

/// Loads the remote template catalog into the shared cache.
pub struct TemplateCatalogService {
    ctx: AppContext,
}

impl TemplateCatalogService {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    /// Fetches every template and replaces the cache wholesale.
    ///
    /// On failure the previous catalog is kept.
    pub async fn reload(&self) -> Result<usize> {
        let templates = self
            .ctx
            .service
            .list_templates()
            .await
            .map_err(|e| self.ctx.report("list_templates", e))?;

        let count = templates.len();
        self.ctx.catalog.write().await.replace(templates);
        info!(count, "Template catalog loaded");
        Ok(count)
    }

    /// Loads the catalog unless it already holds templates.
    pub async fn ensure_loaded(&self) -> Result<()> {
        if self.ctx.catalog.read().await.is_empty() {
            self.reload().await?;
        }
        Ok(())
    }

    pub async fn templates(&self) -> Vec<Template> {
        self.ctx.catalog.read().await.templates().to_vec()
    }

    pub async fn find(&self, template_id: &str) -> Result<Template> {
        self.ctx
            .catalog
            .read()
            .await
            .find(template_id)
            .cloned()
            .ok_or_else(|| EpromptError::reference("template", template_id).into())
    }
}
