//! Refinement orchestrator.

use crate::context::AppContext;
use crate::outcome::Completion;
use anyhow::Result;
use eprompt_core::refine::{RefinementKind, RefinementRoute, RefinementTool};
use eprompt_core::session::Stage;
use tracing::{debug, info, warn};

/// Runs one remote refinement for the stage the user is looking at.
///
/// The source is the live buffer while editing and the committed text
/// otherwise. A successful result is committed and also written under the
/// target buffer, whose edit flag is left alone. Failures leave the session
/// untouched.
pub struct RefinementOrchestrator {
    ctx: AppContext,
}

impl RefinementOrchestrator {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    pub async fn refine(&self, stage: Stage, refinement_type: &str) -> Result<Completion> {
        let route = RefinementRoute::for_stage(stage).map_err(|e| self.ctx.report("refine", e))?;

        let (source, vault_id, epoch) = {
            let playground = self.ctx.playground.read().await;
            (
                playground.authoritative_text(route.source),
                playground.session().vault_id().map(str::to_string),
                playground.epoch(),
            )
        };
        let Some(source) = source.filter(|s| !s.is_empty()) else {
            debug!(%stage, "Nothing to refine");
            return Ok(Completion::Skipped);
        };

        let _guard = self
            .ctx
            .busy
            .try_acquire()
            .map_err(|e| self.ctx.report("refine", e))?;

        info!(%stage, kind = %route.kind, refinement_type, "Refining");
        let refined = self
            .ctx
            .service
            .refine(route.kind, &source, refinement_type, vault_id.as_deref())
            .await
            .map_err(|e| self.ctx.report("refine", e))?;

        let mut playground = self.ctx.playground.write().await;
        if !AppContext::is_current(&playground, epoch) {
            warn!(operation = "refine", "Discarding response for a replaced session");
            return Ok(Completion::Discarded);
        }
        if refined.is_empty() {
            warn!(%stage, "Service returned an empty refinement");
            return Ok(Completion::Skipped);
        }
        playground.apply_refinement(route.target, refined);
        self.ctx.notifier.success(format!("Applied '{}'", refinement_type));
        Ok(Completion::Applied)
    }

    /// Refinements offered for prompts or content.
    pub async fn tools(&self, kind: RefinementKind) -> Result<Vec<RefinementTool>> {
        self.ctx
            .service
            .list_refinement_tools(kind)
            .await
            .map_err(|e| self.ctx.report("list_refinement_tools", e))
    }
}
