//! Shared state handed to every use case.

use eprompt_core::notification::Notifier;
use eprompt_core::session::BusyFlag;
use eprompt_core::template::TemplateCatalog;
use eprompt_core::{EpromptError, Playground, PromptService};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::error;

/// The explicit context object of one workbench instance.
#[derive(Clone)]
pub struct AppContext {
    pub playground: Arc<RwLock<Playground>>,
    pub catalog: Arc<RwLock<TemplateCatalog>>,
    pub busy: BusyFlag,
    pub service: Arc<dyn PromptService>,
    pub notifier: Notifier,
}

impl AppContext {
    pub fn new(service: Arc<dyn PromptService>, notifier: Notifier) -> Self {
        Self {
            playground: Arc::new(RwLock::new(Playground::new())),
            catalog: Arc::new(RwLock::new(TemplateCatalog::default())),
            busy: BusyFlag::new(),
            service,
            notifier,
        }
    }

    /// Logs `err`, raises an error notification and hands it back for `?`.
    pub(crate) fn report(&self, operation: &str, err: EpromptError) -> anyhow::Error {
        error!(operation, error = %err, "Operation failed");
        self.notifier.error(err.to_string());
        err.into()
    }

    /// Whether the playground is still on the session that started at `epoch`.
    pub(crate) fn is_current(playground: &Playground, epoch: u64) -> bool {
        playground.epoch() == epoch
    }
}
