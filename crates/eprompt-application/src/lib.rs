//! Application layer: use cases that drive the playground against the remote
//! prompt service.
//!
//! Every component shares one [`AppContext`]. The playground lock is never
//! held across a remote call; responses that arrive after the session was
//! reset are dropped by comparing session epochs.

pub mod catalog;
pub mod context;
pub mod outcome;
pub mod playground_usecase;
pub mod refinement;
pub mod search;
pub mod vault_browser;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::TemplateCatalogService;
pub use context::AppContext;
pub use outcome::Completion;
pub use playground_usecase::PlaygroundUseCase;
pub use refinement::RefinementOrchestrator;
pub use search::SearchAggregator;
pub use vault_browser::{VaultBrowser, VaultEntry};
