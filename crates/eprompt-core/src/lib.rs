//! Domain layer of the ePrompt workbench.
//!
//! Holds the authoring session state machine, the edit buffers layered over
//! it, search query rules and the contract of the remote prompt service.

pub mod config;
pub mod editing;
pub mod error;
pub mod export;
pub mod notification;
pub mod playground;
pub mod refine;
pub mod search;
pub mod service;
pub mod session;
pub mod template;
pub mod vault;

// Re-export common types
pub use error::{EpromptError, Result};
pub use playground::{Playground, PlaygroundView};
pub use service::PromptService;
