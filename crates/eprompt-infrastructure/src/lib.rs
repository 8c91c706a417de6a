//! Infrastructure layer: filesystem paths, settings persistence, export
//! output and the REST client for the remote prompt service.

mod dto;
pub mod export_writer;
pub mod http_prompt_service;
pub mod paths;
pub mod settings_service;
pub mod storage;

pub use export_writer::write_export;
pub use http_prompt_service::HttpPromptService;
pub use paths::{EpromptPaths, PathError};
pub use settings_service::SettingsService;
