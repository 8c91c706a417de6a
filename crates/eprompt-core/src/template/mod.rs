//! Template domain module.
//!
//! Templates describe the question set a session answers. They are owned by
//! the remote catalog and held read-only by the session.

mod catalog;
mod model;

pub use catalog::TemplateCatalog;
pub use model::Template;
