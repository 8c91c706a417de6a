//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: the authoring session aggregate (`Session`) and its stages
//! - `store`: the Session Store enforcing stage transitions (`SessionStore`)
//! - `busy`: the single busy flag gating generate/refine operations
//!
//! # Usage
//!
//! ```ignore
//! use eprompt_core::session::{Session, SessionStore, Stage, EditableStage};
//! ```

mod busy;
mod model;
mod store;

pub use busy::{BusyFlag, BusyGuard};
pub use model::{EditableStage, Session, Stage};
pub use store::SessionStore;
