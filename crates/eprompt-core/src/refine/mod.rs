//! Refinement domain models.
//!
//! A refinement is a named transformation ("shorter", "formal", ...) applied
//! remotely to prompt or content text.

mod model;

pub use model::{RefinementKind, RefinementRoute, RefinementTool};
