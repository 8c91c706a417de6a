//! Faceted search across templates and vault items.
//!
//! - `query`: prefix-token handling and query validation
//! - `model`: categorized result sets and selection targets

pub mod model;
pub mod query;

pub use model::{SearchCategory, SearchEntity, SearchResultSet, SearchSelection};
pub use query::{SearchQuery, is_valid_query};
