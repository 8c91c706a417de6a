//! Vault domain module.
//!
//! A vault item is the remotely persisted, named snapshot of a session.

mod model;

pub use model::{VaultItem, VaultMetaPatch, VaultStatus};
