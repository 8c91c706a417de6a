//! Editing overlay: optimistic edit buffers over committed session text.

mod buffer;
mod overlay;

pub use buffer::EditBuffer;
pub use overlay::EditingOverlay;
