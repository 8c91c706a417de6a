//! Export of session artifacts.
//!
//! Only the text rendering lives here; writing files is an infrastructure
//! concern and PDF/DOCX layout is handled by an external renderer.

mod model;

pub use model::{ExportContent, ExportFormat, ExportOptions, RenderedExport};
