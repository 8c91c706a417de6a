//! Writes rendered exports to disk.

use chrono::Utc;
use eprompt_core::export::{ExportContent, ExportFormat, ExportOptions};
use eprompt_core::{EpromptError, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Renders `content` and writes it into `dir`, returning the written path.
///
/// Only plain text is produced here; PDF and DOCX layout belong to an
/// external renderer.
pub async fn write_export(
    dir: &Path,
    content: &ExportContent,
    options: &ExportOptions,
) -> Result<PathBuf> {
    if options.format != ExportFormat::Txt {
        return Err(EpromptError::Unsupported(format!(
            "{} export requires an external renderer",
            options.format
        )));
    }
    if content.is_empty() {
        return Err(EpromptError::invalid_state("nothing to export"));
    }

    let rendered = content.render(options, Utc::now());
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(&rendered.filename);
    tokio::fs::write(&path, rendered.body.as_bytes()).await?;

    info!(path = %path.display(), "Export written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn content() -> ExportContent {
        ExportContent {
            basic_prompt: Some("Write about cats".to_string()),
            ..ExportContent::default()
        }
    }

    #[tokio::test]
    async fn test_writes_text_export() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("exports");

        let path = write_export(&dir, &content(), &ExportOptions::default())
            .await
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("=== BASIC PROMPT ==="));
        assert!(
            path.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("eprompt-export-")
        );
    }

    #[tokio::test]
    async fn test_pdf_is_unsupported() {
        let temp_dir = TempDir::new().unwrap();
        let options = ExportOptions {
            format: ExportFormat::Pdf,
            ..ExportOptions::default()
        };
        let err = write_export(temp_dir.path(), &content(), &options)
            .await
            .unwrap_err();
        assert!(matches!(err, EpromptError::Unsupported(_)));
    }

    #[tokio::test]
    async fn test_empty_content_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let err = write_export(
            temp_dir.path(),
            &ExportContent::default(),
            &ExportOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, EpromptError::InvalidState(_)));
    }
}
