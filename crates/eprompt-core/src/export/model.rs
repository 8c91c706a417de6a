use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Session;

pub const DEFAULT_BASE_FILENAME: &str = "eprompt-export";

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Txt,
    Pdf,
    Docx,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    pub format: ExportFormat,
    #[serde(default)]
    pub enable_markdown: bool,
    #[serde(default = "default_base_filename")]
    pub base_filename: String,
}

fn default_base_filename() -> String {
    DEFAULT_BASE_FILENAME.to_string()
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            enable_markdown: false,
            base_filename: default_base_filename(),
        }
    }
}

/// The artifacts selected for export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refined_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_content: Option<String>,
}

/// Rendered document plus the file name it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedExport {
    pub filename: String,
    pub body: String,
}

impl ExportContent {
    pub fn from_session(session: &Session) -> Self {
        Self {
            basic_prompt: session.initial_prompt.clone(),
            refined_prompt: session.refined_prompt.clone(),
            generated_content: session.generated_content.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections().is_empty()
    }

    fn sections(&self) -> Vec<(&'static str, &'static str, &str)> {
        [
            ("Basic Prompt", "BASIC PROMPT", self.basic_prompt.as_deref()),
            ("Refined Prompt", "REFINED PROMPT", self.refined_prompt.as_deref()),
            (
                "Generated Content",
                "GENERATED CONTENT",
                self.generated_content.as_deref(),
            ),
        ]
        .into_iter()
        .filter_map(|(title, banner, body)| {
            body.filter(|b| !b.is_empty()).map(|b| (title, banner, b))
        })
        .collect()
    }

    /// Renders the selected sections as one document.
    pub fn render(&self, options: &ExportOptions, now: DateTime<Utc>) -> RenderedExport {
        let body = self
            .sections()
            .into_iter()
            .map(|(title, banner, text)| {
                if options.enable_markdown {
                    format!("# {title}\n\n{text}\n\n")
                } else {
                    format!("=== {banner} ===\n\n{text}\n\n")
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        let suffix = if options.enable_markdown { "-formatted" } else { "" };
        let timestamp = now.format("%Y-%m-%dT%H-%M-%S");
        let filename = format!(
            "{}{}-{}.{}",
            options.base_filename, suffix, timestamp, options.format
        );

        RenderedExport { filename, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn content() -> ExportContent {
        ExportContent {
            basic_prompt: Some("Write about cats".to_string()),
            refined_prompt: None,
            generated_content: Some("Cats purr.".to_string()),
        }
    }

    #[test]
    fn test_render_plain_text() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();
        let rendered = content().render(&ExportOptions::default(), now);

        assert_eq!(
            rendered.body,
            "=== BASIC PROMPT ===\n\nWrite about cats\n\n\n=== GENERATED CONTENT ===\n\nCats purr.\n\n"
        );
        assert_eq!(rendered.filename, "eprompt-export-2024-03-01T12-30-05.txt");
    }

    #[test]
    fn test_render_markdown_marks_filename() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let options = ExportOptions {
            format: ExportFormat::Pdf,
            enable_markdown: true,
            ..ExportOptions::default()
        };
        let rendered = content().render(&options, now);

        assert!(rendered.body.starts_with("# Basic Prompt\n\n"));
        assert!(rendered.filename.ends_with("-formatted-2024-03-01T00-00-00.pdf"));
    }

    #[test]
    fn test_empty_content() {
        assert!(ExportContent::default().is_empty());
        assert!(!content().is_empty());
    }
}
