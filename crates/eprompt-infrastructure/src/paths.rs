//! Unified path management for eprompt files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/eprompt/           # Config directory
//! └── settings.toml            # User settings
//!
//! ~/.local/share/eprompt/      # Data directory
//! └── exports/                 # Default export destination
//! ```

use std::path::PathBuf;

const APP_DIR_NAME: &str = "eprompt";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for eprompt_core::EpromptError {
    fn from(err: PathError) -> Self {
        eprompt_core::EpromptError::config(err.to_string())
    }
}

/// Resolves eprompt directories, optionally under an override root.
///
/// The override is used by tests and by `--config-dir`.
#[derive(Debug, Clone, Default)]
pub struct EpromptPaths {
    base_override: Option<PathBuf>,
}

impl EpromptPaths {
    pub fn new(base_override: Option<PathBuf>) -> Self {
        Self { base_override }
    }

    /// Returns the configuration directory (e.g. `~/.config/eprompt/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_override {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the data directory (e.g. `~/.local/share/eprompt/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_override {
            return Ok(base.join("data"));
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn settings_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("settings.toml"))
    }

    pub fn exports_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("exports"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_root() {
        let paths = EpromptPaths::new(Some(PathBuf::from("/tmp/eprompt-test")));
        assert_eq!(
            paths.settings_file().unwrap(),
            PathBuf::from("/tmp/eprompt-test/settings.toml")
        );
        assert_eq!(
            paths.exports_dir().unwrap(),
            PathBuf::from("/tmp/eprompt-test/data/exports")
        );
    }
}
