//! Settings service.
//!
//! Loads `settings.toml` once and caches it. Environment variables override
//! file values; command-line flags are applied by the caller on top.

use crate::paths::EpromptPaths;
use crate::storage::AtomicTomlFile;
use eprompt_core::Result;
use eprompt_core::config::Settings;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

pub const ENV_API_URL: &str = "EPROMPT_API_URL";
pub const ENV_USER_ID: &str = "EPROMPT_USER_ID";

#[derive(Clone)]
pub struct SettingsService {
    file: Arc<AtomicTomlFile<Settings>>,
    cache: Arc<RwLock<Option<Settings>>>,
}

impl SettingsService {
    pub fn new(paths: &EpromptPaths) -> Result<Self> {
        Ok(Self {
            file: Arc::new(AtomicTomlFile::new(paths.settings_file()?)),
            cache: Arc::new(RwLock::new(None)),
        })
    }

    /// Returns the effective settings, loading the file on first access.
    pub fn get(&self) -> Result<Settings> {
        if let Some(cached) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(cached.clone());
        }

        let mut settings = match self.file.load()? {
            Some(settings) => settings,
            None => {
                info!(path = %self.file.path().display(), "No settings file, using defaults");
                Settings::default()
            }
        };
        apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = Some(settings.clone());
        Ok(settings)
    }

    /// Applies `f` to the stored settings and persists the result.
    pub fn update<F>(&self, f: F) -> Result<Settings>
    where
        F: FnOnce(&mut Settings),
    {
        let saved = self.file.update(Settings::default(), |settings| {
            f(settings);
            Ok(())
        })?;
        debug!("Settings saved");
        self.invalidate_cache();
        Ok(saved)
    }

    /// Forces a reload on next access.
    pub fn invalidate_cache(&self) {
        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

fn apply_env_overrides<F>(settings: &mut Settings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
        settings.api_base_url = url;
    }
    if let Some(user_id) = lookup(ENV_USER_ID).filter(|v| !v.trim().is_empty()) {
        settings.user_id = Some(user_id);
    }
}
