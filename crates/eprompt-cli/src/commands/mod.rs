pub mod config;
pub mod generate;
pub mod search;
pub mod templates;
pub mod tools;
pub mod vault;

use anyhow::{Context, Result};
use eprompt_application::AppContext;
use eprompt_core::PlaygroundView;
use eprompt_core::config::Settings;
use eprompt_core::notification::{Notification, NotificationLevel, Notifier};
use eprompt_infrastructure::{EpromptPaths, HttpPromptService, SettingsService};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Flags shared by every subcommand.
pub struct GlobalArgs {
    pub api_url: Option<String>,
    pub config_dir: Option<PathBuf>,
    pub json: bool,
}

impl GlobalArgs {
    pub fn paths(&self) -> EpromptPaths {
        EpromptPaths::new(self.config_dir.clone())
    }
}

/// Everything a command needs: effective settings and the wired context.
pub struct Workbench {
    pub settings: Settings,
    pub paths: EpromptPaths,
    pub ctx: AppContext,
    pub json: bool,
    notifications: Mutex<UnboundedReceiver<Notification>>,
}

impl Workbench {
    pub fn open(global: &GlobalArgs) -> Result<Self> {
        let paths = global.paths();
        let mut settings = SettingsService::new(&paths)?
            .get()
            .context("Failed to load settings")?;
        if let Some(url) = &global.api_url {
            settings.api_base_url = url.clone();
        }

        let service = HttpPromptService::from_settings(&settings)?;
        tracing::debug!(base_url = service.base_url(), "Prompt service configured");

        let (tx, rx) = mpsc::unbounded_channel();
        Ok(Self {
            ctx: AppContext::new(Arc::new(service), Notifier::new(tx)),
            settings,
            paths,
            json: global.json,
            notifications: Mutex::new(rx),
        })
    }

    /// Prints queued notifications to stderr.
    pub fn flush_notifications(&self) {
        let Ok(mut rx) = self.notifications.lock() else {
            return;
        };
        while let Ok(notification) = rx.try_recv() {
            let marker = match notification.level {
                NotificationLevel::Success => "✓",
                NotificationLevel::Info => "ℹ",
                NotificationLevel::Error => "✗",
            };
            eprintln!("{} {}", marker, notification.message);
        }
    }

    pub fn user_id(&self, explicit: Option<String>) -> Result<String> {
        explicit
            .or_else(|| self.settings.user_id.clone())
            .context("No user id: pass --user or run `eprompt config set-user <id>`")
    }

    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Renders the committed session the way the playground tabs show it.
pub fn print_session(view: &PlaygroundView) {
    let session = &view.session;
    if let Some(template) = &session.template {
        println!("Template: {} ({})", template.name, template.id);
    }
    if let Some(item) = &session.vault_item {
        println!(
            "Vault:    {} [{}]",
            item.name,
            item.vault_id.as_deref().unwrap_or("unsaved")
        );
    }
    println!("Stage:    {}", session.active_stage);

    for (title, text) in [
        ("Initial prompt", &session.initial_prompt),
        ("Refined prompt", &session.refined_prompt),
        ("Content", &session.generated_content),
    ] {
        if let Some(text) = text {
            println!("\n--- {} ---\n{}", title, text);
        }
    }
}
