use super::{Workbench, print_session};
use anyhow::{Context, Result};
use clap::Subcommand;
use eprompt_application::{TemplateCatalogService, VaultBrowser};

#[derive(Subcommand)]
pub enum VaultAction {
    /// List saved items with their progress
    List {
        /// Owner id; defaults to `user_id` from settings
        #[arg(long)]
        user: Option<String>,
    },
    /// Show one saved item as the playground would load it
    Show {
        vault_id: String,
        #[arg(long)]
        user: Option<String>,
    },
    /// Delete a saved item
    Delete { vault_id: String },
}

pub async fn run(workbench: &Workbench, action: VaultAction) -> Result<()> {
    let browser = VaultBrowser::new(workbench.ctx.clone());

    match action {
        VaultAction::List { user } => {
            let entries = browser.list(&workbench.user_id(user)?).await?;
            if workbench.json {
                return workbench.print_json(&entries);
            }
            if entries.is_empty() {
                println!("The vault is empty.");
            }
            for entry in &entries {
                println!(
                    "{:<26} {:<10} {}",
                    entry.item.vault_id.as_deref().unwrap_or("-"),
                    entry.status,
                    entry.item.name
                );
            }
        }
        VaultAction::Show { vault_id, user } => {
            let entries = browser.list(&workbench.user_id(user)?).await?;
            let entry = entries
                .into_iter()
                .find(|e| e.item.vault_id.as_deref() == Some(vault_id.as_str()))
                .with_context(|| format!("Vault item '{}' not found", vault_id))?;

            TemplateCatalogService::new(workbench.ctx.clone())
                .ensure_loaded()
                .await?;
            browser.open(entry.item).await?;

            let view = workbench.ctx.playground.read().await.view();
            if workbench.json {
                return workbench.print_json(&view);
            }
            print_session(&view);
        }
        VaultAction::Delete { vault_id } => {
            browser.delete(&vault_id).await?;
        }
    }
    Ok(())
}
