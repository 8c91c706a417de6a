use super::GlobalArgs;
use anyhow::Result;
use clap::Subcommand;
use eprompt_infrastructure::SettingsService;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective settings
    Show,
    /// Set the vault owner id
    SetUser { user_id: String },
    /// Set the prompt service base URL
    SetUrl { url: String },
    /// Set the number of hits per search category
    SetSearchLimit { limit: usize },
    /// Set where exports are written
    SetExportDir { dir: PathBuf },
}

pub fn run(global: &GlobalArgs, action: ConfigAction) -> Result<()> {
    let paths = global.paths();
    let service = SettingsService::new(&paths)?;

    let settings = match action {
        ConfigAction::Show => {
            let mut settings = service.get()?;
            if let Some(url) = &global.api_url {
                settings.api_base_url = url.clone();
            }
            settings
        }
        ConfigAction::SetUser { user_id } => service.update(|s| s.user_id = Some(user_id))?,
        ConfigAction::SetUrl { url } => service.update(|s| s.api_base_url = url)?,
        ConfigAction::SetSearchLimit { limit } => {
            if limit == 0 {
                anyhow::bail!("Search limit must be at least 1");
            }
            service.update(|s| s.search_limit = limit)?
        }
        ConfigAction::SetExportDir { dir } => service.update(|s| s.export_dir = Some(dir))?,
    };

    if global.json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
    } else {
        println!("# {}", paths.settings_file()?.display());
        print!("{}", toml::to_string_pretty(&settings)?);
    }
    Ok(())
}
