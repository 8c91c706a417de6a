use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{GlobalArgs, Workbench};

#[derive(Parser)]
#[command(name = "eprompt")]
#[command(about = "ePrompt - template-driven prompt authoring workbench", long_about = None)]
struct Cli {
    /// Base URL of the prompt service (overrides settings and EPROMPT_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory holding settings.toml
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Default log level when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the template catalog
    Templates,
    /// Fill a template, generate a prompt and optionally refine, run and save it
    Generate(commands::generate::GenerateArgs),
    /// List the refinements offered for prompts or content
    Tools {
        #[arg(default_value = "prompt")]
        kind: String,
    },
    /// Search templates and vault items
    Search(commands::search::SearchArgs),
    /// Browse saved vault items
    Vault {
        #[command(subcommand)]
        action: commands::vault::VaultAction,
    },
    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let global = GlobalArgs {
        api_url: cli.api_url,
        config_dir: cli.config_dir,
        json: cli.json,
    };

    let command = match cli.command {
        Commands::Config { action } => return commands::config::run(&global, action),
        command => command,
    };

    let workbench = Workbench::open(&global)?;
    let result = match command {
        Commands::Templates => commands::templates::run(&workbench).await,
        Commands::Generate(args) => commands::generate::run(&workbench, args).await,
        Commands::Tools { kind } => commands::tools::run(&workbench, &kind).await,
        Commands::Search(args) => commands::search::run(&workbench, args).await,
        Commands::Vault { action } => commands::vault::run(&workbench, action).await,
        Commands::Config { .. } => Ok(()),
    };
    workbench.flush_notifications();
    result
}
