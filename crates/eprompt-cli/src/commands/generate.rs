//! The playground pipeline in one invocation.

use super::{Workbench, print_session};
use anyhow::{Context, Result, bail};
use clap::Args;
use eprompt_application::{
    Completion, PlaygroundUseCase, RefinementOrchestrator, TemplateCatalogService,
};
use eprompt_core::export::{ExportFormat, ExportOptions};
use eprompt_core::session::Stage;
use eprompt_core::vault::VaultMetaPatch;
use eprompt_infrastructure::write_export;

#[derive(Args)]
pub struct GenerateArgs {
    /// Template id from `eprompt templates`
    #[arg(short, long)]
    template: String,

    /// Form input as key=value, repeatable
    #[arg(short, long = "input", value_parser = parse_key_value)]
    inputs: Vec<(String, String)>,

    /// Vault item name
    #[arg(long)]
    name: String,

    /// Vault item description
    #[arg(long)]
    description: String,

    /// Refinement to apply to the prompt, repeatable; runs in order
    #[arg(long = "refine")]
    refinements: Vec<String>,

    /// Generate content from the latest prompt
    #[arg(long)]
    content: bool,

    /// Refinement to apply to the generated content, repeatable
    #[arg(long = "refine-content", requires = "content")]
    content_refinements: Vec<String>,

    /// Push the final session to the vault
    #[arg(long)]
    save: bool,

    /// Export format (txt, pdf, docx)
    #[arg(long)]
    export: Option<ExportFormat>,

    /// Use markdown headings in the export
    #[arg(long, requires = "export")]
    markdown: bool,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

pub async fn run(workbench: &Workbench, args: GenerateArgs) -> Result<()> {
    TemplateCatalogService::new(workbench.ctx.clone())
        .ensure_loaded()
        .await?;

    let playground = PlaygroundUseCase::new(workbench.ctx.clone());
    let refiner = RefinementOrchestrator::new(workbench.ctx.clone());

    playground.select_template(&args.template).await?;
    for (field, value) in &args.inputs {
        playground.set_input(field, value).await;
    }

    let meta = VaultMetaPatch::rename(args.name).with_description(args.description);
    expect_applied(playground.generate_prompt(Some(meta)).await?, "generate")?;

    let mut prompt_stage = Stage::InitialPrompt;
    for refinement in &args.refinements {
        expect_applied(refiner.refine(prompt_stage, refinement).await?, "refine")?;
        prompt_stage = Stage::RefinedPrompt;
    }

    if args.content {
        expect_applied(
            playground.generate_content(!args.refinements.is_empty()).await?,
            "generate content",
        )?;
        for refinement in &args.content_refinements {
            expect_applied(refiner.refine(Stage::Content, refinement).await?, "refine")?;
        }
    }

    if args.save {
        playground.save_vault().await?;
    }

    let view = playground.view().await;
    if workbench.json {
        workbench.print_json(&view)?;
    } else {
        print_session(&view);
    }

    if let Some(format) = args.export {
        let dir = match &workbench.settings.export_dir {
            Some(dir) => dir.clone(),
            None => workbench
                .paths
                .exports_dir()
                .context("Cannot resolve export directory")?,
        };
        let options = ExportOptions {
            format,
            enable_markdown: args.markdown,
            ..ExportOptions::default()
        };
        let path = write_export(&dir, &playground.export_content().await, &options).await?;
        eprintln!("Exported to {}", path.display());
    }

    Ok(())
}

fn expect_applied(completion: Completion, step: &str) -> Result<()> {
    match completion {
        Completion::Applied => Ok(()),
        other => bail!("{} did not produce a result ({:?})", step, other),
    }
}
