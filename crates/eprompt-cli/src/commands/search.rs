use super::{Workbench, print_session};
use anyhow::{Context, Result};
use clap::Args;
use eprompt_application::{Completion, SearchAggregator, TemplateCatalogService};
use eprompt_core::search::{SearchCategory, is_valid_query};

#[derive(Args)]
pub struct SearchArgs {
    /// Query text; `template:`, `vault:`, `initial-prompt:`, `refined-prompt:`
    /// and `content:` prefixes narrow the search
    query: String,

    /// Open a hit in the playground, as `<category>:<index>`
    #[arg(long)]
    open: Option<String>,
}

pub async fn run(workbench: &Workbench, args: SearchArgs) -> Result<()> {
    if !is_valid_query(&args.query) {
        anyhow::bail!("Query needs some text besides category prefixes");
    }

    let search = SearchAggregator::with_limit(workbench.ctx.clone(), workbench.settings.search_limit);
    search.search(&args.query).await?;
    let results = search.results().await.unwrap_or_default();

    if let Some(target) = args.open {
        let (category, index) = parse_target(&target)?;
        TemplateCatalogService::new(workbench.ctx.clone())
            .ensure_loaded()
            .await?;
        if search.select(category, index).await? != Completion::Applied {
            anyhow::bail!("Search hit {} cannot be opened", target);
        }
        let view = workbench.ctx.playground.read().await.view();
        return if workbench.json {
            workbench.print_json(&view)
        } else {
            print_session(&view);
            Ok(())
        };
    }

    if workbench.json {
        return workbench.print_json(&results);
    }
    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }
    for category in results.non_empty_categories() {
        println!("{}:", category);
        for (index, hit) in results.category(category).iter().enumerate() {
            match hit.relevance() {
                Some(score) => println!("  [{}] {} ({:.0}%)", index, hit.label(), score * 100.0),
                None => println!("  [{}] {}", index, hit.label()),
            }
        }
    }
    Ok(())
}

fn parse_target(raw: &str) -> Result<(SearchCategory, usize)> {
    let (category, index) = raw
        .rsplit_once(':')
        .with_context(|| format!("expected <category>:<index>, got '{}'", raw))?;
    let category = category
        .parse::<SearchCategory>()
        .with_context(|| format!("unknown category '{}'", category))?;
    let index = index
        .parse::<usize>()
        .with_context(|| format!("invalid index '{}'", index))?;
    Ok((category, index))
}
