use super::Workbench;
use anyhow::{Context, Result};
use eprompt_application::RefinementOrchestrator;
use eprompt_core::refine::RefinementKind;

pub async fn run(workbench: &Workbench, kind: &str) -> Result<()> {
    let kind: RefinementKind = kind
        .parse()
        .with_context(|| format!("Unknown refinement kind '{}': use prompt or content", kind))?;

    let tools = RefinementOrchestrator::new(workbench.ctx.clone())
        .tools(kind)
        .await?;

    if workbench.json {
        return workbench.print_json(&tools);
    }
    for tool in &tools {
        println!("{:<16} {:<20} {}", tool.id, tool.name, tool.description);
    }
    Ok(())
}
