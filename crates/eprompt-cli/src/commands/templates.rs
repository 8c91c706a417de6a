use super::Workbench;
use anyhow::Result;
use eprompt_application::TemplateCatalogService;

pub async fn run(workbench: &Workbench) -> Result<()> {
    let catalog = TemplateCatalogService::new(workbench.ctx.clone());
    catalog.reload().await?;
    let templates = catalog.templates().await;

    if workbench.json {
        return workbench.print_json(&templates);
    }

    if templates.is_empty() {
        println!("No templates available.");
        return Ok(());
    }
    for template in &templates {
        println!("{:<24} {}", template.id, template.name);
        if !template.description.is_empty() {
            println!("{:<24} {}", "", template.description);
        }
        println!(
            "{:<24} required: {}",
            "",
            template.required_fields.join(", ")
        );
    }
    Ok(())
}
