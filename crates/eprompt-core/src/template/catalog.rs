//! Locally cached template catalog.

use super::model::Template;

/// In-memory copy of the remote template catalog.
///
/// Search selections resolve `templateId` against this cache; a template that
/// was never loaded cannot be selected.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// Replaces the catalog wholesale.
    pub fn replace(&mut self, templates: Vec<Template>) {
        self.templates = templates;
    }

    pub fn find(&self, template_id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == template_id)
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(id: &str) -> Template {
        Template {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: String::new(),
            role: String::new(),
            tags: vec![],
            required_fields: vec![],
            optional_fields: vec![],
            template: None,
        }
    }

    #[test]
    fn test_find_and_replace() {
        let mut catalog = TemplateCatalog::new(vec![template("a"), template("b")]);
        assert_eq!(catalog.find("b").map(|t| t.name.as_str()), Some("B"));

        catalog.replace(vec![template("c")]);
        assert!(catalog.find("a").is_none());
        assert_eq!(catalog.len(), 1);
    }
}
