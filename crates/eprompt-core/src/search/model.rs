//! Search domain models.

use serde::{Deserialize, Serialize};

use crate::vault::VaultItem;

/// Result category returned by the search service.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SearchCategory {
    Template,
    Vault,
    InitialPrompt,
    RefinedPrompt,
    Content,
}

impl SearchCategory {
    pub const ALL: [SearchCategory; 5] = [
        SearchCategory::Template,
        SearchCategory::Vault,
        SearchCategory::InitialPrompt,
        SearchCategory::RefinedPrompt,
        SearchCategory::Content,
    ];

    /// Whether selecting a result of this category loads a vault item.
    pub fn is_vault_backed(self) -> bool {
        !matches!(self, SearchCategory::Template)
    }
}

/// A single search hit.
///
/// Template hits carry the template's `id`; vault-backed hits carry the
/// stored vault fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntity {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refined_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_content: Option<String>,
    /// Matched snippet, if the service returns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Relevance in `[0, 1]`. Displayed only; the service pre-sorts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl SearchEntity {
    /// Stored vault fields of a vault-backed hit.
    pub fn to_vault_item(&self) -> VaultItem {
        VaultItem {
            vault_id: self
                .vault_id
                .clone()
                .or_else(|| Some(self.id.clone()).filter(|id| !id.is_empty())),
            template_id: self.template_id.clone(),
            name: self.name.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            initial_prompt: self.initial_prompt.clone(),
            refined_prompt: self.refined_prompt.clone(),
            generated_content: self.generated_content.clone(),
            updated_at: self.updated_at.clone(),
            ..VaultItem::default()
        }
    }

    /// Score clamped into `[0, 1]`.
    pub fn relevance(&self) -> Option<f64> {
        self.score.map(|s| s.clamp(0.0, 1.0))
    }

    /// Best short label for display.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.text.as_deref())
            .unwrap_or(self.id.as_str())
    }
}

/// Results of one completed query, keyed by category.
///
/// Every category is present (possibly empty). A new query replaces the set
/// wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResultSet {
    #[serde(default)]
    pub template: Vec<SearchEntity>,
    #[serde(default)]
    pub vault: Vec<SearchEntity>,
    #[serde(default, rename = "initial-prompt")]
    pub initial_prompt: Vec<SearchEntity>,
    #[serde(default, rename = "refined-prompt")]
    pub refined_prompt: Vec<SearchEntity>,
    #[serde(default)]
    pub content: Vec<SearchEntity>,
}

impl SearchResultSet {
    pub fn category(&self, category: SearchCategory) -> &[SearchEntity] {
        match category {
            SearchCategory::Template => &self.template,
            SearchCategory::Vault => &self.vault,
            SearchCategory::InitialPrompt => &self.initial_prompt,
            SearchCategory::RefinedPrompt => &self.refined_prompt,
            SearchCategory::Content => &self.content,
        }
    }

    /// Categories worth rendering, in canonical order.
    pub fn non_empty_categories(&self) -> Vec<SearchCategory> {
        SearchCategory::ALL
            .into_iter()
            .filter(|c| !self.category(*c).is_empty())
            .collect()
    }

    pub fn total(&self) -> usize {
        SearchCategory::ALL
            .into_iter()
            .map(|c| self.category(c).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Looks up a hit by category and position.
    pub fn get(&self, category: SearchCategory, index: usize) -> Option<&SearchEntity> {
        self.category(category).get(index)
    }
}

/// What selecting a search hit should load.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchSelection {
    /// Start a fresh session on this template.
    Template { template_id: String },
    /// Load a stored vault item on top of its template.
    Vault { template_id: String, item: VaultItem },
}

impl SearchSelection {
    /// Maps a hit to its selection target.
    ///
    /// Returns `None` when a vault-backed hit carries no template reference.
    pub fn from_entity(category: SearchCategory, entity: &SearchEntity) -> Option<Self> {
        if category.is_vault_backed() {
            let template_id = entity.template_id.clone()?;
            Some(Self::Vault {
                template_id,
                item: entity.to_vault_item(),
            })
        } else {
            let template_id = entity
                .template_id
                .clone()
                .unwrap_or_else(|| entity.id.clone());
            Some(Self::Template { template_id })
        }
    }

    pub fn template_id(&self) -> &str {
        match self {
            Self::Template { template_id } | Self::Vault { template_id, .. } => template_id,
        }
    }
}
