//! Search aggregator.
//!
//! Queries are sent unchanged, category prefixes included. Each call takes a
//! request id from a monotonic counter and its response is applied only when
//! that id is newer than the last applied one, so a slow early query can
//! never overwrite the results of a later one.

use crate::context::AppContext;
use crate::outcome::Completion;
use anyhow::Result;
use eprompt_core::EpromptError;
use eprompt_core::config::DEFAULT_SEARCH_LIMIT;
use eprompt_core::search::{SearchCategory, SearchQuery, SearchResultSet, SearchSelection};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct SearchState {
    last_applied: u64,
    query: Option<String>,
    results: Option<SearchResultSet>,
}

pub struct SearchAggregator {
    ctx: AppContext,
    limit: usize,
    next_request_id: AtomicU64,
    state: RwLock<SearchState>,
}

impl SearchAggregator {
    pub fn new(ctx: AppContext) -> Self {
        Self::with_limit(ctx, DEFAULT_SEARCH_LIMIT)
    }

    pub fn with_limit(ctx: AppContext, limit: usize) -> Self {
        Self {
            ctx,
            limit,
            next_request_id: AtomicU64::new(0),
            state: RwLock::new(SearchState::default()),
        }
    }

    pub async fn search(&self, query: &str) -> Result<Completion> {
        let parsed = SearchQuery::parse(query);
        if !parsed.is_valid() {
            debug!(query, "Ignoring query without search text");
            return Ok(Completion::Skipped);
        }

        let request_id = self.next_request_id.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(request_id, query, categories = ?parsed.categories(), "Searching");

        let outcome = self.ctx.service.search(parsed.raw(), self.limit).await;

        let mut state = self.state.write().await;
        let results = match outcome {
            Ok(results) => results,
            Err(e) if request_id <= state.last_applied => {
                warn!(request_id, error = %e, "Superseded search request failed");
                return Ok(Completion::Discarded);
            }
            Err(e) => return Err(self.ctx.report("search", e)),
        };
        if request_id <= state.last_applied {
            warn!(
                request_id,
                last_applied = state.last_applied,
                "Discarding out-of-order search response"
            );
            return Ok(Completion::Discarded);
        }
        info!(request_id, total = results.total(), "Search results applied");
        state.last_applied = request_id;
        state.query = Some(parsed.raw().to_string());
        state.results = Some(results);
        Ok(Completion::Applied)
    }

    /// Results of the latest applied query.
    pub async fn results(&self) -> Option<SearchResultSet> {
        self.state.read().await.results.clone()
    }

    pub async fn last_query(&self) -> Option<String> {
        self.state.read().await.query.clone()
    }

    /// Loads the hit at `index` of `category` into the playground.
    ///
    /// A hit whose template is not in the loaded catalog is logged and
    /// ignored; the session is left as it was.
    pub async fn select(&self, category: SearchCategory, index: usize) -> Result<Completion> {
        let entity = self
            .state
            .read()
            .await
            .results
            .as_ref()
            .and_then(|r| r.get(category, index))
            .cloned()
            .ok_or_else(|| {
                EpromptError::reference("search result", format!("{}[{}]", category, index))
            })?;

        let Some(selection) = SearchSelection::from_entity(category, &entity) else {
            warn!(%category, id = %entity.id, "Search hit has no template reference");
            return Ok(Completion::Skipped);
        };

        let template = self
            .ctx
            .catalog
            .read()
            .await
            .find(selection.template_id())
            .cloned();
        let Some(template) = template else {
            warn!(
                template_id = selection.template_id(),
                "Template of search hit is not loaded"
            );
            return Ok(Completion::Skipped);
        };

        let mut playground = self.ctx.playground.write().await;
        match selection {
            SearchSelection::Template { .. } => playground.select_template(template),
            SearchSelection::Vault { item, .. } => playground.load_vault_item(template, item),
        }
        Ok(Completion::Applied)
    }
}
