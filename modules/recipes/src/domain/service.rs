use std::sync::Arc;

use search_core::{LimitCfg, Page, PageRequest};
use tracing::{debug, info, instrument};

use crate::config::RecipesConfig;
use crate::contract::{model::Recipe, search::SearchRequest};
use crate::domain::error::DomainError;
use crate::domain::repo::RecipesRepository;

/// Domain service for recipe search.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn RecipesRepository>,
    config: ServiceConfig,
}

#[derive(Debug, Clone, Copy)]
pub struct ServiceConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        RecipesConfig::default().into()
    }
}

impl From<RecipesConfig> for ServiceConfig {
    fn from(cfg: RecipesConfig) -> Self {
        Self {
            default_page_size: cfg.default_page_size,
            max_page_size: cfg.max_page_size,
        }
    }
}

impl ServiceConfig {
    fn limits(&self) -> LimitCfg {
        LimitCfg {
            default: self.default_page_size,
            max: self.max_page_size.max(1),
        }
    }
}

impl Service {
    pub fn new(repo: Arc<dyn RecipesRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    #[instrument(
        name = "recipes.service.search",
        skip(self, request),
        fields(filters = request.filters.len())
    )]
    pub async fn search(
        &self,
        request: &SearchRequest,
        page: u64,
        size: Option<u64>,
    ) -> Result<Page<Recipe>, DomainError> {
        let page_request = PageRequest::clamped(page, size, self.config.limits());
        debug!(
            effective_size = page_request.size,
            sort = ?request.sort,
            "Searching recipes"
        );

        let result = self.repo.search_page(request, page_request).await?;

        info!(
            returned = result.items.len(),
            total = result.page_info.total_elements,
            "Recipe search finished"
        );
        Ok(result)
    }
}
