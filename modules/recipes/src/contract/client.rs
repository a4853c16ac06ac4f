use async_trait::async_trait;

use crate::contract::{error::RecipesError, model::Recipe, search::SearchRequest};
use search_core::Page;

/// Public API trait for the recipes module that other modules can use
#[async_trait]
pub trait RecipesApi: Send + Sync {
    /// Search recipes and return one offset page.
    ///
    /// `page` is zero-based; `size` falls back to the configured default and
    /// is clamped to the configured maximum.
    async fn search(
        &self,
        request: SearchRequest,
        page: u64,
        size: Option<u64>,
    ) -> Result<Page<Recipe>, RecipesError>;
}
