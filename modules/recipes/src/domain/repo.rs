use async_trait::async_trait;
use search_core::{Page, PageRequest};

use crate::contract::{model::Recipe, search::SearchRequest};
use crate::domain::error::DomainError;

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait RecipesRepository: Send + Sync {
    /// Compile `request`, run the count and page queries, and hydrate the page.
    ///
    /// `page` is already clamped by the caller.
    async fn search_page(
        &self,
        request: &SearchRequest,
        page: PageRequest,
    ) -> Result<Page<Recipe>, DomainError>;
}
