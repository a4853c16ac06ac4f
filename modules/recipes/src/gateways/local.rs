use async_trait::async_trait;
use search_core::Page;
use std::sync::Arc;

use crate::contract::{
    client::RecipesApi, error::RecipesError, model::Recipe, search::SearchRequest,
};
use crate::domain::service::Service;

/// Local implementation of the RecipesApi trait that delegates to the domain service
pub struct RecipesLocalClient {
    service: Arc<Service>,
}

impl RecipesLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RecipesApi for RecipesLocalClient {
    async fn search(
        &self,
        request: SearchRequest,
        page: u64,
        size: Option<u64>,
    ) -> Result<Page<Recipe>, RecipesError> {
        self.service
            .search(&request, page, size)
            .await
            .map_err(RecipesError::from)
    }
}
