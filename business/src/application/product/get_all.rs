use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::query::{ProductPage, ProductQuery};
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::get_all::GetAllProductsUseCase;

pub struct GetAllProductsUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetAllProductsUseCase for GetAllProductsUseCaseImpl {
    async fn execute(&self, query: ProductQuery) -> Result<ProductPage, ProductError> {
        self.logger.info(&format!(
            "Listing products (category: {:?}, search: {:?}, page: {}, limit: {})",
            query.category, query.search, query.pagination.page, query.pagination.limit
        ));
        let page = self.repository.find(&query).await?;
        self.logger.info(&format!(
            "Returning {} of {} matching products",
            page.items.len(),
            page.total
        ));
        Ok(page)
    }
}
