use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::query::{ProductPage, ProductQuery};

#[async_trait]
pub trait GetAllProductsUseCase: Send + Sync {
    async fn execute(&self, query: ProductQuery) -> Result<ProductPage, ProductError>;
}
