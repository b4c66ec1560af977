use async_trait::async_trait;

use crate::domain::errors::RepositoryError;

use super::model::{Product, ProductChanges};
use super::query::{ProductPage, ProductQuery};
use super::stats::CategoryStats;
use super::value_objects::ProductId;

/// Owner of the product collection.
///
/// Every method is atomic with respect to the others: implementations must
/// not let a caller observe a partially applied mutation.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find(&self, query: &ProductQuery) -> Result<ProductPage, RepositoryError>;
    async fn get_by_id(&self, id: &ProductId) -> Result<Product, RepositoryError>;
    async fn insert(&self, product: &Product) -> Result<(), RepositoryError>;
    async fn update(
        &self,
        id: &ProductId,
        changes: ProductChanges,
    ) -> Result<Product, RepositoryError>;
    async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError>;
    async fn count_by_category(&self) -> Result<CategoryStats, RepositoryError>;
}
