use async_trait::async_trait;
use tokio::sync::RwLock;

use business::domain::errors::RepositoryError;
use business::domain::product::model::{Product, ProductChanges};
use business::domain::product::query::{ProductPage, ProductQuery};
use business::domain::product::repository::ProductRepository;
use business::domain::product::stats::CategoryStats;
use business::domain::product::value_objects::ProductId;

/// Process-local product store.
///
/// Products are kept in insertion order. Each operation holds the lock for
/// its whole read-modify-write, so concurrent requests never see a half
/// applied change. Nothing survives a restart.
#[derive(Default)]
pub struct ProductRepositoryInMemory {
    products: RwLock<Vec<Product>>,
}

impl ProductRepositoryInMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `products`, in the given order.
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }
}

#[async_trait]
impl ProductRepository for ProductRepositoryInMemory {
    async fn find(&self, query: &ProductQuery) -> Result<ProductPage, RepositoryError> {
        let products = self.products.read().await;
        Ok(query.apply(&products))
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Product, RepositoryError> {
        let products = self.products.read().await;
        products
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(RepositoryError::not_found)
    }

    async fn insert(&self, product: &Product) -> Result<(), RepositoryError> {
        let mut products = self.products.write().await;
        if products.iter().any(|p| p.id == product.id) {
            return Err(RepositoryError::duplicated(product.id.as_str()));
        }
        products.push(product.clone());
        tracing::debug!(id = %product.id, size = products.len(), "product inserted");
        Ok(())
    }

    async fn update(
        &self,
        id: &ProductId,
        changes: ProductChanges,
    ) -> Result<Product, RepositoryError> {
        let mut products = self.products.write().await;
        let product = products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(RepositoryError::not_found)?;
        product.apply_changes(changes);
        tracing::debug!(id = %id, "product updated");
        Ok(product.clone())
    }

    async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError> {
        let mut products = self.products.write().await;
        let index = products
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(RepositoryError::not_found)?;
        products.remove(index);
        tracing::debug!(id = %id, size = products.len(), "product removed");
        Ok(())
    }

    async fn count_by_category(&self) -> Result<CategoryStats, RepositoryError> {
        let products = self.products.read().await;
        Ok(CategoryStats::tally(products.iter()))
    }
}
