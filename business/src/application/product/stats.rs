use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::stats::CategoryStats;
use crate::domain::product::use_cases::stats::GetProductStatsUseCase;

pub struct GetProductStatsUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetProductStatsUseCase for GetProductStatsUseCaseImpl {
    async fn execute(&self) -> Result<CategoryStats, ProductError> {
        self.logger.info("Computing product counts by category");
        let stats = self.repository.count_by_category().await?;
        self.logger.debug(&format!(
            "Found {} distinct categories",
            stats.total_categories()
        ));
        Ok(stats)
    }
}
