use std::sync::Arc;

use chrono::Utc;
use poem_openapi::{Object, OpenApi, payload::Json};
use serde::{Deserialize, Serialize};

use business::domain::product::use_cases::stats::GetProductStatsUseCase;

use crate::api::tags::ApiTags;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct HealthCheckResponse {
    /// Service status
    pub status: String,
    /// Current server timestamp
    pub timestamp: String,
    /// Service version
    pub version: String,
    /// Whether the catalog store answered
    pub catalog_available: bool,
}

/// System endpoints for health checks and load balancers.
pub struct Api {
    stats_use_case: Arc<dyn GetProductStatsUseCase>,
}

impl Api {
    pub fn new(stats_use_case: Arc<dyn GetProductStatsUseCase>) -> Self {
        Self { stats_use_case }
    }
}

#[OpenApi]
impl Api {
    /// Health check endpoint
    ///
    /// Reports "healthy" when the catalog store can be read, "degraded"
    /// otherwise. Public; no API key required.
    #[oai(path = "/system/health", method = "get", tag = "ApiTags::System")]
    async fn health_check(&self) -> Json<HealthCheckResponse> {
        let catalog_available = self.stats_use_case.execute().await.is_ok();

        Json(HealthCheckResponse {
            status: if catalog_available { "healthy" } else { "degraded" }.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            catalog_available,
        })
    }
}
