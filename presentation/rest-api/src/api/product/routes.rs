use std::sync::Arc;

use poem::{Endpoint, EndpointExt};
use poem_openapi::param::{Path, Query};
use poem_openapi::{ApiResponse, OpenApi, payload::Json};

use business::domain::product::query::{Pagination, ProductQuery};
use business::domain::product::use_cases::create::CreateProductUseCase;
use business::domain::product::use_cases::delete::{DeleteProductParams, DeleteProductUseCase};
use business::domain::product::use_cases::get_all::GetAllProductsUseCase;
use business::domain::product::use_cases::get_by_id::{
    GetProductByIdParams, GetProductByIdUseCase,
};
use business::domain::product::use_cases::stats::GetProductStatsUseCase;
use business::domain::product::use_cases::update::{UpdateProductParams, UpdateProductUseCase};

use crate::api::error::ApiError;
use crate::api::product::dto::{
    MessageResponse, ProductListResponse, ProductRequest, ProductResponse, ProductStatsResponse,
};
use crate::api::security::ApiKeyAuth;
use crate::api::tags::ApiTags;
use crate::api::validation::ValidateProduct;

pub struct ProductApi {
    create_use_case: Arc<dyn CreateProductUseCase>,
    get_all_use_case: Arc<dyn GetAllProductsUseCase>,
    get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
    update_use_case: Arc<dyn UpdateProductUseCase>,
    delete_use_case: Arc<dyn DeleteProductUseCase>,
    stats_use_case: Arc<dyn GetProductStatsUseCase>,
}

impl ProductApi {
    pub fn new(
        create_use_case: Arc<dyn CreateProductUseCase>,
        get_all_use_case: Arc<dyn GetAllProductsUseCase>,
        get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
        update_use_case: Arc<dyn UpdateProductUseCase>,
        delete_use_case: Arc<dyn DeleteProductUseCase>,
        stats_use_case: Arc<dyn GetProductStatsUseCase>,
    ) -> Self {
        Self {
            create_use_case,
            get_all_use_case,
            get_by_id_use_case,
            update_use_case,
            delete_use_case,
            stats_use_case,
        }
    }
}

/// API key check, then body validation.
fn guarded_body(ep: impl Endpoint) -> impl Endpoint {
    ep.with(ValidateProduct).with(ApiKeyAuth)
}

fn guarded(ep: impl Endpoint) -> impl Endpoint {
    ep.with(ApiKeyAuth)
}

/// Product catalog API
///
/// Reads are public. Create, update and delete require the `x-api-key`
/// header. Failures are answered with a `{status, message}` envelope.
#[OpenApi]
impl ProductApi {
    /// List products
    ///
    /// Filters by exact category (case-insensitive) and by a name fragment,
    /// then pages the result. Invalid `page` or `limit` values fall back to
    /// 1 and 10.
    #[oai(path = "/api/products", method = "get", tag = "ApiTags::Products")]
    async fn list_products(
        &self,
        category: Query<Option<String>>,
        search: Query<Option<String>>,
        page: Query<Option<String>>,
        limit: Query<Option<String>>,
    ) -> poem::Result<ListProductsResponse> {
        let pagination = Pagination::parse(page.0.as_deref(), limit.0.as_deref());
        let query = ProductQuery::new(category.0, search.0, pagination);

        let page = self
            .get_all_use_case
            .execute(query)
            .await
            .map_err(ApiError::from)?;

        Ok(ListProductsResponse::Ok(Json(ProductListResponse::new(
            page, pagination,
        ))))
    }

    /// Count products per category
    #[oai(path = "/api/products/stats", method = "get", tag = "ApiTags::Products")]
    async fn product_stats(&self) -> poem::Result<ProductStatsApiResponse> {
        let stats = self
            .stats_use_case
            .execute()
            .await
            .map_err(ApiError::from)?;

        Ok(ProductStatsApiResponse::Ok(Json(stats.into())))
    }

    /// Get a product by ID
    #[oai(path = "/api/products/:id", method = "get", tag = "ApiTags::Products")]
    async fn get_product(&self, id: Path<String>) -> poem::Result<GetProductResponse> {
        let product = self
            .get_by_id_use_case
            .execute(GetProductByIdParams { id: id.0.into() })
            .await
            .map_err(ApiError::from)?;

        Ok(GetProductResponse::Ok(Json(product.into())))
    }

    /// Create a product
    ///
    /// All five fields are required; `price` must be non-zero.
    #[oai(
        path = "/api/products",
        method = "post",
        tag = "ApiTags::Products",
        transform = "guarded_body"
    )]
    async fn create_product(
        &self,
        body: Json<ProductRequest>,
    ) -> poem::Result<CreateProductResponse> {
        let product = self
            .create_use_case
            .execute(body.0.into_create_params()?)
            .await
            .map_err(ApiError::from)?;

        Ok(CreateProductResponse::Created(Json(product.into())))
    }

    /// Update a product
    ///
    /// Fields left out of the body keep their stored value.
    #[oai(
        path = "/api/products/:id",
        method = "put",
        tag = "ApiTags::Products",
        transform = "guarded_body"
    )]
    async fn update_product(
        &self,
        id: Path<String>,
        body: Json<ProductRequest>,
    ) -> poem::Result<UpdateProductResponse> {
        let product = self
            .update_use_case
            .execute(UpdateProductParams {
                id: id.0.into(),
                changes: body.0.into_changes(),
            })
            .await
            .map_err(ApiError::from)?;

        Ok(UpdateProductResponse::Ok(Json(product.into())))
    }

    /// Delete a product
    #[oai(
        path = "/api/products/:id",
        method = "delete",
        tag = "ApiTags::Products",
        transform = "guarded"
    )]
    async fn delete_product(&self, id: Path<String>) -> poem::Result<DeleteProductResponse> {
        self.delete_use_case
            .execute(DeleteProductParams { id: id.0.into() })
            .await
            .map_err(ApiError::from)?;

        Ok(DeleteProductResponse::Ok(Json(MessageResponse {
            message: "Product deleted successfully".to_string(),
        })))
    }
}

#[derive(ApiResponse)]
pub enum ListProductsResponse {
    #[oai(status = 200)]
    Ok(Json<ProductListResponse>),
}

#[derive(ApiResponse)]
pub enum ProductStatsApiResponse {
    #[oai(status = 200)]
    Ok(Json<ProductStatsResponse>),
}

#[derive(ApiResponse)]
pub enum GetProductResponse {
    #[oai(status = 200)]
    Ok(Json<ProductResponse>),
}

#[derive(ApiResponse)]
pub enum CreateProductResponse {
    #[oai(status = 201)]
    Created(Json<ProductResponse>),
}

#[derive(ApiResponse)]
pub enum UpdateProductResponse {
    #[oai(status = 200)]
    Ok(Json<ProductResponse>),
}

#[derive(ApiResponse)]
pub enum DeleteProductResponse {
    #[oai(status = 200)]
    Ok(Json<MessageResponse>),
}
