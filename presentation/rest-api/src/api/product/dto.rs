use std::collections::BTreeMap;

use poem_openapi::Object;
use serde_json::{Number, Value};

use business::domain::product::errors::ProductError;
use business::domain::product::model::{Product, ProductChanges};
use business::domain::product::query::{Pagination, ProductPage};
use business::domain::product::stats::CategoryStats;
use business::domain::product::use_cases::create::CreateProductParams;

use crate::api::error::ApiError;

pub const SUCCESS: &str = "success";
pub const INVALID_PRODUCT_DATA: &str = "Invalid product data";

/// Body of create and update requests.
///
/// Every field is optional at this level: create requires all of them,
/// update keeps the stored value for any that is absent.
#[derive(Debug, Clone, Default, Object)]
#[oai(rename_all = "camelCase")]
pub struct ProductRequest {
    /// Display name
    pub name: Option<String>,
    /// Free-text description
    pub description: Option<String>,
    /// Unit price
    pub price: Option<f64>,
    /// Category label, matched case-insensitively when filtering
    pub category: Option<String>,
    /// Whether the product can be ordered
    pub in_stock: Option<bool>,
}

impl ProductRequest {
    pub fn into_create_params(self) -> Result<CreateProductParams, ApiError> {
        match (
            self.name,
            self.description,
            self.price,
            self.category,
            self.in_stock,
        ) {
            (Some(name), Some(description), Some(price), Some(category), Some(in_stock)) => {
                Ok(CreateProductParams {
                    name,
                    description,
                    price,
                    category,
                    in_stock,
                })
            }
            _ => Err(ApiError::Validation(ProductError::MISSING_FIELDS.to_string())),
        }
    }

    pub fn into_changes(self) -> ProductChanges {
        ProductChanges {
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            in_stock: self.in_stock,
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    #[oai(serialize_with = "price_to_json")]
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            in_stock: product.in_stock,
        }
    }
}

/// Whole prices go out as integers (`10`, not `10.0`), matching what clients sent.
fn price_to_json(price: &f64) -> Option<Value> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if price.fract() == 0.0 && price.abs() <= MAX_EXACT {
        Some(Value::Number(Number::from(*price as i64)))
    } else {
        Number::from_f64(*price).map(Value::Number)
    }
}

/// One page of the catalog listing.
#[derive(Debug, Clone, Object)]
pub struct ProductListResponse {
    pub status: String,
    /// Number of products in `data`
    pub results: usize,
    /// Number of products matching the filters, across all pages
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub data: Vec<ProductResponse>,
}

impl ProductListResponse {
    pub fn new(page: ProductPage, pagination: Pagination) -> Self {
        let data: Vec<ProductResponse> = page.items.into_iter().map(Into::into).collect();
        Self {
            status: SUCCESS.to_string(),
            results: data.len(),
            total: page.total,
            page: pagination.page,
            limit: pagination.limit,
            data,
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct ProductStatsResponse {
    pub status: String,
    pub total_categories: usize,
    /// Product count per category
    pub data: BTreeMap<String, usize>,
}

impl From<CategoryStats> for ProductStatsResponse {
    fn from(stats: CategoryStats) -> Self {
        Self {
            status: SUCCESS.to_string(),
            total_categories: stats.total_categories(),
            data: stats.into_counts(),
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct MessageResponse {
    pub message: String,
}
