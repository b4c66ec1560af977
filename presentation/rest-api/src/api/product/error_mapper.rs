use business::domain::product::errors::ProductError;

use crate::api::error::ApiError;

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound => ApiError::NotFound(ProductError::NotFound.to_string()),
            ProductError::Validation(message) => ApiError::Validation(message),
            ProductError::Repository(source) => ApiError::Internal(source.to_string()),
        }
    }
}
