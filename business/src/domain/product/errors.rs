/// Failures raised by product use cases.
#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Product not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Repository(#[from] crate::domain::errors::RepositoryError),
}

impl ProductError {
    pub const MISSING_FIELDS: &'static str = "All product fields are required";

    pub fn missing_fields() -> Self {
        ProductError::Validation(Self::MISSING_FIELDS.to_string())
    }
}
