/// Repository errors for domain layer.
/// Messages are what an API client sees when a repository failure surfaces.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,
    #[error("Record with id {0} already exists")]
    Duplicated(String),
}

impl RepositoryError {
    pub fn not_found() -> Self {
        RepositoryError::NotFound
    }
    pub fn duplicated(id: impl Into<String>) -> Self {
        RepositoryError::Duplicated(id.into())
    }
}
