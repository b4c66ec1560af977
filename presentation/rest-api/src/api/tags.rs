use poem_openapi::Tags;

#[derive(Debug, Tags)]
pub enum ApiTags {
    /// Service liveness and metadata
    System,
    /// Product catalog
    Products,
}
