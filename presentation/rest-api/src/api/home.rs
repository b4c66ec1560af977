use poem_openapi::{OpenApi, payload::PlainText};

use crate::api::tags::ApiTags;

pub const GREETING: &str = "Hello World from the Product Catalog API";

pub struct Api;

#[OpenApi]
impl Api {
    /// Greeting
    #[oai(path = "/", method = "get", tag = "ApiTags::System")]
    async fn index(&self) -> PlainText<&'static str> {
        PlainText(GREETING)
    }
}
