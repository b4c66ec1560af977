use poem::{
    Endpoint, EndpointExt, Route, Server as PoemServer, listener::TcpListener,
    middleware::Tracing,
};
use poem_openapi::OpenApiService;

use crate::api::{error::ErrorTranslator, home, security::ApiKey};
use crate::config::{app_config::AppConfig, security_config::SecurityConfig};
use crate::setup::dependency_injection::DependencyContainer;

pub struct Server;

impl Server {
    pub async fn run(config: AppConfig, container: DependencyContainer) -> anyhow::Result<()> {
        let addr = config.server.bind_address();
        let app = build_app(container, config.security)
            .with(config.cors)
            .with(Tracing);
        tracing::info!("Server running at http://{}", addr);
        tracing::info!("Swagger UI at http://{}/docs", addr);
        tracing::info!("OpenAPI JSON at http://{}/openapi.json", addr);
        PoemServer::new(TcpListener::bind(&addr)).run(app).await?;
        Ok(())
    }
}

/// Assembles routes, the middleware chain and shared state.
pub fn build_app(container: DependencyContainer, security: SecurityConfig) -> impl Endpoint {
    let api_service = OpenApiService::new(
        (home::Api, container.health_api, container.product_api),
        "Product Catalog API",
        env!("CARGO_PKG_VERSION"),
    );
    let ui = api_service.swagger_ui();
    let spec = api_service.spec_endpoint();

    Route::new()
        .nest("/", api_service)
        .nest("/docs", ui)
        .nest("/openapi.json", spec)
        .with(ErrorTranslator)
        .data(ApiKey::new(security.api_key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::Classification;
    use crate::api::home::GREETING;
    use crate::api::security::{API_KEY_HEADER, UNAUTHORIZED_MESSAGE};
    use poem::http::StatusCode;
    use poem::test::{TestClient, TestResponse};
    use serde_json::{Value, json};

    const KEY: &str = "test-key";

    fn client() -> TestClient<impl Endpoint> {
        TestClient::new(build_app(
            DependencyContainer::new(),
            SecurityConfig::new(KEY),
        ))
    }

    fn book(name: &str) -> Value {
        json!({
            "name": name,
            "description": format!("{name}, paperback"),
            "price": 12.99,
            "category": "Books",
            "inStock": true
        })
    }

    fn item(name: &str, category: &str) -> Value {
        json!({
            "name": name,
            "description": "catalog item",
            "price": 5,
            "category": category,
            "inStock": true
        })
    }

    async fn body(resp: TestResponse) -> Value {
        resp.0.into_body().into_json().await.unwrap()
    }

    async fn create<E: Endpoint>(cli: &TestClient<E>, payload: &Value) -> Value {
        let resp = cli
            .post("/api/products")
            .header(API_KEY_HEADER, KEY)
            .body_json(payload)
            .send()
            .await;
        resp.assert_status(StatusCode::CREATED);
        body(resp).await
    }

    async fn list<E: Endpoint>(cli: &TestClient<E>, uri: &str) -> Value {
        let resp = cli.get(uri).send().await;
        resp.assert_status_is_ok();
        body(resp).await
    }

    fn names(listing: &Value) -> Vec<String> {
        listing["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn should_greet_on_root() {
        let resp = client().get("/").send().await;

        resp.assert_status_is_ok();
        resp.assert_text(GREETING).await;
    }

    #[tokio::test]
    async fn should_return_created_product_by_id() {
        let cli = client();
        let created = create(&cli, &book("White Fang")).await;
        let id = created["id"].as_str().unwrap().to_string();

        let resp = cli.get(format!("/api/products/{id}")).send().await;
        resp.assert_status_is_ok();
        let fetched = body(resp).await;

        assert_eq!(fetched, created);
        assert_eq!(fetched["name"], "White Fang");
        assert_eq!(fetched["price"], 12.99);
        assert_eq!(fetched["category"], "Books");
        assert_eq!(fetched["inStock"], true);
    }

    #[tokio::test]
    async fn should_assign_unique_ids() {
        let cli = client();
        let first = create(&cli, &book("Dune")).await;
        let second = create(&cli, &book("Dune")).await;

        assert_ne!(first["id"], second["id"]);
    }

    #[tokio::test]
    async fn should_return_not_found_envelope_for_unknown_id() {
        let resp = client().get("/api/products/does-not-exist").send().await;

        resp.assert_status(StatusCode::NOT_FOUND);
        resp.assert_json(json!({ "status": "fail", "message": "Product not found" }))
            .await;
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_or_deleting_unknown_id() {
        let cli = client();

        let updated = cli
            .put("/api/products/does-not-exist")
            .header(API_KEY_HEADER, KEY)
            .body_json(&book("Ghost"))
            .send()
            .await;
        let deleted = cli
            .delete("/api/products/does-not-exist")
            .header(API_KEY_HEADER, KEY)
            .send()
            .await;

        updated.assert_status(StatusCode::NOT_FOUND);
        deleted.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_replace_fields_on_update_keeping_id() {
        let cli = client();
        let created = create(&cli, &book("Wolf Hall")).await;
        let id = created["id"].as_str().unwrap().to_string();

        let resp = cli
            .put(format!("/api/products/{id}"))
            .header(API_KEY_HEADER, KEY)
            .body_json(&json!({
                "name": "Wolf Hall",
                "description": "Hardcover",
                "price": 30,
                "category": "Books",
                "inStock": false
            }))
            .send()
            .await;
        resp.assert_status_is_ok();
        let updated = body(resp).await;

        assert_eq!(updated["id"], created["id"]);
        assert_eq!(updated["description"], "Hardcover");
        assert_eq!(updated["price"], 30);
        assert_eq!(updated["inStock"], false);
    }

    #[tokio::test]
    async fn should_delete_once_and_preserve_order() {
        let cli = client();
        create(&cli, &book("First")).await;
        let second = create(&cli, &book("Second")).await;
        create(&cli, &book("Third")).await;
        let uri = format!("/api/products/{}", second["id"].as_str().unwrap());

        let resp = cli.delete(&uri).header(API_KEY_HEADER, KEY).send().await;
        resp.assert_status_is_ok();
        resp.assert_json(json!({ "message": "Product deleted successfully" }))
            .await;

        let again = cli.delete(&uri).header(API_KEY_HEADER, KEY).send().await;
        again.assert_status(StatusCode::NOT_FOUND);

        let listing = list(&cli, "/api/products").await;
        assert_eq!(names(&listing), vec!["First", "Third"]);
    }

    #[tokio::test]
    async fn should_paginate_listing() {
        let cli = client();
        for i in 1..=25 {
            create(&cli, &item(&format!("Item {i}"), "General")).await;
        }

        let second = list(&cli, "/api/products?page=2&limit=10").await;
        let fourth = list(&cli, "/api/products?page=4&limit=10").await;

        assert_eq!(second["status"], "success");
        assert_eq!(second["results"], 10);
        assert_eq!(second["total"], 25);
        assert_eq!(second["page"], 2);
        assert_eq!(second["limit"], 10);
        let expected: Vec<String> = (11..=20).map(|i| format!("Item {i}")).collect();
        assert_eq!(names(&second), expected);

        assert_eq!(fourth["results"], 0);
        assert_eq!(fourth["total"], 25);
        assert!(fourth["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_default_pagination_when_not_numeric() {
        let cli = client();
        create(&cli, &book("Only")).await;

        let listing = list(&cli, "/api/products?page=abc&limit=").await;

        assert_eq!(listing["page"], 1);
        assert_eq!(listing["limit"], 10);
        assert_eq!(listing["results"], 1);
    }

    #[tokio::test]
    async fn should_compose_category_filter_and_search() {
        let cli = client();
        create(&cli, &item("White Fang", "Books")).await;
        create(&cli, &item("Wolf Hall", "books")).await;
        create(&cli, &item("Wolf Plush", "Toys")).await;
        create(&cli, &item("Dune", "Books")).await;

        let listing = list(&cli, "/api/products?category=BOOKS&search=WOLF").await;

        assert_eq!(names(&listing), vec!["Wolf Hall"]);
        assert_eq!(listing["total"], 1);
    }

    #[tokio::test]
    async fn should_count_products_by_category() {
        let cli = client();
        create(&cli, &item("a1", "A")).await;
        create(&cli, &item("a2", "A")).await;
        create(&cli, &item("b1", "B")).await;

        let stats = list(&cli, "/api/products/stats").await;

        assert_eq!(
            stats,
            json!({ "status": "success", "totalCategories": 2, "data": { "A": 2, "B": 1 } })
        );
    }

    #[tokio::test]
    async fn should_reject_mutations_without_valid_key() {
        let cli = client();
        let created = create(&cli, &book("Keep Me")).await;
        let uri = format!("/api/products/{}", created["id"].as_str().unwrap());

        let attempts = vec![
            cli.post("/api/products").body_json(&book("Intruder")).send().await,
            cli.post("/api/products")
                .header(API_KEY_HEADER, "wrong")
                .body_json(&book("Intruder"))
                .send()
                .await,
            cli.put(&uri)
                .header(API_KEY_HEADER, "wrong")
                .body_json(&book("Renamed"))
                .send()
                .await,
            cli.delete(&uri).send().await,
        ];

        for resp in attempts {
            resp.assert_status(StatusCode::UNAUTHORIZED);
            resp.assert_json(json!({ "message": UNAUTHORIZED_MESSAGE }))
                .await;
        }

        let listing = list(&cli, "/api/products").await;
        assert_eq!(names(&listing), vec!["Keep Me"]);
    }

    #[tokio::test]
    async fn should_check_key_before_validating_body() {
        let resp = client()
            .post("/api/products")
            .body_json(&json!({ "name": "Incomplete" }))
            .send()
            .await;

        resp.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn should_reject_incomplete_products_without_mutating() {
        let cli = client();
        let created = create(&cli, &book("Original")).await;
        let uri = format!("/api/products/{}", created["id"].as_str().unwrap());

        let missing_category = cli
            .post("/api/products")
            .header(API_KEY_HEADER, KEY)
            .body_json(&json!({
                "name": "No Category",
                "description": "missing a field",
                "price": 3,
                "inStock": true
            }))
            .send()
            .await;
        missing_category.assert_status(StatusCode::BAD_REQUEST);
        let envelope = body(missing_category).await;
        assert_eq!(envelope["status"], json!(Classification::Fail));
        assert_eq!(envelope["message"], "All product fields are required");

        let zero_price = cli
            .put(&uri)
            .header(API_KEY_HEADER, KEY)
            .body_json(&json!({
                "name": "Original",
                "description": "free now",
                "price": 0,
                "category": "Books",
                "inStock": true
            }))
            .send()
            .await;
        zero_price.assert_status(StatusCode::BAD_REQUEST);

        let listing = list(&cli, "/api/products").await;
        assert_eq!(listing["total"], 1);
        assert_eq!(listing["data"][0], created);
    }

    #[tokio::test]
    async fn should_reject_malformed_bodies() {
        let cli = client();

        let not_json = cli
            .post("/api/products")
            .header(API_KEY_HEADER, KEY)
            .content_type("application/json")
            .body("{not json")
            .send()
            .await;
        not_json.assert_status(StatusCode::BAD_REQUEST);

        let wrong_type = cli
            .post("/api/products")
            .header(API_KEY_HEADER, KEY)
            .body_json(&json!({
                "name": "Typed",
                "description": "price sent as text",
                "price": "12",
                "category": "Misc",
                "inStock": true
            }))
            .send()
            .await;
        wrong_type.assert_status(StatusCode::BAD_REQUEST);
        wrong_type
            .assert_json(json!({ "status": "fail", "message": "Invalid product data" }))
            .await;
    }

    #[tokio::test]
    async fn should_translate_unmatched_routes() {
        let cli = client();

        let unknown = cli.get("/nope").send().await;
        unknown.assert_status(StatusCode::NOT_FOUND);
        unknown
            .assert_json(json!({ "status": "fail", "message": "Cannot find /nope on this server" }))
            .await;

        let wrong_method = cli.patch("/api/products").send().await;
        wrong_method.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_take_first_of_repeated_query_keys() {
        let cli = client();
        for i in 1..=3 {
            create(&cli, &item(&format!("Item {i}"), "General")).await;
        }

        let listing = list(&cli, "/api/products?page=1&page=2&limit=2&limit=5").await;

        assert_eq!(listing["page"], 1);
        assert_eq!(listing["limit"], 2);
        assert_eq!(names(&listing), vec!["Item 1", "Item 2"]);
    }

    #[tokio::test]
    async fn should_not_cap_oversized_limit() {
        let cli = client();
        for i in 1..=12 {
            create(&cli, &item(&format!("Item {i}"), "General")).await;
        }

        let listing = list(&cli, "/api/products?limit=99999999999999999999").await;

        assert_eq!(listing["results"], 12);
        assert_eq!(listing["limit"], json!(usize::MAX));
    }

    #[tokio::test]
    async fn should_count_whitespace_category_separately() {
        let cli = client();
        create(&cli, &item("Spacer", "  ")).await;

        let stats = list(&cli, "/api/products/stats").await;

        assert_eq!(
            stats,
            json!({ "status": "success", "totalCategories": 1, "data": { "  ": 1 } })
        );
    }

    #[tokio::test]
    async fn should_document_product_routes() {
        let resp = client().get("/openapi.json").send().await;

        resp.assert_status_is_ok();
        let document = body(resp).await;
        let paths = document["paths"].as_object().unwrap();
        assert!(paths.contains_key("/api/products"));
        assert!(paths.contains_key("/api/products/stats"));
        assert!(paths.contains_key("/api/products/{id}"));
        assert!(paths.contains_key("/system/health"));
    }

    #[tokio::test]
    async fn should_report_health() {
        let resp = client().get("/system/health").send().await;

        resp.assert_status_is_ok();
        let health = body(resp).await;
        assert_eq!(health["status"], "healthy");
    }
}
