use dotenvy::dotenv;

mod api {
    pub mod error;
    pub mod health {
        pub mod routes;
    }
    pub mod home;
    pub mod product {
        pub mod dto;
        pub mod error_mapper;
        pub mod routes;
    }
    pub mod security;
    pub mod tags;
    pub mod validation;
}
mod config {
    pub mod app_config;
    pub mod cors_config;
    pub mod security_config;
    pub mod server_config;
}
mod setup {
    pub mod dependency_injection;
    pub mod server;
}

use config::app_config::AppConfig;
use setup::{dependency_injection::DependencyContainer, server::Server};

/// REST API Entry Point
///
/// Initializes logging, loads configuration, wires the in-memory catalog and
/// starts the HTTP server.
///
/// Layout:
/// - config/: Application configuration (server, CORS, API key)
/// - setup/: Dependency injection and server setup
/// - api/: Route handlers, middleware chain and DTOs
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing with RUST_LOG env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // 2. Load environment variables
    dotenv().ok();

    // 3. Load configuration
    let config = AppConfig::from_env()?;

    // 4. Wire dependencies
    let container = DependencyContainer::new();

    // 5. Run server
    Server::run(config, container).await?;

    Ok(())
}
