use anyhow::{Context, ensure};
use std::env;

/// Shared secret that mutating product routes are checked against.
#[derive(Clone)]
pub struct SecurityConfig {
    pub api_key: String,
}

impl SecurityConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Load the API key from the environment
    ///
    /// Environment variables:
    /// - API_KEY: value clients must send in the `x-api-key` header (required)
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = env::var("API_KEY").context("API_KEY environment variable must be set")?;
        Self::validated(api_key)
    }

    fn validated(api_key: String) -> anyhow::Result<Self> {
        ensure!(!api_key.trim().is_empty(), "API_KEY must not be empty");
        Ok(Self::new(api_key))
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("api_key", &"<redacted>")
            .finish()
    }
}
