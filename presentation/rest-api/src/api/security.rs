use std::sync::Arc;

use poem::http::StatusCode;
use poem::web::Json;
use poem::{Endpoint, IntoResponse, Middleware, Request, Response};
use serde::Serialize;

use crate::api::error::ApiError;

pub const API_KEY_HEADER: &str = "x-api-key";
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized: Invalid API key";

#[derive(Debug, Serialize)]
struct UnauthorizedResponse {
    message: &'static str,
}

/// Shared secret expected in the `x-api-key` header, installed as request data.
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    fn matches(&self, presented: Option<&str>) -> bool {
        presented == Some(&*self.0)
    }
}

/// Shared-secret check for mutating routes.
///
/// A missing or wrong `x-api-key` header is answered here with a fixed 401
/// body. This response does not go through the error translator.
pub struct ApiKeyAuth;

impl<E: Endpoint> Middleware<E> for ApiKeyAuth {
    type Output = ApiKeyAuthEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        ApiKeyAuthEndpoint { inner: ep }
    }
}

pub struct ApiKeyAuthEndpoint<E> {
    inner: E,
}

impl<E: Endpoint> Endpoint for ApiKeyAuthEndpoint<E> {
    type Output = Response;

    async fn call(&self, req: Request) -> poem::Result<Self::Output> {
        let authorized = match req.data::<ApiKey>() {
            Some(key) => key.matches(req.header(API_KEY_HEADER)),
            None => {
                return Err(ApiError::Internal("API key is not configured".to_string()).into());
            }
        };

        if !authorized {
            tracing::warn!(
                method = %req.method(),
                path = %req.uri().path(),
                key_present = req.header(API_KEY_HEADER).is_some(),
                "Rejected request with invalid API key"
            );
            return Ok(unauthorized());
        }

        self.inner.call(req).await.map(IntoResponse::into_response)
    }
}

fn unauthorized() -> Response {
    Json(UnauthorizedResponse {
        message: UNAUTHORIZED_MESSAGE,
    })
    .with_status(StatusCode::UNAUTHORIZED)
    .into_response()
}
