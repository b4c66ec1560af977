use poem::error::{MethodNotAllowedError, NotFoundError, ResponseError};
use poem::http::StatusCode;
use poem::web::Json;
use poem::{Endpoint, IntoResponse, Middleware, Request, Response};
use serde::{Deserialize, Serialize};

/// Status family reported in the error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// The client sent something we cannot act on (4xx).
    Fail,
    /// Anything else went wrong.
    Error,
}

impl Classification {
    pub fn from_status(status: StatusCode) -> Self {
        if status.is_client_error() {
            Classification::Fail
        } else {
            Classification::Error
        }
    }
}

/// Uniform error body: `{"status": "fail" | "error", "message": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: Classification,
    pub message: String,
}

/// Errors raised by handlers and middleware.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn classification(&self) -> Classification {
        Classification::from_status(ResponseError::status(self))
    }
}

impl ResponseError for ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Terminal stage of the middleware chain.
///
/// Every error that reaches it is logged and rendered as an [`ErrorResponse`]
/// carrying the error's own status code. Unmatched routes and methods become
/// "Cannot find ..." not-found errors.
pub struct ErrorTranslator;

impl<E: Endpoint> Middleware<E> for ErrorTranslator {
    type Output = ErrorTranslatorEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        ErrorTranslatorEndpoint { inner: ep }
    }
}

pub struct ErrorTranslatorEndpoint<E> {
    inner: E,
}

impl<E: Endpoint> Endpoint for ErrorTranslatorEndpoint<E> {
    type Output = Response;

    async fn call(&self, req: Request) -> poem::Result<Self::Output> {
        let method = req.method().clone();
        let uri = req.uri().to_string();

        match self.inner.call(req).await {
            Ok(output) => Ok(output.into_response()),
            Err(err) => {
                let (status, body) = translate(&err, &uri);
                if status.is_server_error() {
                    tracing::error!(%method, %uri, %status, error = %err, "request failed");
                } else {
                    tracing::warn!(%method, %uri, %status, error = %err, "request rejected");
                }
                Ok(Json(body).with_status(status).into_response())
            }
        }
    }
}

/// Maps any error to its status code and envelope.
pub fn translate(err: &poem::Error, uri: &str) -> (StatusCode, ErrorResponse) {
    if let Some(api_error) = err.downcast_ref::<ApiError>() {
        return (ResponseError::status(api_error), envelope(api_error));
    }

    if err.is::<NotFoundError>() || err.is::<MethodNotAllowedError>() {
        let not_found = ApiError::NotFound(format!("Cannot find {uri} on this server"));
        return (StatusCode::NOT_FOUND, envelope(&not_found));
    }

    let status = err.status();
    let message = err.to_string();
    (
        status,
        ErrorResponse {
            status: Classification::from_status(status),
            message: if message.is_empty() {
                "Internal Server Error".to_string()
            } else {
                message
            },
        },
    )
}

fn envelope(err: &ApiError) -> ErrorResponse {
    ErrorResponse {
        status: err.classification(),
        message: err.to_string(),
    }
}
