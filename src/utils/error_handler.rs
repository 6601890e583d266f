// Request-level and layer-level error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use http_body_util::LengthLimitError;
use serde_json::{json, Value};
use std::error::Error;
use tower::timeout::error::Elapsed;
use tracing::error;
use uuid::Uuid;

/// Errors a handler can return to the client. Serialized as
/// `{"error": "<message>"}` with the matching status code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("todo {0} does not exist")]
    TodoNotFound(Uuid),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::TodoNotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status: StatusCode = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Maps errors escaping the middleware layers to HTTP responses.
pub async fn handle_global_error(err: BoxError) -> (StatusCode, Json<Value>) {
    // 413 if the body was too large
    if find_cause::<LengthLimitError>(&*err).is_some() {
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(json!({ "error": "request body too large" })),
        );
    }

    // 408 if the request took too long
    if err.is::<Elapsed>() {
        return (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "request timed out" })),
        );
    }

    // Otherwise, 500
    error!("Unhandled middleware error: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal server error" })),
    )
}

/// Helper function to find specific error type in error chain
pub fn find_cause<T: Error + 'static>(err: &dyn Error) -> Option<&T> {
    let mut source: Option<&dyn Error> = err.source();

    while let Some(s) = source {
        if let Some(typed) = s.downcast_ref::<T>() {
            return Some(typed);
        }
        source = s.source();
    }

    None
}

/// JSON 404 for paths no route group claims.
pub async fn fallback_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "the requested route does not exist" })),
    )
}
