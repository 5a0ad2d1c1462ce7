/// Error handling for the API server
///
/// The registration endpoint never returns these: it always answers with a
/// redirect. `ApiError` serves the JSON endpoints (readiness) and turns a
/// [`RegistrationError`] into an HTTP status for them.
///
/// # Example
///
/// ```
/// use intelmed_api::error::{ApiError, ApiResult};
/// use axum::Json;
/// use serde_json::{json, Value};
///
/// async fn handler(ready: bool) -> ApiResult<Json<Value>> {
///     if !ready {
///         return Err(ApiError::ServiceUnavailable("Database is not reachable".to_string()));
///     }
///     Ok(Json(json!({ "status": "ready" })))
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use intelmed_shared::registration::RegistrationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors of the health endpoints
#[derive(Debug)]
pub enum ApiError {
    /// Internal server error (500)
    InternalError(String),

    /// Service unavailable (503)
    ServiceUnavailable(String),
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "service_unavailable")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            ApiError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg)
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Convert store ping failures to API errors
///
/// `RegistrationStore::ping` only reports connectivity or database errors;
/// anything else is treated as internal.
impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Connectivity(_) => {
                ApiError::ServiceUnavailable("Database is not reachable".to_string())
            }
            other => ApiError::InternalError(other.to_string()),
        }
    }
}
