use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

pub type ApiResult<T> = Result<T, ApiError>;

/// Domain errors raised anywhere below the HTTP boundary. Every variant
/// carries the message the client sees; the boundary renders all of them
/// through the same `{ "error": true, "message" }` envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    /// A mutation's postcondition was not observed (zero rows modified, or a
    /// deleted row still present on re-fetch).
    #[error("{0}")]
    ServerFault(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    /// Collapse field violations into one bad-request message.
    pub fn validation(violations: Vec<String>) -> Self {
        ApiError::BadRequest(violations.join(" "))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ServerFault(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            ApiError::Database(e) => {
                // Database details are logged, never sent to the client.
                tracing::error!(error = %e, "database error");
                "Internal server error".to_string()
            }
            ApiError::ServerFault(msg) => {
                tracing::error!(message = %msg, "mutation postcondition failed");
                msg.clone()
            }
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": true, "message": message }))).into_response()
    }
}

/// Path ids are store-generated uuids; anything else fails before the store
/// is consulted.
pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid id type!".to_string()))
}
