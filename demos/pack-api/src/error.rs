use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

/// Renders as a JSON `{"error": "..."}` body with a matching status code.
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<chorepack::ChorepackError> for AppError {
    fn from(e: chorepack::ChorepackError) -> Self {
        use chorepack::ChorepackError;
        match &e {
            ChorepackError::NotFound(msg) => AppError::not_found(msg.clone()),
            ChorepackError::InvalidInput(_) | ChorepackError::EmptyPool => {
                AppError::bad_request(e.to_string())
            }
            _ => {
                tracing::error!(error = %e, "request failed");
                AppError::internal("Something went wrong")
            }
        }
    }
}
