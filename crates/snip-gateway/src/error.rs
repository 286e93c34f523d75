use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use snip_core::CoreError;
use snip_shortener::ShortenerError;
use tracing::{debug, error};

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    InvalidShortCode(String),
    /// The body is not JSON, lacks the JSON content type, or has the wrong shape.
    InvalidBody(JsonRejection),
    NotFound(String),
    Shortener(ShortenerError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidShortCode(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidBody(rejection) => rejection.status(),
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Shortener(source) => match source {
                ShortenerError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
                ShortenerError::Exhausted { .. }
                | ShortenerError::Cache(_)
                | ShortenerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::InvalidShortCode(message) => format!("invalid short code: {message}"),
            AppError::InvalidBody(rejection) => rejection.body_text(),
            AppError::NotFound(code) => format!("short code not found: {code}"),
            AppError::Shortener(source) => source.to_string(),
        }
    }
}

impl From<ShortenerError> for AppError {
    fn from(error: ShortenerError) -> Self {
        AppError::Shortener(error)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection)
    }
}

impl From<CoreError> for AppError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidShortCode(message) => AppError::InvalidShortCode(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            error!(status = %status, error = %message, "request failed");
        } else {
            debug!(status = %status, error = %message, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snip_core::{CacheError, StorageError};

    #[test]
    fn client_errors_map_to_4xx() {
        let invalid_url = AppError::from(ShortenerError::InvalidUrl("empty".to_string()));
        assert_eq!(invalid_url.status(), StatusCode::BAD_REQUEST);

        let invalid_code = AppError::from(CoreError::InvalidShortCode("len".to_string()));
        assert_eq!(invalid_code.status(), StatusCode::BAD_REQUEST);

        let missing = AppError::NotFound("abc123".to_string());
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn server_errors_map_to_500() {
        let exhausted = AppError::from(ShortenerError::Exhausted {
            url: "https://example.com".to_string(),
            attempts: 10,
        });
        assert_eq!(exhausted.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(exhausted.message().contains("after 10 retries"));

        let storage = AppError::from(ShortenerError::from(StorageError::Timeout(
            "pool".to_string(),
        )));
        assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let cache = AppError::from(ShortenerError::from(CacheError::Unavailable(
            "down".to_string(),
        )));
        assert_eq!(cache.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
