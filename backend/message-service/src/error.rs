/// Error types for Message Service
///
/// Errors are converted to JSON HTTP responses for API clients.
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error, Clone)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("server start failure: {0}")]
    StartServer(String),

    /// Payload could not be decoded into the expected shape
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Body exceeds the transport ceiling
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// Persistence medium unreachable or failed the operation
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl AppError {
    /// Stable error code for client handling
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) | AppError::StartServer(_) => "INTERNAL_SERVER_ERROR",
            AppError::BadRequest(_) => "INVALID_REQUEST",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::StorageUnavailable(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::StorageUnavailable(format!("migration failed: {err}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config(_) | AppError::StartServer(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.code(), "request failed");
        }

        HttpResponse::build(status).json(serde_json::json!({
            "error": self.to_string(),
            "code": self.code(),
            "status": status.as_u16(),
        }))
    }
}
