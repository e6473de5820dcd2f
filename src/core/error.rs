use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Error taxonomy for the upload/read paths.
///
/// Every variant is converted at the handler boundary into a JSON body of the
/// form `{"error": message}` carrying the underlying error message. One
/// attempt per external call; there are no retries and no cleanup of partial
/// failures (a metadata-write failure leaves the stored object orphaned).
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or empty required input (client fault)
    #[error("{0}")]
    Validation(String),

    /// Malformed request payload (unreadable multipart, oversize upload)
    #[error("{0}")]
    BadRequest(String),

    /// Object storage write failure; no metadata record was written
    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    /// Metadata write failure after a successful object write (orphan risk)
    #[error("Metadata write failed: {0}")]
    MetadataWrite(String),

    /// Read-path store failure
    #[error("Query failed: {0}")]
    Query(String),

    /// Startup or configuration failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::StorageWrite(_)
            | AppError::MetadataWrite(_)
            | AppError::Query(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self);
        }

        let body = Json(serde_json::json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
