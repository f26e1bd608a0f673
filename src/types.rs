// Error taxonomy shared by the extraction, completion and routing layers

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing text")]
    MissingField,

    #[error("No file uploaded")]
    MissingFile,

    /// Body could not be read or decoded; keeps the extractor's status (400, 413, 415)
    #[error("{message}")]
    InvalidBody { status: StatusCode, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Failed to read upload: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// Non-success status; carries the upstream message verbatim
    #[error("{0}")]
    UpstreamRejected(String),

    #[error("Gemini API unreachable: {0}")]
    UpstreamUnavailable(String),

    #[error("Gemini returned an empty response")]
    EmptyResponse,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Completion(#[from] CompletionError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(ValidationError::InvalidBody { status, .. }) => *status,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
