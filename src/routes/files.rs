use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, State,
    },
    routing::post,
    Json, Router,
};
use crate::documents;
use crate::models::{AppState, UploadedDocument};
use crate::prompt::TaskKind;
use crate::routes::run_task;
use crate::storage::TempUpload;
use crate::types::{AppResult, ExtractionError, ValidationError};
use serde_json::Value;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::info;

const FILE_FIELD: &str = "file";

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.uploads.body_limit;

    Router::new()
        .route("/summarize-file", post(summarize_file))
        .route("/quiz-file", post(quiz_file))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

async fn summarize_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<Value>> {
    handle_file(&state, TaskKind::Summarize, multipart).await
}

async fn quiz_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<Value>> {
    handle_file(&state, TaskKind::Quiz, multipart).await
}

async fn handle_file(
    state: &AppState,
    kind: TaskKind,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<Value>> {
    // Not a multipart body at all: there is no file to look at
    let multipart = multipart.map_err(|_| ValidationError::MissingFile)?;

    let document = receive_upload(multipart, &state.config.uploads.dir).await?;
    info!(
        task = %kind,
        file_name = %document.file_name,
        media_type = %document.media_type,
        size = document.size,
        "File task received"
    );

    let text = extract_document(document).await?;
    run_task(state, kind, &text).await
}

/// Spool the `file` attachment to a temporary upload.
///
/// Other parts are skipped, and so is a plain form value named `file`:
/// only a part carrying a `filename` counts as an attachment.
async fn receive_upload(mut multipart: Multipart, dir: &Path) -> AppResult<UploadedDocument> {
    while let Some(mut field) = multipart.next_field().await.map_err(invalid_body)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let media_type = field
            .content_type()
            .map(str::to_string)
            .or_else(|| mime_guess::from_path(&file_name).first().map(|m| m.to_string()))
            .unwrap_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string());

        let (storage, mut file) = TempUpload::create(dir, &file_name)
            .await
            .map_err(ExtractionError::Io)?;

        let mut size = 0u64;
        while let Some(chunk) = field.chunk().await.map_err(invalid_body)? {
            size += chunk.len() as u64;
            file.write_all(&chunk).await.map_err(ExtractionError::Io)?;
        }
        file.flush().await.map_err(ExtractionError::Io)?;

        if size == 0 {
            return Err(ValidationError::MissingFile.into());
        }

        return Ok(UploadedDocument {
            file_name,
            media_type,
            size,
            storage,
        });
    }

    Err(ValidationError::MissingFile.into())
}

/// Extract the upload's text and release its storage, whatever the outcome.
async fn extract_document(document: UploadedDocument) -> Result<String, ExtractionError> {
    let UploadedDocument {
        file_name,
        media_type,
        storage,
        ..
    } = document;

    let text = match storage.read().await {
        Ok(content) => documents::extract_blocking(content, media_type, file_name).await,
        Err(e) => Err(ExtractionError::Io(e)),
    };
    drop(storage);

    text
}

fn invalid_body(error: MultipartError) -> ValidationError {
    ValidationError::InvalidBody {
        status: error.status(),
        message: error.body_text(),
    }
}
