use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use crate::models::{AppState, TextRequest};
use crate::prompt::TaskKind;
use crate::routes::run_task;
use crate::types::{AppResult, ValidationError};
use serde_json::Value;
use tracing::info;

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.server.json_body_limit;

    Router::new()
        .route("/summarize-text", post(summarize_text))
        .route("/quiz-text", post(quiz_text))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

async fn summarize_text(
    State(state): State<AppState>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> AppResult<Json<Value>> {
    handle_text(&state, TaskKind::Summarize, payload).await
}

async fn quiz_text(
    State(state): State<AppState>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> AppResult<Json<Value>> {
    handle_text(&state, TaskKind::Quiz, payload).await
}

async fn handle_text(
    state: &AppState,
    kind: TaskKind,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let Json(request) = payload.map_err(|rejection| ValidationError::InvalidBody {
        // A well-formed body with a mistyped field is still the caller's bad input
        status: match rejection {
            JsonRejection::JsonDataError(_) => StatusCode::BAD_REQUEST,
            ref other => other.status(),
        },
        message: rejection.body_text(),
    })?;

    let text = request
        .text
        .filter(|t| !t.is_empty())
        .ok_or(ValidationError::MissingField)?;

    info!(task = %kind, text_len = text.len(), "Text task received");
    run_task(state, kind, &text).await
}
