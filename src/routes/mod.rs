//! HTTP Routes
//!
//! - `GET /` - Liveness banner
//! - `POST /summarize-text`, `POST /quiz-text` - JSON `{ "text": ... }`
//! - `POST /summarize-file`, `POST /quiz-file` - multipart field `file`
//!
//! Every route funnels into [`run_task`]: build the prompt, make one
//! completion call, answer `{ "summary": ... }` or `{ "quiz": ... }`.
//! Failures are converted to `{ "error": ... }` by [`AppError`](crate::types::AppError).

pub mod files;
pub mod health;
pub mod text;

#[cfg(test)]
pub(crate) mod test_support;

use axum::{Json, Router};
use crate::middleware::cors_layer;
use crate::models::AppState;
use crate::prompt::{build_prompt, TaskKind};
use crate::types::AppResult;
use serde_json::{Map, Value};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    Router::new()
        .merge(health::router())
        .merge(text::router(state.clone()))
        .merge(files::router(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

/// Prompt, complete, and shape the response for one task.
pub(crate) async fn run_task(state: &AppState, kind: TaskKind, text: &str) -> AppResult<Json<Value>> {
    let prompt = build_prompt(kind, text);

    let output = state.completion.complete(&prompt).await?;

    info!(task = %kind, text_len = text.len(), output_len = output.len(), "Task completed");

    let mut body = Map::new();
    body.insert(kind.response_field().to_string(), Value::String(output));
    Ok(Json(Value::Object(body)))
}
