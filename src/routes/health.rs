use axum::{routing::get, Router};

pub const BANNER: &str =
    "Document relay server is live! Endpoints: /summarize-text, /quiz-text, /summarize-file, /quiz-file";

pub fn router() -> Router {
    Router::new().route("/", get(banner))
}

async fn banner() -> &'static str {
    BANNER
}
