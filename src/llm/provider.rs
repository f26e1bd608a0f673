use async_trait::async_trait;
use crate::types::CompletionError;

/// A backend that turns one prompt into generated text.
///
/// Implementations issue a single call per prompt: no retries, no streaming.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}
