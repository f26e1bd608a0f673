use crate::config::Config;
use crate::llm::CompletionClient;
use crate::storage::TempUpload;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub completion: Arc<dyn CompletionClient>,
}

impl AppState {
    pub fn new(config: Config, completion: Arc<dyn CompletionClient>) -> Self {
        Self { config, completion }
    }
}

/// Body of the text routes. `text` is optional here so that a missing field
/// is reported as a validation error rather than a deserialization error.
#[derive(Debug, Clone, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// One request's file payload, spooled to disk.
///
/// Owned by the handling request; dropping it deletes the backing file.
#[derive(Debug)]
pub struct UploadedDocument {
    pub file_name: String,
    pub media_type: String,
    pub size: u64,
    pub storage: TempUpload,
}
