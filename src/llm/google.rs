// Google Gemini adapter (generateContent endpoint)
// API Reference: https://ai.google.dev/api/generate-content

use crate::config::GeminiConfig;
use crate::llm::provider::CompletionClient;
use crate::types::CompletionError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const FALLBACK_ERROR_MESSAGE: &str = "Gemini API request failed";

pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

// Request types for the Gemini API
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

// Response types; every level is optional in practice (safety blocks drop content)
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Deserialize)]
struct GeminiError {
    message: Option<String>,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    fn upstream_message(body: &str) -> String {
        serde_json::from_str::<GeminiErrorResponse>(body)
            .ok()
            .and_then(|e| e.error.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
    }

    fn first_candidate_text(response: GenerateContentResponse) -> Option<String> {
        response
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = GenerateContentRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart { text: prompt }],
            }],
        };

        debug!(model = %self.config.model, prompt_len = prompt.len(), "Calling Gemini");

        // The key travels as a query parameter, so strip the URL from transport errors
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::UpstreamUnavailable(e.without_url().to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = Self::upstream_message(&error_text);
            warn!(status = %status, message = %message, "Gemini rejected request");
            return Err(CompletionError::UpstreamRejected(message));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            CompletionError::UpstreamUnavailable(format!(
                "Failed to parse Gemini response: {}",
                e.without_url()
            ))
        })?;

        let text = Self::first_candidate_text(body)
            .map(|t| t.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            warn!(model = %self.config.model, "Gemini returned no candidate text");
            if self.config.reject_empty {
                return Err(CompletionError::EmptyResponse);
            }
        }

        Ok(text)
    }
}
