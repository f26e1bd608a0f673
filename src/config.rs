use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub uploads: UploadConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// Cap on JSON request bodies, in bytes
    pub json_body_limit: usize,
}

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    /// Treat an empty completion as a failure instead of a valid empty result
    pub reject_empty: bool,
}

// The credential must never end up in logs.
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("reject_empty", &self.reject_empty)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub dir: PathBuf,
    /// Cap on multipart request bodies, in bytes
    pub body_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "10000".to_string())
                    .parse()
                    .context("PORT must be a valid port number")?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                json_body_limit: env::var("JSON_BODY_LIMIT")
                    .unwrap_or_else(|_| (5 * 1024 * 1024).to_string())
                    .parse()
                    .context("JSON_BODY_LIMIT must be a byte count")?,
            },
            gemini: GeminiConfig {
                api_key: env::var("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?,
                model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
                api_base: env::var("GEMINI_API_BASE")
                    .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string()),
                reject_empty: env::var("REJECT_EMPTY_COMPLETIONS")
                    .unwrap_or_else(|_| "false".to_string())
                    .parse()
                    .context("REJECT_EMPTY_COMPLETIONS must be true or false")?,
            },
            uploads: UploadConfig {
                dir: env::var("UPLOAD_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("uploads")),
                body_limit: env::var("UPLOAD_BODY_LIMIT")
                    .unwrap_or_else(|_| (25 * 1024 * 1024).to_string())
                    .parse()
                    .context("UPLOAD_BODY_LIMIT must be a byte count")?,
            },
        })
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            reject_empty: false,
        }
    }
}
