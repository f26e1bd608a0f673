//! Document text extraction
//!
//! Turns an uploaded document's bytes into plain text for prompting.
//! The strategy is picked once by [`DocumentFormat::classify`] from the
//! declared media type and the file extension (first match wins):
//!
//! 1. `application/pdf` or `.pdf`  → [`DocumentFormat::Pdf`]
//! 2. the WordprocessingML media type or `.docx` → [`DocumentFormat::Docx`]
//! 3. anything else → [`DocumentFormat::PlainText`]
//!
//! There is no content sniffing: a mislabeled binary file falls through to
//! the plain-text path and produces garbled text rather than an error.

pub mod docx;
pub mod pdf;
pub mod text;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::types::ExtractionError;
use std::path::Path;
use tracing::debug;

pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentFormat {
    pub fn classify(media_type: &str, file_name: &str) -> Self {
        let media_type = normalize_media_type(media_type);
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let extension = extension.as_deref();

        if media_type.as_deref() == Some(mime::APPLICATION_PDF.essence_str()) || extension == Some("pdf") {
            DocumentFormat::Pdf
        } else if media_type.as_deref() == Some(DOCX_MEDIA_TYPE) || extension == Some("docx") {
            DocumentFormat::Docx
        } else {
            DocumentFormat::PlainText
        }
    }

    pub fn extract(self, content: &[u8]) -> Result<String, ExtractionError> {
        match self {
            DocumentFormat::Pdf => pdf::extract_text(content),
            DocumentFormat::Docx => docx::extract_text(content),
            DocumentFormat::PlainText => Ok(text::extract_text(content)),
        }
    }
}

/// Lowercased `type/subtype` with parameters dropped; `None` if unparseable.
fn normalize_media_type(media_type: &str) -> Option<String> {
    media_type
        .trim()
        .parse::<mime::Mime>()
        .ok()
        .map(|m| m.essence_str().to_ascii_lowercase())
}

/// Extract plain text from `content`, dispatching on media type and file name.
pub fn extract(content: &[u8], media_type: &str, file_name: &str) -> Result<String, ExtractionError> {
    let format = DocumentFormat::classify(media_type, file_name);
    debug!(?format, media_type, file_name, bytes = content.len(), "Extracting document text");
    format.extract(content)
}

/// Runs [`extract`] on the blocking pool; the buffer is dropped when extraction ends.
pub async fn extract_blocking(
    content: Vec<u8>,
    media_type: String,
    file_name: String,
) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || extract(&content, &media_type, &file_name))
        .await
        .map_err(|e| ExtractionError::Io(std::io::Error::other(e)))?
}
