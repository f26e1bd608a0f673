// PDF extraction via lopdf

use crate::types::ExtractionError;
use lopdf::Document;
use tracing::warn;

/// Concatenate the text of every page in page-number order.
///
/// A page whose content cannot be decoded is skipped; only an unreadable
/// container fails the whole document.
pub fn extract_text(content: &[u8]) -> Result<String, ExtractionError> {
    let document = Document::load_mem(content)
        .map_err(|e| ExtractionError::MalformedDocument(format!("invalid PDF: {}", e)))?;

    let mut text = String::new();
    for page_number in document.get_pages().into_keys() {
        match document.extract_text(&[page_number]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => warn!(page = page_number, error = %e, "Skipping undecodable PDF page"),
        }
    }

    Ok(text)
}
