// Plain-text fallback

/// Decode `content` as UTF-8. Invalid sequences become U+FFFD instead of failing.
pub fn extract_text(content: &[u8]) -> String {
    String::from_utf8_lossy(content).into_owned()
}
