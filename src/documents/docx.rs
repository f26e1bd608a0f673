// DOCX extraction
//
// A DOCX file is a ZIP package; the body lives in word/document.xml.
// Only run text is kept: <w:t> content, tabs, breaks and paragraph ends.

use crate::types::ExtractionError;
use std::io::{Cursor, Read};
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_text(content: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(content))
        .map_err(|e| ExtractionError::MalformedDocument(format!("invalid DOCX package: {}", e)))?;

    let mut document_xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|_| {
            ExtractionError::MalformedDocument(format!("invalid DOCX package: {} not found", DOCUMENT_PART))
        })?
        .read_to_string(&mut document_xml)
        .map_err(|e| ExtractionError::MalformedDocument(format!("unreadable {}: {}", DOCUMENT_PART, e)))?;

    Ok(text_from_document_xml(&document_xml))
}

/// Walk the WordprocessingML markup and collect visible text.
fn text_from_document_xml(xml: &str) -> String {
    let mut out = String::new();
    let mut in_text = false;
    // <w:tabs> holds tab-stop definitions, which are also spelled <w:tab/>
    let mut in_tab_stops = false;
    let mut rest = xml;

    while let Some(open) = rest.find('<') {
        if in_text {
            out.push_str(&unescape(&rest[..open]));
        }

        let Some(close) = rest[open..].find('>') else {
            break;
        };
        let tag = &rest[open + 1..open + close];
        rest = &rest[open + close + 1..];

        let closing = tag.starts_with('/');
        let self_closing = tag.ends_with('/');
        let name = tag
            .trim_start_matches('/')
            .trim_end_matches('/')
            .split(|c: char| c.is_whitespace())
            .next()
            .unwrap_or_default();

        match name {
            "w:t" => in_text = !closing && !self_closing,
            "w:tabs" => in_tab_stops = !closing && !self_closing,
            "w:tab" if !closing && !in_tab_stops => out.push('\t'),
            "w:br" | "w:cr" if !closing => out.push('\n'),
            "w:p" if closing => out.push('\n'),
            _ => {}
        }
    }

    out.trim_end().to_string()
}

fn unescape(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest.find(';').and_then(|semi| {
            let entity = &rest[1..semi];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .or_else(|| entity.strip_prefix('#').map(|dec| dec.parse::<u32>()))
                    .and_then(|n| n.ok())
                    .and_then(char::from_u32),
            };
            ch.map(|c| (c, semi))
        });

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
