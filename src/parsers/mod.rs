pub mod html;
pub mod json;
pub mod price;

pub use html::*;
pub use json::*;
pub use price::*;

use html_escape::decode_html_entities;
use tracing::debug;

use crate::models::CatalogEntry;

/// Clean and normalize text by removing extra whitespace and decoding HTML entities
pub fn clean_text(text: &str) -> String {
    let decoded = decode_html_entities(text);
    decoded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Make an image reference absolute against the site origin.
///
/// `http…` passes through, `//host/…` gets an `https:` scheme, `/path` gets
/// the origin prepended, and anything else is returned as-is.
pub fn normalize_image_url(src: &str, origin: &str) -> String {
    let src = src.trim();
    if src.is_empty() {
        String::new()
    } else if src.starts_with("http") {
        src.to_string()
    } else if src.starts_with("//") {
        format!("https:{}", src)
    } else if src.starts_with('/') {
        format!("{}{}", origin.trim_end_matches('/'), src)
    } else {
        src.to_string()
    }
}

/// Parse a payload in whichever mode fits it.
///
/// JSON mode is used when the declared content type says so or when the body
/// itself parses as JSON; everything else goes through the HTML parser.
pub fn parse_droplist(body: &str, content_type: Option<&str>, origin: &str) -> Vec<CatalogEntry> {
    let declared_json = content_type
        .map(|ct| ct.to_ascii_lowercase().contains("json"))
        .unwrap_or(false);

    let trimmed = body.trim_start();
    if declared_json || trimmed.starts_with('{') || trimmed.starts_with('[') {
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => return parse_json_droplist(&value, origin),
            Err(e) if declared_json => {
                debug!("Declared JSON payload failed to parse: {}", e);
                return Vec::new();
            }
            Err(_) => {}
        }
    }

    parse_html_droplist(body, origin)
}
