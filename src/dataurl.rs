//! Byte-buffer ⇄ base64 text helpers

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

pub fn to_base64(buffer: &[u8]) -> String {
    STANDARD.encode(buffer)
}

/// Returns the base64 payload of a data URL, with the `data:...;base64,`
/// prefix removed. Text without a prefix passes through unchanged.
pub fn data_url_payload(data_url: &str) -> &str {
    match data_url.find(',') {
        Some(comma) => &data_url[comma + 1..],
        None => data_url,
    }
}
