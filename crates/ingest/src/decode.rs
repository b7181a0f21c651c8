use crate::types::{DecodedText, TextEncoding};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decodes bytes as UTF-8, falling back to ISO-8859-1 when they are not
/// valid UTF-8. Never fails: every byte is a Latin-1 code point.
///
/// A leading UTF-8 byte-order mark is dropped.
pub fn decode_bytes(bytes: &[u8]) -> DecodedText {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => DecodedText {
            text: text.to_string(),
            encoding: TextEncoding::Utf8,
        },
        Err(_) => DecodedText {
            text: body.iter().map(|&b| char::from(b)).collect(),
            encoding: TextEncoding::Latin1Fallback,
        },
    }
}
