use base64::{Engine, engine::general_purpose::STANDARD};
use regex::Regex;
use std::sync::LazyLock;

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]*$").expect("integer pattern is valid"));

/// Parse number or size field text.
///
/// The text must be non-empty, match `^-?[0-9]*$` and fit in 64 bits.
pub fn parse_number(text: &str) -> Option<i64> {
    if text.is_empty() || !INTEGER.is_match(text) {
        return None;
    }
    text.parse().ok()
}

/// Parse binary field text, as standard base64.
pub fn parse_binary(text: &str) -> Option<Vec<u8>> {
    STANDARD.decode(text).ok()
}
