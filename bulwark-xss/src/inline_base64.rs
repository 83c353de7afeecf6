//! Inline `base64,<payload>` detection.

use crate::error::DecodeFragmentError;
use base64::Engine;
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

/// One base64 symbol, optionally preceded by spaces or escaped whitespace.
const SYMBOL: &str = r"(?:(?:\\[frnt]| )*[A-Z0-9+/])";

static BASE64_BLOCK: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"(?i)base64\s*,\s*((?:{s}{{4}})*(?:{s}{{2}}==|{s}{{3}}=)?)",
        s = SYMBOL
    );
    Regex::new(&pattern).unwrap()
});

// Only lowercase escapes count as whitespace once a payload is matched
static PAYLOAD_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\[frnt]| ").unwrap());

// Standard alphabet, tolerant of non-zero trailing bits like most decoders
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Remove every inline base64 block whose decoded text `is_malicious`.
///
/// Blocks are all-or-nothing: a malicious block disappears entirely
/// (`base64,` marker included), anything else is kept byte for byte.
/// Payloads that fail to decode are logged and kept.
pub fn strip_malicious_blocks<'a, F>(input: &'a str, is_malicious: F) -> Cow<'a, str>
where
    F: Fn(&str) -> bool,
{
    BASE64_BLOCK.replace_all(input, |caps: &Captures| {
        let block = &caps[0];
        let payload = &caps[1];

        match decode_payload(payload) {
            Ok(decoded) if is_malicious(&decoded) => {
                tracing::debug!(len = block.len(), "Removing base64 block with script content");
                String::new()
            }
            Ok(_) => block.to_string(),
            Err(err) => {
                err.log();
                block.to_string()
            }
        }
    })
}

/// Decode a matched payload to (lossy UTF-8) text.
pub fn decode_payload(payload: &str) -> Result<String, DecodeFragmentError> {
    let compact = PAYLOAD_WHITESPACE.replace_all(payload, "");
    LENIENT
        .decode(compact.as_bytes())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .map_err(|source| DecodeFragmentError::Base64 {
            fragment: payload.to_string(),
            source,
        })
}

/// Payloads of all inline base64 blocks in `input`.
pub fn payloads(input: &str) -> impl Iterator<Item = &str> {
    BASE64_BLOCK
        .captures_iter(input)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}
